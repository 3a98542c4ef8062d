//! Application Layer
//!
//! Use cases and application services.

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod queries;
pub mod receipt;
pub mod submit;
pub mod update_status;

// Re-exports
pub use analytics::{AnalyticsOutput, AnalyticsUseCase};
pub use config::DonationConfig;
pub use dashboard::{DashboardOutput, DashboardUseCase};
pub use export::{ExportDonationsUseCase, ExportInput};
pub use queries::{
    DonationsByCategoryUseCase, GetDonationUseCase, ListDonationsUseCase, TotalDonationsUseCase,
};
pub use receipt::{LogOnlyNotifier, ReceiptMessage, ReceiptNotifier, dispatch_receipt};
pub use submit::{SubmitDonationInput, SubmitDonationUseCase};
pub use update_status::UpdateDonationStatusUseCase;
