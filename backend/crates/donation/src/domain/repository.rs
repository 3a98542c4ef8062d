//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::DonationId;

use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::{
    AmountMetrics, AmountTotal, CategoryBucket, DailyTrend, PaymentMethodBucket, StatusCount,
};
use crate::domain::value_object::{
    cause_category::CauseCategory, donation_status::DonationStatus, page::PageRequest,
};
use crate::error::DonationResult;

/// Export filter. Each bound applies independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationFilter {
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub to: Option<DateTime<Utc>>,
    /// Exclusive upper bound
    pub before: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

/// Donation record storage. Every list is newest-first by `timestamp`.
#[trait_variant::make(DonationRepository: Send)]
pub trait LocalDonationRepository {
    /// Insert. Duplicate transaction id or receipt number is a conflict.
    async fn create(&self, donation: &Donation) -> DonationResult<()>;

    async fn find_by_id(&self, donation_id: &DonationId) -> DonationResult<Option<Donation>>;

    /// All donations, or one page of them
    async fn list(&self, page: Option<PageRequest>) -> DonationResult<Vec<Donation>>;

    /// Exact category match
    async fn list_by_category(&self, category: &CauseCategory) -> DonationResult<Vec<Donation>>;

    async fn list_filtered(&self, filter: &DonationFilter) -> DonationResult<Vec<Donation>>;

    /// Set status and `updated_at`. `None` if the donation does not exist.
    async fn update_status(
        &self,
        donation_id: &DonationId,
        status: DonationStatus,
        updated_at: DateTime<Utc>,
    ) -> DonationResult<Option<Donation>>;
}

/// Aggregations. `since` is an inclusive lower bound on `timestamp`;
/// `None` means all time.
#[trait_variant::make(DonationStatsRepository: Send)]
pub trait LocalDonationStatsRepository {
    async fn total(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountTotal>;

    async fn metrics(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountMetrics>;

    /// Ordered by amount descending, then category
    async fn by_category(&self, since: Option<DateTime<Utc>>)
    -> DonationResult<Vec<CategoryBucket>>;

    async fn by_payment_method(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<Vec<PaymentMethodBucket>>;

    async fn by_status(&self, since: Option<DateTime<Utc>>) -> DonationResult<Vec<StatusCount>>;

    /// Per UTC day, ascending
    async fn daily_trend(&self, since: DateTime<Utc>) -> DonationResult<Vec<DailyTrend>>;

    /// Newest `limit` donations
    async fn recent(&self, limit: u32) -> DonationResult<Vec<Donation>>;
}
