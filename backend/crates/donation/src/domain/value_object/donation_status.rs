use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a donation. Changes only through an explicit admin update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 3] = [
        DonationStatus::Pending,
        DonationStatus::Completed,
        DonationStatus::Failed,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Completed => "completed",
            DonationStatus::Failed => "failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
