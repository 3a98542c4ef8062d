//! Application Configuration

use crate::domain::value_object::page::MAX_PAGE_LIMIT;

/// Donation application configuration
#[derive(Debug, Clone)]
pub struct DonationConfig {
    /// How many donations the dashboard shows as "recent"
    pub recent_limit: u32,
    /// Upper bound for `?limit=` on list endpoints
    pub max_page_limit: u32,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            recent_limit: 10,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }
}
