//! Dashboard Use Case
//!
//! All-time and current-month totals, per-category totals and the newest
//! donations.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::application::config::DonationConfig;
use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::{AmountTotal, CategoryBucket};
use crate::domain::repository::DonationStatsRepository;
use crate::error::{DonationError, DonationResult};

#[derive(Debug, Clone)]
pub struct DashboardOutput {
    pub total_donations: AmountTotal,
    pub monthly_donations: AmountTotal,
    pub donations_by_category: Vec<CategoryBucket>,
    pub recent_donations: Vec<Donation>,
}

pub struct DashboardUseCase<S>
where
    S: DonationStatsRepository,
{
    stats: Arc<S>,
    config: Arc<DonationConfig>,
}

impl<S> DashboardUseCase<S>
where
    S: DonationStatsRepository,
{
    pub fn new(stats: Arc<S>, config: Arc<DonationConfig>) -> Self {
        Self { stats, config }
    }

    pub async fn execute(&self) -> DonationResult<DashboardOutput> {
        self.execute_at(Utc::now()).await
    }

    pub async fn execute_at(&self, now: DateTime<Utc>) -> DonationResult<DashboardOutput> {
        let month_start = start_of_month(now)?;

        let total_donations = self.stats.total(None).await?;
        let monthly_donations = self.stats.total(Some(month_start)).await?;
        let donations_by_category = self.stats.by_category(None).await?;
        let recent_donations = self.stats.recent(self.config.recent_limit).await?;

        Ok(DashboardOutput {
            total_donations,
            monthly_donations,
            donations_by_category,
            recent_donations,
        })
    }
}

/// Midnight UTC on the first of `now`'s month
fn start_of_month(now: DateTime<Utc>) -> DonationResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| DonationError::Internal(format!("No month start for {}", now)))
}
