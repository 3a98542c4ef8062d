//! Analytics Use Case
//!
//! Aggregates over the window `[start, now]` where `start` comes from the
//! requested `TimeRange`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::summary::{
    AmountMetrics, CategoryBucket, DailyTrend, PaymentMethodBucket, StatusCount,
};
use crate::domain::repository::DonationStatsRepository;
use crate::domain::value_object::time_range::TimeRange;
use crate::error::DonationResult;

#[derive(Debug, Clone)]
pub struct AnalyticsOutput {
    pub time_range: TimeRange,
    pub start_date: DateTime<Utc>,
    pub trends: Vec<DailyTrend>,
    pub category_distribution: Vec<CategoryBucket>,
    pub payment_methods: Vec<PaymentMethodBucket>,
    pub success_rate: Vec<StatusCount>,
    pub metrics: AmountMetrics,
}

pub struct AnalyticsUseCase<S>
where
    S: DonationStatsRepository,
{
    stats: Arc<S>,
}

impl<S> AnalyticsUseCase<S>
where
    S: DonationStatsRepository,
{
    pub fn new(stats: Arc<S>) -> Self {
        Self { stats }
    }

    pub async fn execute(&self, time_range: TimeRange) -> DonationResult<AnalyticsOutput> {
        self.execute_at(time_range, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        time_range: TimeRange,
        now: DateTime<Utc>,
    ) -> DonationResult<AnalyticsOutput> {
        let start = time_range.start_from(now);
        let since = Some(start);

        let trends = self.stats.daily_trend(start).await?;
        let category_distribution = self.stats.by_category(since).await?;
        let payment_methods = self.stats.by_payment_method(since).await?;
        let success_rate = self.stats.by_status(since).await?;
        let metrics = self.stats.metrics(since).await?;

        tracing::debug!(
            time_range = %time_range,
            start = %start,
            total_count = metrics.total_count,
            "Analytics computed"
        );

        Ok(AnalyticsOutput {
            time_range,
            start_date: start,
            trends,
            category_distribution,
            payment_methods,
            success_rate,
            metrics,
        })
    }
}
