//! In-memory donation repository for tests and local tooling.
//!
//! Mirrors the ordering and uniqueness rules of the Postgres schema.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::DonationId;
use tokio::sync::RwLock;

use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::{
    AmountMetrics, AmountTotal, CategoryBucket, DailyTrend, PaymentMethodBucket, StatusCount,
};
use crate::domain::repository::{DonationFilter, DonationRepository, DonationStatsRepository};
use crate::domain::value_object::{
    cause_category::CauseCategory, donation_status::DonationStatus, page::PageRequest,
    payment_method::PaymentMethod,
};
use crate::error::{DonationError, DonationResult};

#[derive(Default)]
pub struct InMemoryDonationRepository {
    donations: RwLock<Vec<Donation>>,
}

impl InMemoryDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.donations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.donations.read().await.is_empty()
    }

    /// Newest first; ties broken by id for stable output
    async fn sorted(&self, keep: impl Fn(&Donation) -> bool) -> Vec<Donation> {
        let mut selected: Vec<Donation> = self
            .donations
            .read()
            .await
            .iter()
            .filter(|d| keep(d))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.donation_id.as_uuid().cmp(b.donation_id.as_uuid()))
        });
        selected
    }

    async fn window(&self, since: Option<DateTime<Utc>>) -> Vec<Donation> {
        self.sorted(|d| since.is_none_or(|s| d.timestamp >= s)).await
    }
}

fn same_reference(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

impl DonationRepository for InMemoryDonationRepository {
    async fn create(&self, donation: &Donation) -> DonationResult<()> {
        let mut donations = self.donations.write().await;

        for existing in donations.iter() {
            if same_reference(&existing.transaction_id, &donation.transaction_id) {
                return Err(DonationError::Conflict(
                    "Transaction ID already recorded".to_string(),
                ));
            }
            if same_reference(&existing.receipt_number, &donation.receipt_number) {
                return Err(DonationError::Conflict(
                    "Receipt number already recorded".to_string(),
                ));
            }
        }

        donations.push(donation.clone());
        Ok(())
    }

    async fn find_by_id(&self, donation_id: &DonationId) -> DonationResult<Option<Donation>> {
        Ok(self
            .donations
            .read()
            .await
            .iter()
            .find(|d| &d.donation_id == donation_id)
            .cloned())
    }

    async fn list(&self, page: Option<PageRequest>) -> DonationResult<Vec<Donation>> {
        let all = self.sorted(|_| true).await;
        Ok(match page {
            None => all,
            Some(p) => all
                .into_iter()
                .skip(p.offset() as usize)
                .take(p.limit as usize)
                .collect(),
        })
    }

    async fn list_by_category(&self, category: &CauseCategory) -> DonationResult<Vec<Donation>> {
        Ok(self.sorted(|d| &d.cause_category == category).await)
    }

    async fn list_filtered(&self, filter: &DonationFilter) -> DonationResult<Vec<Donation>> {
        Ok(self
            .sorted(|d| {
                filter.from.is_none_or(|from| d.timestamp >= from)
                    && filter.to.is_none_or(|to| d.timestamp <= to)
                    && filter.before.is_none_or(|before| d.timestamp < before)
                    && filter
                        .category
                        .as_deref()
                        .is_none_or(|c| d.cause_category.as_str() == c)
            })
            .await)
    }

    async fn update_status(
        &self,
        donation_id: &DonationId,
        status: DonationStatus,
        updated_at: DateTime<Utc>,
    ) -> DonationResult<Option<Donation>> {
        let mut donations = self.donations.write().await;
        Ok(donations
            .iter_mut()
            .find(|d| &d.donation_id == donation_id)
            .map(|d| {
                d.status = status;
                d.updated_at = updated_at;
                d.clone()
            }))
    }
}

impl DonationStatsRepository for InMemoryDonationRepository {
    async fn total(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountTotal> {
        let window = self.window(since).await;
        Ok(AmountTotal {
            total: window.iter().fold(0.0, |acc, d| acc + d.amount.value()),
            count: window.len() as i64,
        })
    }

    async fn metrics(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountMetrics> {
        let AmountTotal { total, count } = self.total(since).await?;
        Ok(AmountMetrics {
            total_amount: total,
            avg_amount: if count == 0 { 0.0 } else { total / count as f64 },
            total_count: count,
        })
    }

    async fn by_category(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<Vec<CategoryBucket>> {
        let mut groups: BTreeMap<String, (f64, i64)> = BTreeMap::new();
        for d in self.window(since).await {
            let entry = groups.entry(d.cause_category.as_str().to_string()).or_default();
            entry.0 += d.amount.value();
            entry.1 += 1;
        }

        let mut buckets: Vec<CategoryBucket> = groups
            .into_iter()
            .map(|(category, (amount, count))| CategoryBucket {
                category,
                amount,
                count,
            })
            .collect();
        buckets.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        Ok(buckets)
    }

    async fn by_payment_method(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<Vec<PaymentMethodBucket>> {
        let window = self.window(since).await;
        let mut buckets: Vec<PaymentMethodBucket> = PaymentMethod::ALL
            .into_iter()
            .filter_map(|method| {
                let matching: Vec<&Donation> =
                    window.iter().filter(|d| d.payment_method == method).collect();
                (!matching.is_empty()).then(|| PaymentMethodBucket {
                    payment_method: method,
                    amount: matching.iter().fold(0.0, |acc, d| acc + d.amount.value()),
                    count: matching.len() as i64,
                })
            })
            .collect();
        buckets.sort_by_key(|b| b.payment_method.code());
        Ok(buckets)
    }

    async fn by_status(&self, since: Option<DateTime<Utc>>) -> DonationResult<Vec<StatusCount>> {
        let window = self.window(since).await;
        let mut counts: Vec<StatusCount> = DonationStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let count = window.iter().filter(|d| d.status == status).count() as i64;
                (count > 0).then_some(StatusCount { status, count })
            })
            .collect();
        counts.sort_by_key(|c| c.status.code());
        Ok(counts)
    }

    async fn daily_trend(&self, since: DateTime<Utc>) -> DonationResult<Vec<DailyTrend>> {
        let mut days: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
        for d in self.window(Some(since)).await {
            let entry = days.entry(d.timestamp.date_naive()).or_default();
            entry.0 += d.amount.value();
            entry.1 += 1;
        }

        Ok(days
            .into_iter()
            .map(|(date, (amount, count))| DailyTrend {
                date,
                amount,
                count,
            })
            .collect())
    }

    async fn recent(&self, limit: u32) -> DonationResult<Vec<Donation>> {
        self.list(Some(PageRequest { page: 1, limit })).await
    }
}
