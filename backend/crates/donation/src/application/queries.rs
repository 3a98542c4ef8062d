//! Donation read use cases

use std::sync::Arc;

use kernel::id::DonationId;

use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::AmountTotal;
use crate::domain::repository::{DonationRepository, DonationStatsRepository};
use crate::domain::value_object::{cause_category::CauseCategory, page::PageRequest};
use crate::error::{DonationError, DonationResult};

/// Newest-first list, optionally paginated
pub struct ListDonationsUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> ListDonationsUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, page: Option<PageRequest>) -> DonationResult<Vec<Donation>> {
        self.repo.list(page).await
    }
}

pub struct GetDonationUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> GetDonationUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Unparseable ids are indistinguishable from missing ones
    pub async fn execute(&self, raw_id: &str) -> DonationResult<Donation> {
        let donation_id = raw_id
            .parse::<DonationId>()
            .map_err(|_| DonationError::NotFound)?;

        self.repo
            .find_by_id(&donation_id)
            .await?
            .ok_or(DonationError::NotFound)
    }
}

pub struct DonationsByCategoryUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> DonationsByCategoryUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A blank category matches nothing
    pub async fn execute(&self, raw_category: &str) -> DonationResult<Vec<Donation>> {
        match CauseCategory::new(raw_category) {
            Ok(category) => self.repo.list_by_category(&category).await,
            Err(_) => Ok(Vec::new()),
        }
    }
}

pub struct TotalDonationsUseCase<S>
where
    S: DonationStatsRepository,
{
    stats: Arc<S>,
}

impl<S> TotalDonationsUseCase<S>
where
    S: DonationStatsRepository,
{
    pub fn new(stats: Arc<S>) -> Self {
        Self { stats }
    }

    pub async fn execute(&self) -> DonationResult<AmountTotal> {
        self.stats.total(None).await
    }
}
