//! Update Donation Status Use Case

use std::sync::Arc;

use kernel::id::DonationId;

use crate::domain::entity::donation::Donation;
use crate::domain::repository::DonationRepository;
use crate::domain::value_object::donation_status::DonationStatus;
use crate::error::{DonationError, DonationResult};

pub struct UpdateDonationStatusUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateDonationStatusUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Only `status` and `updated_at` change. Setting the current status is a no-op.
    pub async fn execute(&self, raw_id: &str, raw_status: &str) -> DonationResult<Donation> {
        let status = DonationStatus::from_code(raw_status.trim()).ok_or_else(|| {
            DonationError::Validation(format!(
                "Invalid status: {} (expected pending, completed or failed)",
                raw_status.trim()
            ))
        })?;

        let donation_id = raw_id
            .parse::<DonationId>()
            .map_err(|_| DonationError::NotFound)?;

        let mut donation = self
            .repo
            .find_by_id(&donation_id)
            .await?
            .ok_or(DonationError::NotFound)?;

        if !donation.set_status(status) {
            tracing::debug!(donation_id = %donation_id, status = %status, "Donation status unchanged");
            return Ok(donation);
        }

        let donation = self
            .repo
            .update_status(&donation_id, donation.status, donation.updated_at)
            .await?
            .ok_or(DonationError::NotFound)?;

        tracing::info!(donation_id = %donation_id, status = %status, "Donation status updated");

        Ok(donation)
    }
}
