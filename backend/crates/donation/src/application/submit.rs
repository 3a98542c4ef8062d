//! Submit Donation Use Case

use std::sync::Arc;

use crate::application::receipt::{ReceiptNotifier, dispatch_receipt};
use crate::domain::entity::donation::Donation;
use crate::domain::repository::DonationRepository;
use crate::domain::value_object::{
    amount::{Amount, AmountInput},
    cause_category::CauseCategory,
    donor::Donor,
    payment_method::PaymentMethod,
};
use crate::error::{DonationError, DonationResult};

/// Unvalidated submission
#[derive(Debug, Clone, Default)]
pub struct SubmitDonationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub amount: Option<AmountInput>,
    pub payment_method: Option<String>,
    pub cause_category: Option<String>,
    pub message: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: Option<String>,
    pub anonymous: bool,
}

pub struct SubmitDonationUseCase<R, N>
where
    R: DonationRepository,
    N: ReceiptNotifier + Sync + 'static,
{
    repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> SubmitDonationUseCase<R, N>
where
    R: DonationRepository,
    N: ReceiptNotifier + Sync + 'static,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }

    pub async fn execute(&self, input: SubmitDonationInput) -> DonationResult<Donation> {
        let donation = Self::validate(input)?;

        self.repo.create(&donation).await?;

        tracing::info!(
            donation_id = %donation.donation_id,
            amount = donation.amount.value(),
            payment_method = %donation.payment_method,
            category = %donation.cause_category,
            "Donation recorded"
        );

        dispatch_receipt(self.notifier.clone(), &donation);

        Ok(donation)
    }

    /// All checks happen before anything is written
    fn validate(input: SubmitDonationInput) -> DonationResult<Donation> {
        let donor = Donor::new(input.name, input.email, input.phone, input.address)?;

        let amount = input
            .amount
            .ok_or_else(|| DonationError::Validation("Amount is required".to_string()))
            .and_then(|raw| Amount::try_from(raw).map_err(DonationError::from))?;

        let payment_method = match input.payment_method.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(DonationError::Validation(
                    "Payment method is required".to_string(),
                ));
            }
            Some(code) => PaymentMethod::from_code(code).ok_or_else(|| {
                DonationError::Validation(format!(
                    "Invalid payment method: {} (expected upi, card or netbanking)",
                    code
                ))
            })?,
        };

        let cause_category = CauseCategory::new(input.cause_category.unwrap_or_default())?;

        Ok(Donation::new(donor, amount, payment_method, cause_category)
            .with_message(input.message)
            .with_references(input.transaction_id, input.receipt_number)
            .with_anonymous(input.anonymous))
    }
}
