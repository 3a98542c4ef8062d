//! Donation Entity

use chrono::{DateTime, Utc};
use kernel::id::DonationId;

use crate::domain::value_object::{
    amount::Amount, cause_category::CauseCategory, donation_status::DonationStatus, donor::Donor,
    donor::non_blank, payment_method::PaymentMethod,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub donation_id: DonationId,
    pub donor: Donor,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub cause_category: CauseCategory,
    pub message: Option<String>,
    pub status: DonationStatus,
    /// Unique when present
    pub transaction_id: Option<String>,
    /// Unique when present
    pub receipt_number: Option<String>,
    pub anonymous: bool,
    /// Submission time; immutable ordering key
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// A freshly submitted donation, pending and stamped now
    pub fn new(
        donor: Donor,
        amount: Amount,
        payment_method: PaymentMethod,
        cause_category: CauseCategory,
    ) -> Self {
        let now = Utc::now();

        Self {
            donation_id: DonationId::new(),
            donor,
            amount,
            payment_method,
            cause_category,
            message: None,
            status: DonationStatus::default(),
            transaction_id: None,
            receipt_number: None,
            anonymous: false,
            timestamp: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = non_blank(message);
        self
    }

    /// Blank references are stored as absent so they never collide
    pub fn with_references(
        mut self,
        transaction_id: Option<String>,
        receipt_number: Option<String>,
    ) -> Self {
        self.transaction_id = non_blank(transaction_id);
        self.receipt_number = non_blank(receipt_number);
        self
    }

    pub fn with_anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    /// Returns false when the status is unchanged
    pub fn set_status(&mut self, status: DonationStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = Utc::now();
        true
    }
}
