//! Receipt Notification
//!
//! Builds the thank-you message for a donation and hands it to a
//! `ReceiptNotifier` on a detached task. Delivery failures are logged and
//! never reach the caller.

use std::sync::Arc;

use kernel::email::Email;

use crate::domain::entity::donation::Donation;
use crate::error::DonationResult;

pub const RECEIPT_SUBJECT: &str = "Thank you for your donation!";

/// A rendered receipt ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptMessage {
    pub to: Email,
    pub subject: String,
    pub html: String,
}

impl ReceiptMessage {
    pub fn for_donation(donation: &Donation) -> Self {
        let reference = |value: &Option<String>| {
            value
                .as_deref()
                .map(escape_html)
                .unwrap_or_else(|| "N/A".to_string())
        };

        let html = format!(
            "<h1>Donation Receipt</h1>\
             <p>Dear {name},</p>\
             <p>Thank you for your generous donation of ₹{amount} to {category}.</p>\
             <p>Receipt Number: {receipt}</p>\
             <p>Transaction ID: {transaction}</p>\
             <p>Date: {date}</p>\
             <p>Your support makes a difference!</p>",
            name = escape_html(&donation.donor.name),
            amount = donation.amount,
            category = escape_html(donation.cause_category.as_str()),
            receipt = reference(&donation.receipt_number),
            transaction = reference(&donation.transaction_id),
            date = donation.timestamp.format("%Y-%m-%d"),
        );

        Self {
            to: donation.donor.email.clone(),
            subject: RECEIPT_SUBJECT.to_string(),
            html,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Delivery channel for receipts
#[trait_variant::make(ReceiptNotifier: Send)]
pub trait LocalReceiptNotifier {
    async fn send_receipt(&self, receipt: &ReceiptMessage) -> DonationResult<()>;
}

/// Notifier used when no mail relay is configured
#[derive(Debug, Clone, Default)]
pub struct LogOnlyNotifier;

impl ReceiptNotifier for LogOnlyNotifier {
    async fn send_receipt(&self, receipt: &ReceiptMessage) -> DonationResult<()> {
        tracing::info!(to = %receipt.to, subject = %receipt.subject, "Receipt not sent: mail disabled");
        Ok(())
    }
}

/// Fire-and-forget delivery on a detached task
pub fn dispatch_receipt<N>(notifier: Arc<N>, donation: &Donation)
where
    N: ReceiptNotifier + Sync + 'static,
{
    let receipt = ReceiptMessage::for_donation(donation);
    let donation_id = donation.donation_id;

    tokio::spawn(async move {
        match notifier.send_receipt(&receipt).await {
            Ok(()) => tracing::debug!(donation_id = %donation_id, "Receipt dispatched"),
            Err(e) => tracing::warn!(donation_id = %donation_id, error = %e, "Receipt delivery failed"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        amount::Amount, cause_category::CauseCategory, donor::Donor,
        payment_method::PaymentMethod,
    };

    fn donation(name: &str) -> Donation {
        Donation::new(
            Donor::new(Some(name.into()), Some("a@x.com".into()), None, None).unwrap(),
            Amount::new(500.0).unwrap(),
            PaymentMethod::Upi,
            CauseCategory::new("education").unwrap(),
        )
    }

    #[test]
    fn test_receipt_contents() {
        let d = donation("Asha").with_references(Some("TX-9".into()), None);
        let receipt = ReceiptMessage::for_donation(&d);

        assert_eq!(receipt.to.as_str(), "a@x.com");
        assert_eq!(receipt.subject, RECEIPT_SUBJECT);
        assert!(receipt.html.contains("Dear Asha,"));
        assert!(receipt.html.contains("₹500 to education"));
        assert!(receipt.html.contains("Transaction ID: TX-9"));
        assert!(receipt.html.contains("Receipt Number: N/A"));
        assert!(receipt.html.contains(&d.timestamp.format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn test_donor_text_is_escaped() {
        let receipt = ReceiptMessage::for_donation(&donation("<script>alert('x')</script>"));
        assert!(!receipt.html.contains("<script>"));
        assert!(receipt.html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }
}
