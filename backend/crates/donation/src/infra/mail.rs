//! Receipt delivery through the HTTP mail relay

use platform::mail::{HttpMailer, OutgoingMail};

use crate::application::receipt::{LogOnlyNotifier, ReceiptMessage, ReceiptNotifier};
use crate::error::{DonationError, DonationResult};

pub struct MailReceiptNotifier {
    mailer: HttpMailer,
}

impl MailReceiptNotifier {
    pub fn new(mailer: HttpMailer) -> Self {
        Self { mailer }
    }
}

impl ReceiptNotifier for MailReceiptNotifier {
    async fn send_receipt(&self, receipt: &ReceiptMessage) -> DonationResult<()> {
        let mail = OutgoingMail {
            to: receipt.to.as_str().to_string(),
            subject: receipt.subject.clone(),
            html: receipt.html.clone(),
        };

        self.mailer
            .send(&mail)
            .await
            .map_err(|e| DonationError::Notification(e.to_string()))?;

        tracing::info!(to = %receipt.to, from = %self.mailer.sender(), "Receipt sent");
        Ok(())
    }
}

/// Notifier picked at startup from configuration
pub enum ConfiguredNotifier {
    Mail(MailReceiptNotifier),
    LogOnly(LogOnlyNotifier),
}

impl ReceiptNotifier for ConfiguredNotifier {
    async fn send_receipt(&self, receipt: &ReceiptMessage) -> DonationResult<()> {
        match self {
            ConfiguredNotifier::Mail(mailer) => mailer.send_receipt(receipt).await,
            ConfiguredNotifier::LogOnly(log) => log.send_receipt(receipt).await,
        }
    }
}
