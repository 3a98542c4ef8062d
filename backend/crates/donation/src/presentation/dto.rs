//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::submit::SubmitDonationInput;
use crate::application::{AnalyticsOutput, DashboardOutput, ExportInput};
use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::{
    AmountMetrics, AmountTotal, CategoryBucket, DailyTrend, PaymentMethodBucket, StatusCount,
};
use crate::domain::value_object::{
    amount::{Amount, AmountInput},
    donation_status::DonationStatus,
    payment_method::PaymentMethod,
    time_range::TimeRange,
};

// ============================================================================
// Submission
// ============================================================================

/// Nested donor block; takes precedence over the flat fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonorPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Donation submission. Accepts both the flat and the nested donor shape,
/// plus `purpose` / `notes` as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDonationRequest {
    pub donor: Option<DonorPayload>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub amount: Option<AmountInput>,
    pub payment_method: Option<String>,
    #[serde(alias = "purpose")]
    pub cause_category: Option<String>,
    #[serde(alias = "notes")]
    pub message: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

impl From<SubmitDonationRequest> for SubmitDonationInput {
    fn from(req: SubmitDonationRequest) -> Self {
        let donor = req.donor.unwrap_or_default();

        SubmitDonationInput {
            name: donor.name.or(req.name),
            email: donor.email.or(req.email),
            phone: donor.phone.or(req.phone),
            address: donor.address.or(req.address),
            amount: req.amount,
            payment_method: req.payment_method,
            cause_category: req.cause_category,
            message: req.message,
            transaction_id: req.transaction_id,
            receipt_number: req.receipt_number,
            anonymous: req.anonymous,
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub time_range: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
}

impl From<ExportQuery> for ExportInput {
    fn from(query: ExportQuery) -> Self {
        ExportInput {
            start_date: query.start_date,
            end_date: query.end_date,
            category: query.category,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub cause_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    pub anonymous: bool,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Donation> for DonationView {
    fn from(d: &Donation) -> Self {
        Self {
            id: d.donation_id.to_string(),
            name: d.donor.name.clone(),
            email: d.donor.email.as_str().to_string(),
            phone: d.donor.phone.clone(),
            address: d.donor.address.clone(),
            amount: d.amount,
            payment_method: d.payment_method,
            cause_category: d.cause_category.as_str().to_string(),
            message: d.message.clone(),
            status: d.status,
            transaction_id: d.transaction_id.clone(),
            receipt_number: d.receipt_number.clone(),
            anonymous: d.anonymous,
            timestamp: d.timestamp,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

pub fn donation_views(donations: &[Donation]) -> Vec<DonationView> {
    donations.iter().map(DonationView::from).collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalView {
    pub total_amount: f64,
    pub count: i64,
}

impl From<AmountTotal> for TotalView {
    fn from(total: AmountTotal) -> Self {
        Self {
            total_amount: total.total,
            count: total.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalView {
    pub category: String,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total_donations: AmountTotal,
    pub monthly_donations: AmountTotal,
    pub donations_by_category: Vec<CategoryTotalView>,
    pub recent_donations: Vec<DonationView>,
}

impl From<DashboardOutput> for DashboardView {
    fn from(out: DashboardOutput) -> Self {
        Self {
            total_donations: out.total_donations,
            monthly_donations: out.monthly_donations,
            donations_by_category: out
                .donations_by_category
                .into_iter()
                .map(|b: CategoryBucket| CategoryTotalView {
                    category: b.category,
                    total: b.amount,
                    count: b.count,
                })
                .collect(),
            recent_donations: donation_views(&out.recent_donations),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub time_range: TimeRange,
    pub start_date: DateTime<Utc>,
    pub trends: Vec<DailyTrend>,
    pub category_distribution: Vec<CategoryBucket>,
    pub payment_methods: Vec<PaymentMethodBucket>,
    pub success_rate: Vec<StatusCount>,
    pub metrics: AmountMetrics,
}

impl From<AnalyticsOutput> for AnalyticsView {
    fn from(out: AnalyticsOutput) -> Self {
        Self {
            time_range: out.time_range,
            start_date: out.start_date,
            trends: out.trends,
            category_distribution: out.category_distribution,
            payment_methods: out.payment_methods,
            success_rate: out.success_rate,
            metrics: out.metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_donor_and_aliases() {
        let req: SubmitDonationRequest = serde_json::from_str(
            r#"{
                "donor": {"name": "Asha", "email": "asha@example.com"},
                "name": "ignored",
                "amount": "750",
                "paymentMethod": "card",
                "purpose": "health",
                "notes": "for the clinic"
            }"#,
        )
        .unwrap();
        let input = SubmitDonationInput::from(req);

        assert_eq!(input.name.as_deref(), Some("Asha"));
        assert_eq!(input.email.as_deref(), Some("asha@example.com"));
        assert_eq!(input.cause_category.as_deref(), Some("health"));
        assert_eq!(input.message.as_deref(), Some("for the clinic"));
        assert_eq!(input.amount, Some(AmountInput::Text("750".into())));
    }

    #[test]
    fn test_flat_donor() {
        let req: SubmitDonationRequest = serde_json::from_str(
            r#"{"name": "A", "email": "a@x.com", "amount": 500, "paymentMethod": "upi", "causeCategory": "education"}"#,
        )
        .unwrap();
        let input = SubmitDonationInput::from(req);
        assert_eq!(input.name.as_deref(), Some("A"));
        assert_eq!(input.amount, Some(AmountInput::Number(500.0)));
        assert!(!input.anonymous);
    }
}
