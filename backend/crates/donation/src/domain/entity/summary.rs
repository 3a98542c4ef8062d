//! Aggregation results
//!
//! Read models produced by the statistics repository. Empty inputs yield
//! zeros, never missing values.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_object::{
    donation_status::DonationStatus, payment_method::PaymentMethod,
};

/// Sum and count over a set of donations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountTotal {
    pub total: f64,
    pub count: i64,
}

/// Window metrics for analytics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountMetrics {
    pub total_amount: f64,
    pub avg_amount: f64,
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category: String,
    pub amount: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodBucket {
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: DonationStatus,
    pub count: i64,
}

/// One UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    #[serde(with = "day_format")]
    pub date: NaiveDate,
    pub amount: f64,
    pub count: i64,
}

mod day_format {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}
