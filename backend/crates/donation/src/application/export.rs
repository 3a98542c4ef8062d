//! Export Use Case
//!
//! Full matching set, newest first. Bounds accept RFC 3339 or `YYYY-MM-DD`;
//! a date-only upper bound covers the whole day.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::entity::donation::Donation;
use crate::domain::repository::{DonationFilter, DonationRepository};
use crate::domain::value_object::donor::non_blank;
use crate::error::{DonationError, DonationResult};

#[derive(Debug, Clone, Default)]
pub struct ExportInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
}

/// Parsed `endDate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpperBound {
    /// RFC 3339 instant, inclusive
    At(DateTime<Utc>),
    /// Date-only: everything before the following midnight
    Before(DateTime<Utc>),
}

fn invalid_date(raw: &str) -> DonationError {
    DonationError::Validation(format!(
        "Invalid date: {} (expected YYYY-MM-DD or RFC 3339)",
        raw
    ))
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

fn parse_day(raw: &str) -> DonationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid_date(raw))
}

fn parse_start(raw: &str) -> DonationResult<DateTime<Utc>> {
    match parse_instant(raw) {
        Some(instant) => Ok(instant),
        None => Ok(parse_day(raw)?.and_time(NaiveTime::MIN).and_utc()),
    }
}

fn parse_end(raw: &str) -> DonationResult<UpperBound> {
    if let Some(instant) = parse_instant(raw) {
        return Ok(UpperBound::At(instant));
    }

    let next_day = parse_day(raw)?
        .succ_opt()
        .ok_or_else(|| invalid_date(raw))?;
    Ok(UpperBound::Before(next_day.and_time(NaiveTime::MIN).and_utc()))
}

impl ExportInput {
    pub fn into_filter(self) -> DonationResult<DonationFilter> {
        let from = non_blank(self.start_date)
            .map(|raw| parse_start(&raw))
            .transpose()?;
        let end = non_blank(self.end_date)
            .map(|raw| parse_end(&raw))
            .transpose()?;

        let inverted = match (from, end) {
            (Some(from), Some(UpperBound::At(to))) => from > to,
            (Some(from), Some(UpperBound::Before(before))) => from >= before,
            _ => false,
        };
        if inverted {
            return Err(DonationError::Validation(
                "startDate must not be after endDate".to_string(),
            ));
        }

        let (to, before) = match end {
            Some(UpperBound::At(to)) => (Some(to), None),
            Some(UpperBound::Before(before)) => (None, Some(before)),
            None => (None, None),
        };

        Ok(DonationFilter {
            from,
            to,
            before,
            category: non_blank(self.category),
        })
    }
}

pub struct ExportDonationsUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> ExportDonationsUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ExportInput) -> DonationResult<Vec<Donation>> {
        let filter = input.into_filter()?;
        let donations = self.repo.list_filtered(&filter).await?;

        tracing::info!(
            from = ?filter.from,
            to = ?filter.to,
            before = ?filter.before,
            category = ?filter.category,
            count = donations.len(),
            "Donations exported"
        );

        Ok(donations)
    }
}
