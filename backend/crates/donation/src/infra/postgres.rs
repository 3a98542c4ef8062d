//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::email::Email;
use kernel::id::DonationId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::donation::Donation;
use crate::domain::entity::summary::{
    AmountMetrics, AmountTotal, CategoryBucket, DailyTrend, PaymentMethodBucket, StatusCount,
};
use crate::domain::repository::{DonationFilter, DonationRepository, DonationStatsRepository};
use crate::domain::value_object::{
    amount::Amount, cause_category::CauseCategory, donation_status::DonationStatus, donor::Donor,
    page::PageRequest, payment_method::PaymentMethod,
};
use crate::error::{DonationError, DonationResult};

const UNIQUE_VIOLATION: &str = "23505";

const DONATION_COLUMNS: &str = r#"
    donation_id,
    donor_name,
    donor_email,
    donor_phone,
    donor_address,
    amount,
    payment_method,
    cause_category,
    message,
    status,
    transaction_id,
    receipt_number,
    anonymous,
    donated_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed donation repository
#[derive(Clone)]
pub struct PgDonationRepository {
    pool: PgPool,
}

impl PgDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> DonationError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let message = match db.constraint() {
                Some(c) if c.contains("transaction_id") => "Transaction ID already recorded",
                Some(c) if c.contains("receipt_number") => "Receipt number already recorded",
                _ => "Donation already recorded",
            };
            return DonationError::Conflict(message.to_string());
        }
    }
    DonationError::Database(err)
}

// ============================================================================
// Donation Repository Implementation
// ============================================================================

impl DonationRepository for PgDonationRepository {
    async fn create(&self, donation: &Donation) -> DonationResult<()> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                donation_id,
                donor_name,
                donor_email,
                donor_phone,
                donor_address,
                amount,
                payment_method,
                cause_category,
                message,
                status,
                transaction_id,
                receipt_number,
                anonymous,
                donated_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(donation.donation_id.as_uuid())
        .bind(&donation.donor.name)
        .bind(donation.donor.email.as_str())
        .bind(&donation.donor.phone)
        .bind(&donation.donor.address)
        .bind(donation.amount.value())
        .bind(donation.payment_method.code())
        .bind(donation.cause_category.as_str())
        .bind(&donation.message)
        .bind(donation.status.code())
        .bind(&donation.transaction_id)
        .bind(&donation.receipt_number)
        .bind(donation.anonymous)
        .bind(donation.timestamp)
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, donation_id: &DonationId) -> DonationResult<Option<Donation>> {
        let sql = format!(
            "SELECT {} FROM donations WHERE donation_id = $1",
            DONATION_COLUMNS
        );
        let row = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(donation_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_donation()).transpose()
    }

    async fn list(&self, page: Option<PageRequest>) -> DonationResult<Vec<Donation>> {
        let sql = format!(
            "SELECT {} FROM donations ORDER BY donated_at DESC LIMIT $1 OFFSET $2",
            DONATION_COLUMNS
        );
        // NULL limit means no limit
        let limit = page.map(|p| i64::from(p.limit));
        let offset = page.map(|p| p.offset() as i64).unwrap_or(0);

        let rows = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_donation()).collect()
    }

    async fn list_by_category(&self, category: &CauseCategory) -> DonationResult<Vec<Donation>> {
        let sql = format!(
            "SELECT {} FROM donations WHERE cause_category = $1 ORDER BY donated_at DESC",
            DONATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_donation()).collect()
    }

    async fn list_filtered(&self, filter: &DonationFilter) -> DonationResult<Vec<Donation>> {
        let sql = format!(
            r#"
            SELECT {} FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
              AND ($2::timestamptz IS NULL OR donated_at <= $2)
              AND ($3::timestamptz IS NULL OR donated_at < $3)
              AND ($4::text IS NULL OR cause_category = $4)
            ORDER BY donated_at DESC
            "#,
            DONATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.before)
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_donation()).collect()
    }

    async fn update_status(
        &self,
        donation_id: &DonationId,
        status: DonationStatus,
        updated_at: DateTime<Utc>,
    ) -> DonationResult<Option<Donation>> {
        let sql = format!(
            r#"
            UPDATE donations SET
                status = $2,
                updated_at = $3
            WHERE donation_id = $1
            RETURNING {}
            "#,
            DONATION_COLUMNS
        );
        let row = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(donation_id.as_uuid())
            .bind(status.code())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_donation()).transpose()
    }
}

// ============================================================================
// Stats Repository Implementation
// ============================================================================

impl DonationStatsRepository for PgDonationRepository {
    async fn total(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountTotal> {
        let (total, count) = sqlx::query_as::<_, (f64, i64)>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::float8, COUNT(*)
            FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(AmountTotal { total, count })
    }

    async fn metrics(&self, since: Option<DateTime<Utc>>) -> DonationResult<AmountMetrics> {
        let (total_amount, avg_amount, total_count) = sqlx::query_as::<_, (f64, f64, i64)>(
            r#"
            SELECT
                COALESCE(SUM(amount), 0)::float8,
                COALESCE(AVG(amount), 0)::float8,
                COUNT(*)
            FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(AmountMetrics {
            total_amount,
            avg_amount,
            total_count,
        })
    }

    async fn by_category(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<Vec<CategoryBucket>> {
        let rows = sqlx::query_as::<_, (String, f64, i64)>(
            r#"
            SELECT cause_category, SUM(amount)::float8 AS amount, COUNT(*)
            FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
            GROUP BY cause_category
            ORDER BY amount DESC, cause_category ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, amount, count)| CategoryBucket {
                category,
                amount,
                count,
            })
            .collect())
    }

    async fn by_payment_method(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<Vec<PaymentMethodBucket>> {
        let rows = sqlx::query_as::<_, (String, f64, i64)>(
            r#"
            SELECT payment_method, SUM(amount)::float8, COUNT(*)
            FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
            GROUP BY payment_method
            ORDER BY payment_method
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(code, amount, count)| {
                Ok(PaymentMethodBucket {
                    payment_method: parse_payment_method(&code)?,
                    amount,
                    count,
                })
            })
            .collect()
    }

    async fn by_status(&self, since: Option<DateTime<Utc>>) -> DonationResult<Vec<StatusCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM donations
            WHERE ($1::timestamptz IS NULL OR donated_at >= $1)
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(code, count)| {
                Ok(StatusCount {
                    status: parse_status(&code)?,
                    count,
                })
            })
            .collect()
    }

    async fn daily_trend(&self, since: DateTime<Utc>) -> DonationResult<Vec<DailyTrend>> {
        let rows = sqlx::query_as::<_, (NaiveDate, f64, i64)>(
            r#"
            SELECT (donated_at AT TIME ZONE 'UTC')::date AS day, SUM(amount)::float8, COUNT(*)
            FROM donations
            WHERE donated_at >= $1
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, amount, count)| DailyTrend {
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

// ============================================================================
// Row Types
// ============================================================================

fn parse_payment_method(code: &str) -> DonationResult<PaymentMethod> {
    PaymentMethod::from_code(code)
        .ok_or_else(|| DonationError::Internal(format!("Invalid payment_method: {}", code)))
}

fn parse_status(code: &str) -> DonationResult<DonationStatus> {
    DonationStatus::from_code(code)
        .ok_or_else(|| DonationError::Internal(format!("Invalid status: {}", code)))
}

#[derive(sqlx::FromRow)]
struct DonationRow {
    donation_id: Uuid,
    donor_name: String,
    donor_email: String,
    donor_phone: Option<String>,
    donor_address: Option<String>,
    amount: f64,
    payment_method: String,
    cause_category: String,
    message: Option<String>,
    status: String,
    transaction_id: Option<String>,
    receipt_number: Option<String>,
    anonymous: bool,
    donated_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_donation(self) -> DonationResult<Donation> {
        Ok(Donation {
            donation_id: DonationId::from_uuid(self.donation_id),
            donor: Donor {
                name: self.donor_name,
                email: Email::from_db(self.donor_email),
                phone: self.donor_phone,
                address: self.donor_address,
            },
            amount: Amount::from_db(self.amount),
            payment_method: parse_payment_method(&self.payment_method)?,
            cause_category: CauseCategory::from_db(self.cause_category),
            message: self.message,
            status: parse_status(&self.status)?,
            transaction_id: self.transaction_id,
            receipt_number: self.receipt_number,
            anonymous: self.anonymous,
            timestamp: self.donated_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
