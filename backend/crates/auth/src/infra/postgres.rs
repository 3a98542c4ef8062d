//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::AdminId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_name::AdminName, admin_password::AdminPassword, admin_role::AdminRole,
    permission::PermissionSet,
};
use crate::error::{AuthError, AuthResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed admin repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for PgAdminRepository {
    async fn create(&self, admin: &Admin) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (
                admin_id,
                username,
                email,
                password_hash,
                role,
                permissions,
                last_login_at,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.username.as_str())
        .bind(admin.email.as_str())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.role.code())
        .bind(admin.permissions.codes())
        .bind(admin.last_login_at)
        .bind(admin.active)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AuthError::AdminExists
            }
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                username,
                email,
                password_hash,
                role,
                permissions,
                last_login_at,
                active,
                created_at,
                updated_at
            FROM admins
            WHERE admin_id = $1
            "#,
        )
        .bind(admin_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                username,
                email,
                password_hash,
                role,
                permissions,
                last_login_at,
                active,
                created_at,
                updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn exists_by_username_or_email(
        &self,
        username: &AdminName,
        email: &Email,
    ) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE username = $1 OR email = $2)",
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, admin: &Admin) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE admins SET
                username = $2,
                email = $3,
                password_hash = $4,
                role = $5,
                permissions = $6,
                last_login_at = $7,
                active = $8,
                updated_at = $9
            WHERE admin_id = $1
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.username.as_str())
        .bind(admin.email.as_str())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.role.code())
        .bind(admin.permissions.codes())
        .bind(admin.last_login_at)
        .bind(admin.active)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    permissions: Vec<String>,
    last_login_at: Option<DateTime<Utc>>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AuthResult<Admin> {
        let role = AdminRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        let permissions = PermissionSet::from_codes(&self.permissions)
            .map_err(|e| AuthError::Internal(format!("Invalid permissions: {}", e)))?;

        Ok(Admin {
            admin_id: AdminId::from_uuid(self.admin_id),
            username: AdminName::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash: AdminPassword::from_phc_string(self.password_hash)?,
            role,
            permissions,
            last_login_at: self.last_login_at,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
