//! HTTP-level tests for the donation and admin reporting routes

use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, TimeZone, Utc};
use kernel::email::Email;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tower::ServiceExt;

use auth::domain::entity::admin::Admin;
use auth::domain::repository::AdminRepository;
use auth::domain::value_object::{
    admin_name::AdminName,
    admin_password::{AdminPassword, RawPassword},
    admin_role::AdminRole,
};
use auth::{
    AuthConfig, AuthMiddlewareState, InMemoryAdminRepository, Permission, TokenService,
    auth_router_generic,
};

use crate::application::config::DonationConfig;
use crate::application::receipt::{ReceiptMessage, ReceiptNotifier};
use crate::domain::entity::donation::Donation;
use crate::domain::repository::DonationRepository;
use crate::domain::value_object::{
    amount::Amount, cause_category::CauseCategory, donor::Donor, payment_method::PaymentMethod,
};
use crate::error::{DonationError, DonationResult};
use crate::infra::memory::InMemoryDonationRepository;
use crate::presentation::router::{admin_router_generic, donation_router_generic};

// ============================================================================
// Harness
// ============================================================================

/// Forwards every receipt to the test, optionally failing afterwards
struct ChannelNotifier {
    tx: mpsc::UnboundedSender<ReceiptMessage>,
    fail: bool,
}

impl ReceiptNotifier for ChannelNotifier {
    async fn send_receipt(&self, receipt: &ReceiptMessage) -> DonationResult<()> {
        let _ = self.tx.send(receipt.clone());
        if self.fail {
            return Err(DonationError::Notification("relay down".to_string()));
        }
        Ok(())
    }
}

struct Harness {
    donations: Arc<InMemoryDonationRepository>,
    admins: Arc<InMemoryAdminRepository>,
    tokens: Arc<TokenService>,
    notifier: Arc<ChannelNotifier>,
    receipts: mpsc::UnboundedReceiver<ReceiptMessage>,
}

impl Harness {
    fn new() -> Self {
        Self::with_failing_notifier(false)
    }

    fn with_failing_notifier(fail: bool) -> Self {
        let (tx, receipts) = mpsc::unbounded_channel();
        Self {
            donations: Arc::new(InMemoryDonationRepository::new()),
            admins: Arc::new(InMemoryAdminRepository::new()),
            tokens: Arc::new(TokenService::new(&AuthConfig::new(
                b"donation-test-secret".to_vec(),
            ))),
            notifier: Arc::new(ChannelNotifier { tx, fail }),
            receipts,
        }
    }

    fn app(&self) -> Router {
        let config = Arc::new(DonationConfig::default());
        let auth = AuthMiddlewareState::new(self.admins.clone(), self.tokens.clone());

        let admin = auth_router_generic(self.admins.clone(), self.tokens.clone()).merge(
            admin_router_generic(
                self.donations.clone(),
                self.notifier.clone(),
                config.clone(),
                auth.clone(),
            ),
        );

        Router::new()
            .nest(
                "/api/donations",
                donation_router_generic(
                    self.donations.clone(),
                    self.notifier.clone(),
                    config,
                    auth,
                ),
            )
            .nest("/api/admin", admin)
    }

    /// Seed an admin and return a bearer token for it
    async fn token(&self, role: AdminRole, permissions: &[Permission]) -> String {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        let name = format!("admin{}", self.admins.len().await);
        let admin = Admin::new(
            AdminName::new(&name).unwrap(),
            Email::new(format!("{}@example.org", name)).unwrap(),
            AdminPassword::from_raw(&raw).unwrap(),
            role,
            permissions.iter().copied().collect(),
        );
        self.admins.create(&admin).await.unwrap();
        self.tokens.issue(&admin.admin_id, admin.role).unwrap()
    }

    async fn super_token(&self) -> String {
        self.token(AdminRole::SuperAdmin, &[]).await
    }

    /// Insert directly, bypassing the HTTP layer, with a chosen age
    async fn seed(&self, category: &str, amount: f64, age: Duration) -> Donation {
        self.seed_at(category, amount, Utc::now() - age).await
    }

    async fn seed_at(&self, category: &str, amount: f64, timestamp: DateTime<Utc>) -> Donation {
        let mut donation = Donation::new(
            Donor::new(Some("Seed".into()), Some("seed@example.com".into()), None, None).unwrap(),
            Amount::new(amount).unwrap(),
            PaymentMethod::Card,
            CauseCategory::new(category).unwrap(),
        );
        donation.timestamp = timestamp;
        self.donations.create(&donation).await.unwrap();
        donation
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn patch_json(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn scenario_body() -> Value {
    json!({
        "name": "A",
        "email": "a@x.com",
        "amount": 500,
        "paymentMethod": "upi",
        "causeCategory": "education"
    })
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_submit_creates_pending_donation() {
    let mut h = Harness::new();
    let before = Utc::now();

    let (status, body) = send(h.app(), post_json("/api/donations", scenario_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Donation created successfully");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["amount"].as_f64(), Some(500.0));
    assert_eq!(body["data"]["paymentMethod"], "upi");
    assert_eq!(body["data"]["anonymous"], false);

    let timestamp: chrono::DateTime<Utc> =
        serde_json::from_value(body["data"]["timestamp"].clone()).unwrap();
    assert!(timestamp >= before && timestamp <= Utc::now());

    let receipt = tokio::time::timeout(StdDuration::from_secs(2), h.receipts.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(receipt.to.as_str(), "a@x.com");
    assert_eq!(receipt.subject, "Thank you for your donation!");
}

#[tokio::test]
async fn test_submit_accepts_nested_donor_and_string_amount() {
    let h = Harness::new();
    let (status, body) = send(
        h.app(),
        post_json(
            "/api/donations",
            json!({
                "donor": { "name": "Ravi", "email": "RAVI@Example.com", "phone": "98450" },
                "amount": "1200.50",
                "paymentMethod": "netbanking",
                "purpose": "health",
                "notes": "monthly",
                "anonymous": true
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ravi@example.com");
    assert_eq!(body["data"]["phone"], "98450");
    assert_eq!(body["data"]["causeCategory"], "health");
    assert_eq!(body["data"]["message"], "monthly");
    assert_eq!(body["data"]["amount"].as_f64(), Some(1200.5));
    assert_eq!(body["data"]["anonymous"], true);
}

#[tokio::test]
async fn test_invalid_amounts_are_rejected_without_writes() {
    let h = Harness::new();

    for amount in [json!(-10), json!(0), json!("ten"), Value::Null] {
        let mut body = scenario_body();
        body["amount"] = amount.clone();

        let (status, resp) = send(h.app(), post_json("/api/donations", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount: {}", amount);
        assert_eq!(resp["success"], false);
    }

    let (status, body) = send(h.app(), get("/api/donations/total", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalAmount"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["count"], 0);
    assert!(h.donations.is_empty().await);
}

#[tokio::test]
async fn test_field_validation() {
    let h = Harness::new();

    let cases = [
        ("name", json!("  ")),
        ("email", json!("not-an-email")),
        ("paymentMethod", json!("cash")),
        ("causeCategory", json!("")),
    ];

    for (field, value) in cases {
        let mut body = scenario_body();
        body[field] = value;
        let (status, _) = send(h.app(), post_json("/api/donations", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field: {}", field);
    }

    assert!(h.donations.is_empty().await);
}

#[tokio::test]
async fn test_duplicate_transaction_id_conflicts() {
    let h = Harness::new();
    let mut body = scenario_body();
    body["transactionId"] = json!("TX-1");

    let (first, _) = send(h.app(), post_json("/api/donations", body.clone())).await;
    let (second, resp) = send(h.app(), post_json("/api/donations", body)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(resp["success"], false);
    assert_eq!(h.donations.len().await, 1);

    // Absent references never collide
    let (third, _) = send(h.app(), post_json("/api/donations", scenario_body())).await;
    let (fourth, _) = send(h.app(), post_json("/api/donations", scenario_body())).await;
    assert_eq!(third, StatusCode::CREATED);
    assert_eq!(fourth, StatusCode::CREATED);
}

#[tokio::test]
async fn test_receipt_failure_does_not_affect_response() {
    let mut h = Harness::with_failing_notifier(true);

    let (status, _) = send(h.app(), post_json("/api/donations", scenario_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let receipt = tokio::time::timeout(StdDuration::from_secs(2), h.receipts.recv())
        .await
        .unwrap();
    assert!(receipt.is_some());
    assert_eq!(h.donations.len().await, 1);
}

// ============================================================================
// Public queries
// ============================================================================

#[tokio::test]
async fn test_get_by_id_is_stable() {
    let h = Harness::new();
    let (_, created) = send(h.app(), post_json("/api/donations", scenario_body())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (s1, first) = send(h.app(), get(&format!("/api/donations/{}", id), None)).await;
    let (s2, second) = send(h.app(), get(&format!("/api/donations/{}", id), None)).await;

    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(first["data"], second["data"]);
    assert_eq!(first["data"], created["data"]);
}

#[tokio::test]
async fn test_get_missing_or_malformed_id_is_not_found() {
    let h = Harness::new();

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(h.app(), get(&format!("/api/donations/{}", missing), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Donation not found");

    let (status, _) = send(h.app(), get("/api/donations/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_filter() {
    let h = Harness::new();
    h.seed("education", 100.0, Duration::hours(2)).await;
    h.seed("health", 50.0, Duration::hours(1)).await;
    h.seed("education", 25.0, Duration::minutes(5)).await;

    let (status, body) = send(h.app(), get("/api/donations/category/education", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let amounts: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["amount"].as_f64().unwrap())
        .collect();
    assert_eq!(amounts, vec![25.0, 100.0]);

    let (_, body) = send(h.app(), get("/api/donations/category/arts", None)).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_total_equals_sum_over_list() {
    let h = Harness::new();
    for amount in [100.0, 250.5, 49.5] {
        h.seed("education", amount, Duration::minutes(1)).await;
    }
    let token = h.token(AdminRole::Admin, &[Permission::ViewDonations]).await;

    let (_, list) = send(h.app(), get("/api/donations", Some(&token))).await;
    let (_, total) = send(h.app(), get("/api/donations/total", None)).await;

    let sum: f64 = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["amount"].as_f64().unwrap())
        .sum();
    assert_eq!(total["data"]["totalAmount"].as_f64(), Some(sum));
    assert_eq!(total["data"]["count"], list["count"]);
    assert_eq!(list["count"], 3);
}

// ============================================================================
// Admin donation routes
// ============================================================================

#[tokio::test]
async fn test_list_requires_view_donations() {
    let h = Harness::new();
    h.seed("education", 10.0, Duration::minutes(1)).await;

    let (status, _) = send(h.app(), get("/api/donations", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let analyst = h.token(AdminRole::Admin, &[Permission::ViewAnalytics]).await;
    let (status, body) = send(h.app(), get("/api/donations", Some(&analyst))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to perform this action");

    let root = h.super_token().await;
    let (status, body) = send(h.app(), get("/api/donations", Some(&root))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_list_is_newest_first_and_paginates() {
    let h = Harness::new();
    for minutes in [30, 20, 10] {
        h.seed("education", minutes as f64, Duration::minutes(minutes)).await;
    }
    let token = h.super_token().await;

    let (_, all) = send(h.app(), get("/api/donations", Some(&token))).await;
    let amounts: Vec<f64> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["amount"].as_f64().unwrap())
        .collect();
    assert_eq!(amounts, vec![10.0, 20.0, 30.0]);

    let (_, page) = send(h.app(), get("/api/donations?page=2&limit=2", Some(&token))).await;
    assert_eq!(page["count"], 1);
    assert_eq!(page["data"][0]["amount"].as_f64(), Some(30.0));

    let (status, _) = send(h.app(), get("/api/donations?page=abc", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_update() {
    let h = Harness::new();
    let donation = h.seed("education", 10.0, Duration::minutes(1)).await;
    let uri = format!("/api/donations/{}/status", donation.donation_id);

    let clerk = h.token(AdminRole::Admin, &[Permission::ViewDonations]).await;
    let (status, _) = send(h.app(), patch_json(&uri, &clerk, json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let manager = h.token(AdminRole::Admin, &[Permission::ManageDonations]).await;
    let (status, body) =
        send(h.app(), patch_json(&uri, &manager, json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["amount"].as_f64(), Some(10.0));

    let stored = h
        .donations
        .find_by_id(&donation.donation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.timestamp, donation.timestamp);
    assert!(stored.updated_at >= donation.updated_at);

    let (status, body) =
        send(h.app(), patch_json(&uri, &manager, json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    let unchanged = h
        .donations
        .find_by_id(&donation.donation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.updated_at, stored.updated_at);

    let (status, _) = send(h.app(), patch_json(&uri, &manager, json!({ "status": "refunded" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/donations/{}/status", uuid::Uuid::new_v4());
    let (status, _) =
        send(h.app(), patch_json(&missing, &manager, json!({ "status": "failed" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Analytics and dashboard
// ============================================================================

#[tokio::test]
async fn test_empty_window_analytics_are_zero() {
    let h = Harness::new();
    let token = h.token(AdminRole::Admin, &[Permission::ViewAnalytics]).await;

    let (status, body) = send(h.app(), get("/api/admin/analytics?timeRange=week", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timeRange"], "week");
    assert_eq!(body["data"]["metrics"]["totalAmount"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["metrics"]["avgAmount"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["metrics"]["totalCount"], 0);
    assert_eq!(body["data"]["trends"], json!([]));
    assert_eq!(body["data"]["categoryDistribution"], json!([]));
}

#[tokio::test]
async fn test_week_analytics_exclude_old_donations_dashboard_includes_them() {
    let h = Harness::new();
    h.seed("education", 300.0, Duration::days(10)).await;
    h.seed("health", 100.0, Duration::days(1)).await;
    h.seed("health", 50.0, Duration::hours(1)).await;
    let token = h.token(AdminRole::Admin, &[Permission::ViewAnalytics]).await;

    let (_, analytics) =
        send(h.app(), get("/api/admin/analytics?timeRange=week", Some(&token))).await;
    let data = &analytics["data"];
    assert_eq!(data["metrics"]["totalAmount"].as_f64(), Some(150.0));
    assert_eq!(data["metrics"]["avgAmount"].as_f64(), Some(75.0));
    assert_eq!(data["metrics"]["totalCount"], 2);
    assert_eq!(data["categoryDistribution"][0]["category"], "health");
    assert_eq!(data["categoryDistribution"].as_array().unwrap().len(), 1);
    assert_eq!(data["paymentMethods"][0]["paymentMethod"], "card");
    assert_eq!(data["successRate"][0]["status"], "pending");
    assert_eq!(data["successRate"][0]["count"], 2);

    let trend_total: i64 = data["trends"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["count"].as_i64().unwrap())
        .sum();
    assert_eq!(trend_total, 2);

    let (_, dashboard) = send(h.app(), get("/api/admin/dashboard", Some(&token))).await;
    let data = &dashboard["data"];
    assert_eq!(data["totalDonations"]["total"].as_f64(), Some(450.0));
    assert_eq!(data["totalDonations"]["count"], 3);
    assert_eq!(data["donationsByCategory"][0]["category"], "education");
    assert_eq!(data["donationsByCategory"][0]["total"].as_f64(), Some(300.0));
    assert_eq!(data["recentDonations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_time_range_defaults_to_month() {
    let h = Harness::new();
    h.seed("education", 10.0, Duration::days(20)).await;
    h.seed("education", 10.0, Duration::days(40)).await;
    let token = h.super_token().await;

    let (_, body) = send(h.app(), get("/api/admin/analytics?timeRange=decade", Some(&token))).await;
    assert_eq!(body["data"]["timeRange"], "month");
    assert_eq!(body["data"]["metrics"]["totalCount"], 1);

    let (_, body) = send(h.app(), get("/api/admin/analytics?timeRange=year", Some(&token))).await;
    assert_eq!(body["data"]["metrics"]["totalCount"], 2);
}

#[tokio::test]
async fn test_dashboard_recent_is_limited_and_zeroed_when_empty() {
    let h = Harness::new();
    let token = h.super_token().await;

    let (status, body) = send(h.app(), get("/api/admin/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalDonations"], json!({ "total": 0.0, "count": 0 }));
    assert_eq!(body["data"]["monthlyDonations"]["count"], 0);

    for i in 0..12 {
        h.seed("education", 1.0, Duration::minutes(i)).await;
    }
    let (_, body) = send(h.app(), get("/api/admin/dashboard", Some(&token))).await;
    assert_eq!(body["data"]["recentDonations"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["totalDonations"]["count"], 12);
}

#[tokio::test]
async fn test_reporting_routes_require_view_analytics() {
    let h = Harness::new();
    let clerk = h.token(AdminRole::Admin, &[Permission::ViewDonations]).await;

    for uri in ["/api/admin/dashboard", "/api/admin/analytics"] {
        let (status, _) = send(h.app(), get(uri, Some(&clerk))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {}", uri);

        let (status, _) = send(h.app(), get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_filters() {
    let h = Harness::new();
    h.seed("education", 1.0, Duration::days(30)).await;
    h.seed("education", 2.0, Duration::days(3)).await;
    h.seed("health", 3.0, Duration::days(2)).await;
    let token = h.token(AdminRole::Admin, &[Permission::ExportData]).await;

    let (status, body) = send(h.app(), get("/api/admin/export", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let start = (Utc::now() - Duration::days(10)).format("%Y-%m-%d");
    let today = Utc::now().format("%Y-%m-%d");

    let uri = format!("/api/admin/export?startDate={}&endDate={}", start, today);
    let (_, body) = send(h.app(), get(&uri, Some(&token))).await;
    assert_eq!(body["count"], 2);

    let uri = format!("/api/admin/export?startDate={}&category=education", start);
    let (_, body) = send(h.app(), get(&uri, Some(&token))).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["amount"].as_f64(), Some(2.0));
}

#[tokio::test]
async fn test_export_date_only_end_includes_last_instant_of_day() {
    let h = Harness::new();
    let last_instant = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()
        + Duration::microseconds(999_500);
    h.seed_at("education", 7.0, last_instant).await;
    h.seed_at("education", 8.0, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        .await;
    h.seed_at("education", 9.0, Utc.with_ymd_and_hms(2024, 1, 30, 23, 59, 59).unwrap())
        .await;
    let token = h.super_token().await;

    let (status, body) = send(
        h.app(),
        get("/api/admin/export?startDate=2024-01-31&endDate=2024-01-31", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["amount"].as_f64(), Some(7.0));

    let (_, body) = send(
        h.app(),
        get("/api/admin/export?endDate=2024-01-31T23:59:59Z", Some(&token)),
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["amount"].as_f64(), Some(9.0));
}

#[tokio::test]
async fn test_export_rejects_bad_dates_and_permissions() {
    let h = Harness::new();
    let exporter = h.token(AdminRole::Admin, &[Permission::ExportData]).await;
    let analyst = h.token(AdminRole::Admin, &[Permission::ViewAnalytics]).await;

    let (status, _) = send(h.app(), get("/api/admin/export?startDate=soon", Some(&exporter))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        h.app(),
        get("/api/admin/export?startDate=2024-03-01&endDate=2024-02-01", Some(&exporter)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(h.app(), get("/api/admin/export", Some(&analyst))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Login through the composed admin router
// ============================================================================

#[tokio::test]
async fn test_login_then_use_token() {
    let h = Harness::new();
    let raw = RawPassword::new("secret123".to_string()).unwrap();
    let admin = Admin::new(
        AdminName::new("ops").unwrap(),
        Email::new("ops@example.org").unwrap(),
        AdminPassword::from_raw(&raw).unwrap(),
        AdminRole::Admin,
        [Permission::ViewAnalytics].into_iter().collect(),
    );
    h.admins.create(&admin).await.unwrap();

    let (status, body) = send(
        h.app(),
        post_json(
            "/api/admin/login",
            json!({ "email": "ops@example.org", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = send(h.app(), get("/api/admin/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        h.app(),
        post_json(
            "/api/admin/login",
            json!({ "email": "ops@example.org", "password": "wrong-one" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}
