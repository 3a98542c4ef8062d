//! Donation Routers
//!
//! `donation_router*` serves `/api/donations`; `admin_router*` serves the
//! reporting half of `/api/admin` (login lives in the auth crate).
//! Protected routes stack `require_admin` outside the permission gate.

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

use auth::domain::repository::AdminRepository;
use auth::{
    AuthMiddlewareState, Permission, PgAdminRepository, RequiredPermissions, authorize,
    require_admin,
};

use crate::application::{DonationConfig, ReceiptNotifier};
use crate::domain::repository::{DonationRepository, DonationStatsRepository};
use crate::infra::mail::ConfiguredNotifier;
use crate::infra::postgres::PgDonationRepository;
use crate::presentation::handlers::{self, DonationAppState};

const VIEW_DONATIONS: RequiredPermissions = RequiredPermissions::any_of(&[Permission::ViewDonations]);
const MANAGE_DONATIONS: RequiredPermissions =
    RequiredPermissions::any_of(&[Permission::ManageDonations]);
const VIEW_ANALYTICS: RequiredPermissions = RequiredPermissions::any_of(&[Permission::ViewAnalytics]);
const EXPORT_DATA: RequiredPermissions = RequiredPermissions::any_of(&[Permission::ExportData]);

/// Create the donation router with PostgreSQL repositories
pub fn donation_router(
    repo: Arc<PgDonationRepository>,
    notifier: Arc<ConfiguredNotifier>,
    config: Arc<DonationConfig>,
    auth: AuthMiddlewareState<PgAdminRepository>,
) -> Router {
    donation_router_generic(repo, notifier, config, auth)
}

/// Create a generic donation router for any repository implementation
pub fn donation_router_generic<R, N, A>(
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<DonationConfig>,
    auth: AuthMiddlewareState<A>,
) -> Router
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    let state = DonationAppState {
        repo,
        notifier,
        config,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list::<R, N>)
                .route_layer(from_fn_with_state(VIEW_DONATIONS, authorize))
                .route_layer(from_fn_with_state(auth.clone(), require_admin::<A>))
                .post(handlers::submit::<R, N>),
        )
        .route("/total", get(handlers::total::<R, N>))
        .route("/category/{category}", get(handlers::by_category::<R, N>))
        .route("/{id}", get(handlers::get_one::<R, N>))
        .route(
            "/{id}/status",
            patch(handlers::update_status::<R, N>)
                .route_layer(from_fn_with_state(MANAGE_DONATIONS, authorize))
                .route_layer(from_fn_with_state(auth, require_admin::<A>)),
        )
        .with_state(state)
}

/// Create the admin reporting router with PostgreSQL repositories
pub fn admin_router(
    repo: Arc<PgDonationRepository>,
    notifier: Arc<ConfiguredNotifier>,
    config: Arc<DonationConfig>,
    auth: AuthMiddlewareState<PgAdminRepository>,
) -> Router {
    admin_router_generic(repo, notifier, config, auth)
}

/// Create a generic admin reporting router; every route requires a token
pub fn admin_router_generic<R, N, A>(
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<DonationConfig>,
    auth: AuthMiddlewareState<A>,
) -> Router
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    let state = DonationAppState {
        repo,
        notifier,
        config,
    };

    Router::new()
        .route(
            "/dashboard",
            get(handlers::dashboard::<R, N>)
                .route_layer(from_fn_with_state(VIEW_ANALYTICS, authorize)),
        )
        .route(
            "/analytics",
            get(handlers::analytics::<R, N>)
                .route_layer(from_fn_with_state(VIEW_ANALYTICS, authorize)),
        )
        .route(
            "/export",
            get(handlers::export::<R, N>).route_layer(from_fn_with_state(EXPORT_DATA, authorize)),
        )
        .route_layer(from_fn_with_state(auth, require_admin::<A>))
        .with_state(state)
}
