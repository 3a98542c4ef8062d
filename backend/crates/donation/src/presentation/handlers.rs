//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::envelope::ApiResponse;
use std::sync::Arc;

use auth::CurrentAdmin;

use crate::application::{
    AnalyticsUseCase, DashboardUseCase, DonationConfig, DonationsByCategoryUseCase,
    ExportDonationsUseCase, GetDonationUseCase, ListDonationsUseCase, ReceiptNotifier,
    SubmitDonationUseCase, TotalDonationsUseCase, UpdateDonationStatusUseCase,
};
use crate::domain::repository::{DonationRepository, DonationStatsRepository};
use crate::domain::value_object::{page::PageRequest, time_range::TimeRange};
use crate::error::{DonationError, DonationResult};
use crate::presentation::dto::{
    AnalyticsQuery, AnalyticsView, DashboardView, DonationView, ExportQuery, ListQuery,
    SubmitDonationRequest, TotalView, UpdateStatusRequest, donation_views,
};

/// Shared state for donation handlers
pub struct DonationAppState<R, N>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<DonationConfig>,
}

impl<R, N> Clone for DonationAppState<R, N>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> DonationResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| DonationError::Validation(rejection.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> DonationResult<T> {
    params
        .map(|Query(q)| q)
        .map_err(|rejection| DonationError::Validation(rejection.body_text()))
}

// ============================================================================
// Public donation routes
// ============================================================================

/// POST /api/donations
pub async fn submit<R, N>(
    State(state): State<DonationAppState<R, N>>,
    payload: Result<Json<SubmitDonationRequest>, JsonRejection>,
) -> DonationResult<(StatusCode, Json<ApiResponse<DonationView>>)>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = SubmitDonationUseCase::new(state.repo.clone(), state.notifier.clone());
    let donation = use_case.execute(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(DonationView::from(&donation))
                .with_message("Donation created successfully"),
        ),
    ))
}

/// GET /api/donations/{id}
pub async fn get_one<R, N>(
    State(state): State<DonationAppState<R, N>>,
    Path(id): Path<String>,
) -> DonationResult<Json<ApiResponse<DonationView>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let donation = GetDonationUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(Json(ApiResponse::ok(DonationView::from(&donation))))
}

/// GET /api/donations/category/{category}
pub async fn by_category<R, N>(
    State(state): State<DonationAppState<R, N>>,
    Path(category): Path<String>,
) -> DonationResult<Json<ApiResponse<Vec<DonationView>>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let donations = DonationsByCategoryUseCase::new(state.repo.clone())
        .execute(&category)
        .await?;

    Ok(Json(ApiResponse::list(donation_views(&donations))))
}

/// GET /api/donations/total
pub async fn total<R, N>(
    State(state): State<DonationAppState<R, N>>,
) -> DonationResult<Json<ApiResponse<TotalView>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let total = TotalDonationsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(ApiResponse::ok(TotalView::from(total))))
}

// ============================================================================
// Admin donation routes
// ============================================================================

/// GET /api/donations
pub async fn list<R, N>(
    State(state): State<DonationAppState<R, N>>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> DonationResult<Json<ApiResponse<Vec<DonationView>>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let params = query(params)?;
    let page = PageRequest::from_query(params.page, params.limit, state.config.max_page_limit);

    let donations = ListDonationsUseCase::new(state.repo.clone())
        .execute(page)
        .await?;

    Ok(Json(ApiResponse::list(donation_views(&donations))))
}

/// PATCH /api/donations/{id}/status
pub async fn update_status<R, N>(
    State(state): State<DonationAppState<R, N>>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> DonationResult<Json<ApiResponse<DonationView>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let req = json_body(payload)?;

    let donation = UpdateDonationStatusUseCase::new(state.repo.clone())
        .execute(&id, &req.status)
        .await?;

    tracing::info!(admin_id = %admin.admin_id, donation_id = %donation.donation_id, "Status change by admin");

    Ok(Json(
        ApiResponse::ok(DonationView::from(&donation)).with_message("Donation status updated"),
    ))
}

/// GET /api/admin/dashboard
pub async fn dashboard<R, N>(
    State(state): State<DonationAppState<R, N>>,
) -> DonationResult<Json<ApiResponse<DashboardView>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let output = DashboardUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;

    Ok(Json(ApiResponse::ok(DashboardView::from(output))))
}

/// GET /api/admin/analytics?timeRange=
pub async fn analytics<R, N>(
    State(state): State<DonationAppState<R, N>>,
    params: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> DonationResult<Json<ApiResponse<AnalyticsView>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let params = query(params)?;
    let time_range = TimeRange::parse(params.time_range.as_deref());

    let output = AnalyticsUseCase::new(state.repo.clone())
        .execute(time_range)
        .await?;

    Ok(Json(ApiResponse::ok(AnalyticsView::from(output))))
}

/// GET /api/admin/export?startDate&endDate&category
pub async fn export<R, N>(
    State(state): State<DonationAppState<R, N>>,
    params: Result<Query<ExportQuery>, QueryRejection>,
) -> DonationResult<Json<ApiResponse<Vec<DonationView>>>>
where
    R: DonationRepository + DonationStatsRepository + Send + Sync + 'static,
    N: ReceiptNotifier + Sync + 'static,
{
    let params = query(params)?;

    let donations = ExportDonationsUseCase::new(state.repo.clone())
        .execute(params.into())
        .await?;

    Ok(Json(ApiResponse::list(donation_views(&donations))))
}
