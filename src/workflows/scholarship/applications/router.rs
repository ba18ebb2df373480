use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AdminAction, AdminIdentity, ApplicationNumber, ApplicationSubmission};
use super::repository::{
    ApplicationRepository, DocumentStore, NotificationGateway, RepositoryError,
};
use super::service::{ApplicationServiceError, ScholarshipApplicationService};
use super::transitions::TransitionError;

/// Router builder exposing the submission, lookup, and review endpoints.
pub fn application_router<R, N, S>(
    service: Arc<ScholarshipApplicationService<R, N, S>>,
) -> Router
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/scholarship/applications",
            post(submit_handler::<R, N, S>).get(pending_handler::<R, N, S>),
        )
        .route(
            "/api/v1/scholarship/applications/:application_number",
            get(status_handler::<R, N, S>),
        )
        .route(
            "/api/v1/scholarship/applications/:application_number/status",
            post(transition_handler::<R, N, S>),
        )
        .route(
            "/api/v1/scholarship/applications/:application_number/resubmit",
            post(resubmit_handler::<R, N, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub action: AdminAction,
    pub admin: AdminIdentity,
    #[serde(default)]
    pub remark: Option<String>,
    pub expected_version: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResubmitRequest {
    pub submission: ApplicationSubmission,
    pub expected_version: u64,
}

#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    #[serde(default = "default_pending_limit")]
    pub limit: usize,
}

fn default_pending_limit() -> usize {
    50
}

pub(crate) async fn submit_handler<R, N, S>(
    State(service): State<Arc<ScholarshipApplicationService<R, N, S>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, N, S>(
    State(service): State<Arc<ScholarshipApplicationService<R, N, S>>>,
    Path(application_number): Path<u64>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    match service.get(ApplicationNumber(application_number)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pending_handler<R, N, S>(
    State(service): State<Arc<ScholarshipApplicationService<R, N, S>>>,
    Query(query): Query<PendingQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    match service.pending(query.limit) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transition_handler<R, N, S>(
    State(service): State<Arc<ScholarshipApplicationService<R, N, S>>>,
    Path(application_number): Path<u64>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    match service.transition(
        ApplicationNumber(application_number),
        request.action,
        &request.admin,
        request.remark,
        request.expected_version,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn resubmit_handler<R, N, S>(
    State(service): State<Arc<ScholarshipApplicationService<R, N, S>>>,
    Path(application_number): Path<u64>,
    axum::Json(request): axum::Json<ResubmitRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    match service.resubmit(
        ApplicationNumber(application_number),
        request.submission,
        request.expected_version,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    match error {
        ApplicationServiceError::Validation(report) => {
            let payload = json!({ "errors": report.sections });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ApplicationServiceError::Transition(TransitionError::NotAuthorized) => {
            let payload = json!({ "error": "caller is not an administrator" });
            (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
        }
        ApplicationServiceError::Transition(illegal @ TransitionError::Illegal { .. }) => {
            let payload = json!({ "error": illegal.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        ApplicationServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ApplicationServiceError::Repository(conflict @ RepositoryError::VersionConflict { .. }) => {
            let payload = json!({ "error": conflict.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        closed @ ApplicationServiceError::ResubmitClosed { .. } => {
            let payload = json!({ "error": closed.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
