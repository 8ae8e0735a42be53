use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::extract::ApiJson;
use crate::{
    dto::application_dto::{
        ApplicationListQuery, CreateApplicationPayload, UpdateApplicationPayload,
    },
    error::Result,
    models::application::{Application, ApplicationStats},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "A required field is missing or has the wrong type")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    params(
        ("email" = Option<String>, Query, description = "Only applications submitted with this email")
    ),
    responses(
        (status = 200, description = "Applications, newest first", body = [Application])
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = match query.email_filter() {
        Some(email) => state.application_service.list_by_email(email).await?,
        None => state.application_service.list_all().await?,
    };
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "applications",
    params(
        ("id" = i32, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    tag = "applications",
    params(
        ("id" = i32, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = Application),
        (status = 400, description = "Unknown status or malformed body"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Status change not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update(id, payload.into())
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/applications/stats/summary",
    tag = "applications",
    responses(
        (status = 200, description = "Application counts per status", body = ApplicationStats)
    )
)]
#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.application_service.stats().await?;
    Ok(Json(stats))
}
