use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::system_dto::{HealthResponse, HelloResponse},
    error::Result,
    utils::time::now,
    AppState,
};

pub const SERVICE_NAME: &str = "devfest-backend";

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "system",
    responses(
        (status = 200, description = "Greeting read from the seed table", body = HelloResponse),
        (status = 500, description = "Database unavailable")
    )
)]
#[axum::debug_handler]
pub async fn hello(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let message = state.greeting_service.message().await?;
    Ok(Json(HelloResponse {
        message,
        source: "database".to_string(),
        timestamp: now(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".to_string(),
        timestamp: now(),
        service: SERVICE_NAME.to_string(),
    };
    (StatusCode::OK, Json(body))
}
