pub mod applications;
pub mod extract;
pub mod health;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    dto::system_dto::{HealthResponse, HelloResponse},
    error::Result,
    middleware::cors::cors_layer,
    models::application::{Application, ApplicationStats, ApplicationStatus, StatusCounts},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::hello,
        health::health,
        applications::create_application,
        applications::list_applications,
        applications::get_application,
        applications::update_application,
        applications::get_stats,
    ),
    components(schemas(
        Application,
        ApplicationStatus,
        ApplicationStats,
        StatusCounts,
        CreateApplicationPayload,
        UpdateApplicationPayload,
        HelloResponse,
        HealthResponse,
    )),
    tags(
        (name = "applications", description = "Candidate applications and their review status"),
        (name = "system", description = "Greeting and liveness")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full HTTP surface: API routes, the OpenAPI document, and the static
/// client when one is configured.
pub fn build_router(state: AppState) -> Result<Router> {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/api/hello", get(health::hello))
        .route("/api/health", get(health::health))
        .route(
            "/api/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/api/applications/stats/summary",
            get(applications::get_stats),
        )
        .route(
            "/api/applications/:id",
            get(applications::get_application).put(applications::update_application),
        )
        .route("/api/openapi.json", get(openapi_json));

    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving client from: {}", dir.display());
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    Ok(app
        .with_state(state)
        .layer(cors_layer(&config.cors)?)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)))
}
