use axum::{Router, body::Body, http::Request};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, info_span};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, health, verification::handlers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "verifica",
        description = "Credibility analysis and fact-check lookup for news texts and links"
    ),
    tags(
        (name = "verification", description = "Text and link verification"),
        (name = "health", description = "Liveness and readiness")
    )
)]
struct ApiDoc;

/// Build the application router.
///
/// `static_dir` is served as the fallback when given and present on disk.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::verificar))
        .routes(routes!(handlers::verificar_link))
        .routes(routes!(health::ping))
        .routes(routes!(health::health_check))
        .with_state(state)
        .split_for_parts();

    let mut router = router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api));

    if let Some(dir) = static_dir
        && dir.is_dir()
    {
        info!(dir = %dir.display(), "serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
