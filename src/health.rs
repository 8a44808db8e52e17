use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::app_state::AppState;

const CONFIGURED: &str = "configured";
const NOT_CONFIGURED: &str = "not configured";

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    mensagem: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    classifier: String,
    fact_check: String,
}

fn describe(configured: bool) -> String {
    if configured { CONFIGURED } else { NOT_CONFIGURED }.to_string()
}

#[utoipa::path(
    get,
    path = "/teste",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = PingResponse)
    )
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        mensagem: "Servidor funcionando! ✅".to_string(),
    })
}

/// Readiness summary. Always 200: missing collaborators degrade requests,
/// they don't take the service down.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = state.verifier.classifier_configured();
    let fact_check = state.verifier.fact_check_configured();
    debug!(classifier, fact_check, "health check");

    Json(HealthResponse {
        status: "OK".to_string(),
        classifier: describe(classifier),
        fact_check: describe(fact_check),
    })
}
