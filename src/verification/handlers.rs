use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    app_state::AppState,
    verification::{
        dtos::{
            ErrorResponse, INVALID_MODE_MESSAGE, MISSING_URL_MESSAGE, VerificarLinkRequest,
            VerificarRequest, VerificarResponse,
        },
        service::VerificationError,
    },
};

pub const ARTICLE_FAILURE_MESSAGE: &str = "Não foi possível extrair o texto do link fornecido";

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            VerificationError::Validation(message) => {
                warn!(reason = %message, "rejected verification request");
                (StatusCode::BAD_REQUEST, message)
            }
            VerificationError::Article(e) => {
                error!(error = %e, "article extraction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ARTICLE_FAILURE_MESSAGE.to_string(),
                )
            }
            VerificationError::FactCheck(e) => {
                error!(error = %e, "fact-check search failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/api/verificar",
    tag = "verification",
    request_body = VerificarRequest,
    responses(
        (status = 200, description = "Verification result", body = VerificarResponse),
        (status = 400, description = "Invalid mode or input", body = ErrorResponse),
        (status = 500, description = "Extraction or fact-check failure", body = ErrorResponse)
    )
)]
pub async fn verificar(
    State(state): State<AppState>,
    payload: Result<Json<VerificarRequest>, JsonRejection>,
) -> Result<Json<VerificarResponse>, VerificationError> {
    let Json(payload) =
        payload.map_err(|_| VerificationError::Validation(INVALID_MODE_MESSAGE.to_string()))?;
    let request = payload.validate().map_err(VerificationError::Validation)?;

    let outcome = state.verifier.verify(request).await?;
    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/api/verificar-link",
    tag = "verification",
    request_body = VerificarLinkRequest,
    responses(
        (status = 200, description = "Verification result", body = VerificarResponse),
        (status = 400, description = "Missing URL", body = ErrorResponse),
        (status = 500, description = "Extraction or fact-check failure", body = ErrorResponse)
    )
)]
pub async fn verificar_link(
    State(state): State<AppState>,
    payload: Result<Json<VerificarLinkRequest>, JsonRejection>,
) -> Result<Json<VerificarResponse>, VerificationError> {
    let Json(payload) =
        payload.map_err(|_| VerificationError::Validation(MISSING_URL_MESSAGE.to_string()))?;
    let request = payload.validate().map_err(VerificationError::Validation)?;

    let outcome = state.verifier.verify(request).await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classifier::{MockToxicityClassifier, ToxicityScores},
        factcheck::{ClaimReview, FactCheckError, MockFactCheckSearch},
        verification::{Verifier, dtos::AMBIGUOUS_INPUT_MESSAGE},
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, header::CONTENT_TYPE},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app(
        classifier: MockToxicityClassifier,
        fact_checks: MockFactCheckSearch,
    ) -> Router {
        let state = AppState::new(Verifier::new(
            Arc::new(classifier),
            Arc::new(fact_checks),
            "pt-BR",
        ));

        Router::new()
            .route("/api/verificar", post(verificar))
            .route("/api/verificar-link", post(verificar_link))
            .with_state(state)
    }

    fn idle_app() -> Router {
        let mut classifier = MockToxicityClassifier::new();
        classifier.expect_classify().never();
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks.expect_search().never();
        create_test_app(classifier, fact_checks)
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_text_mode_returns_analysis_and_fact_checks() {
        let mut classifier = MockToxicityClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_| Ok(ToxicityScores::default()));
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks.expect_search().times(1).returning(|_, _| {
            Ok(vec![ClaimReview {
                claim_text: "Vacina altera DNA".to_string(),
                claimant: "Redes sociais".to_string(),
                publisher_name: "Aos Fatos".to_string(),
                textual_rating: "Falso".to_string(),
                review_url: "https://aosfatos.org/1".to_string(),
            }])
        });
        let app = create_test_app(classifier, fact_checks);

        let body = json!({ "texto": "Vacina altera DNA", "modo": "texto", "cidade": "Recife" });
        let response = app
            .oneshot(post_json("/api/verificar", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sucesso"], true);
        assert_eq!(body["dados"]["analiseIA"]["porcentagemVerdade"], 100);
        assert_eq!(body["dados"]["analiseIA"]["veredito"], "VERDADEIRA");
        assert_eq!(body["dados"]["analiseIA"]["textoAnalisado"], "Vacina altera DNA");
        assert_eq!(body["dados"]["factChecks"]["encontrados"], true);
        assert_eq!(body["dados"]["factChecks"]["quantidade"], 1);
        assert_eq!(body["dados"]["texto"]["conteudo"], "Vacina altera DNA");
        assert!(body["dados"]["texto"].get("titulo").is_none());
    }

    #[tokio::test]
    async fn test_both_inputs_rejected() {
        let body = json!({ "texto": "a", "link": "https://example.com", "modo": "texto" });
        let response = idle_app()
            .oneshot(post_json("/api/verificar", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["sucesso"], false);
        assert_eq!(body["erro"], AMBIGUOUS_INPUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_input_rejected() {
        let response = idle_app()
            .oneshot(post_json("/api/verificar", json!({ "modo": "texto" }).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["erro"], INVALID_MODE_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let response = idle_app()
            .oneshot(post_json("/api/verificar", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["sucesso"], false);
    }

    #[tokio::test]
    async fn test_link_endpoint_requires_url() {
        let response = idle_app()
            .oneshot(post_json("/api/verificar-link", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["erro"], MISSING_URL_MESSAGE);
    }

    #[tokio::test]
    async fn test_unfetchable_link_hides_details() {
        let response = idle_app()
            .oneshot(post_json(
                "/api/verificar-link",
                json!({ "url": "ftp://example.com/file" }).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["erro"], ARTICLE_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fact_check_failure_is_500_with_upstream_message() {
        let mut classifier = MockToxicityClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Ok(ToxicityScores::default()));
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks.expect_search().returning(|_, _| {
            Err(FactCheckError::Upstream {
                status: reqwest::StatusCode::FORBIDDEN,
                body: "API key not valid".to_string(),
            })
        });
        let app = create_test_app(classifier, fact_checks);

        let body = json!({ "texto": "Notícia", "modo": "texto" });
        let response = app
            .oneshot(post_json("/api/verificar", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["sucesso"], false);
        let message = body["erro"].as_str().unwrap();
        assert!(message.contains("403"));
        assert!(message.contains("API key not valid"));
        assert!(body.get("dados").is_none());
    }
}
