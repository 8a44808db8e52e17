use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use verifica::{
    app_state::AppState,
    classifier,
    config::Config,
    factcheck::FactCheckClient,
    routes,
    verification::Verifier,
};

pub const CLASSIFIER_PATH: &str = "/classify";
pub const SEARCH_PATH: &str = "/v1alpha1/claims:search";
pub const API_KEY: &str = "test-key";

/// Router wired to real HTTP clients pointed at `upstream`.
pub fn test_app(upstream: &MockServer) -> Router {
    let config = Config::default()
        .with_fact_check(upstream.uri(), API_KEY)
        .with_classifier(format!("{}{}", upstream.uri(), CLASSIFIER_PATH));

    let classifier = classifier::from_config(&config).unwrap();
    let fact_checks = FactCheckClient::from_config(&config).unwrap();
    let verifier = Verifier::new(
        classifier,
        Arc::new(fact_checks),
        config.fact_check_language(),
    );

    routes::router(AppState::new(verifier), None)
}

fn prediction(label: &str, p: f64) -> Value {
    json!({ "label": label, "results": [{ "probabilities": [1.0 - p, p], "match": p > 0.9 }] })
}

pub async fn mount_classifier(server: &MockServer, toxicity: f64) {
    Mock::given(method("POST"))
        .and(path(CLASSIFIER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            prediction("toxicity", toxicity),
            prediction("severe_toxicity", 0.0),
            prediction("threat", 0.0),
            prediction("insult", 0.0),
        ])))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}
