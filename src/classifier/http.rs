use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::classifier::{ClassifierError, ToxicityClassifier, ToxicityScores};

const LABEL_TOXICITY: &str = "toxicity";
const LABEL_SEVERE_TOXICITY: &str = "severe_toxicity";
const LABEL_THREAT: &str = "threat";
const LABEL_INSULT: &str = "insult";

/// Client for a toxicity model served over HTTP.
///
/// Sends `{"sentences": [text]}` and expects the model's prediction list,
/// either bare or wrapped as `{"predictions": [...]}`:
/// `[{"label": "insult", "results": [{"probabilities": [0.97, 0.03], "match": false}]}]`.
/// `probabilities[1]` is the probability that the attribute applies.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    sentences: [&'a str; 1],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Wrapped { predictions: Vec<Prediction> },
    Bare(Vec<Prediction>),
}

#[derive(Deserialize)]
struct Prediction {
    label: String,
    results: Vec<PredictionResult>,
}

#[derive(Deserialize)]
struct PredictionResult {
    probabilities: Vec<f64>,
}

impl HttpClassifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = ClientBuilder::new()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn probability(predictions: &[Prediction], label: &'static str) -> Result<f64, ClassifierError> {
    predictions
        .iter()
        .find(|p| p.label == label)
        .and_then(|p| p.results.first())
        .and_then(|r| r.probabilities.get(1))
        .copied()
        .ok_or(ClassifierError::MissingLabel(label))
}

#[async_trait]
impl ToxicityClassifier for HttpClassifier {
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    async fn classify(&self, text: &str) -> Result<ToxicityScores, ClassifierError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { sentences: [text] })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        let predictions = match response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| ClassifierError::Decode(e.to_string()))?
        {
            ClassifyResponse::Wrapped { predictions } | ClassifyResponse::Bare(predictions) => {
                predictions
            }
        };

        let scores = ToxicityScores::new(
            probability(&predictions, LABEL_TOXICITY)?,
            probability(&predictions, LABEL_SEVERE_TOXICITY)?,
            probability(&predictions, LABEL_THREAT)?,
            probability(&predictions, LABEL_INSULT)?,
        )
        .sanitized();

        debug!(?scores, "classifier responded");
        Ok(scores)
    }

    fn is_configured(&self) -> bool {
        true
    }
}
