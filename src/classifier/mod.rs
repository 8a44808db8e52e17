//! Toxicity classifier seam.
//!
//! The model itself runs elsewhere; this crate only needs four probabilities
//! per text. One handle is built at startup and shared read-only by every
//! request.

pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;

pub use http::HttpClassifier;

/// Probability that the text carries each attribute, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ToxicityScores {
    pub toxicity: f64,
    pub severe_toxicity: f64,
    pub threat: f64,
    pub insult: f64,
}

impl ToxicityScores {
    pub fn new(toxicity: f64, severe_toxicity: f64, threat: f64, insult: f64) -> Self {
        Self {
            toxicity,
            severe_toxicity,
            threat,
            insult,
        }
    }

    /// Clamp into `[0, 1]`; NaN counts as 0.
    pub fn sanitized(self) -> Self {
        fn unit(p: f64) -> f64 {
            if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
        }
        Self {
            toxicity: unit(self.toxicity),
            severe_toxicity: unit(self.severe_toxicity),
            threat: unit(self.threat),
            insult: unit(self.insult),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("toxicity classifier is not configured")]
    NotConfigured,

    #[error("classifier request timed out")]
    Timeout,

    #[error("classifier unreachable: {0}")]
    Transport(String),

    #[error("classifier returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed classifier response: {0}")]
    Decode(String),

    #[error("classifier response has no '{0}' prediction")]
    MissingLabel(&'static str),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ToxicityScores, ClassifierError>;

    /// Whether an inference backend is wired in at all.
    fn is_configured(&self) -> bool;
}

/// Stand-in used when no classifier endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredClassifier;

#[async_trait]
impl ToxicityClassifier for UnconfiguredClassifier {
    async fn classify(&self, _text: &str) -> Result<ToxicityScores, ClassifierError> {
        Err(ClassifierError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Build the process-wide classifier handle from configuration.
pub fn from_config(config: &Config) -> Result<Arc<dyn ToxicityClassifier>, reqwest::Error> {
    let classifier: Arc<dyn ToxicityClassifier> = match config.classifier_url() {
        Some(url) => Arc::new(HttpClassifier::new(url, config.classifier_timeout())?),
        None => Arc::new(UnconfiguredClassifier),
    };
    Ok(classifier)
}
