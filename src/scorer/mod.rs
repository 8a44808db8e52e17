//! Rule-based credibility scoring.
//!
//! Combines classifier probabilities with keyword matches and a few
//! structural bonuses into three 0–100 scores. Deterministic and free of I/O;
//! [`analyze`] is the only entry point that touches the classifier.

pub mod patterns;
pub mod structure;

use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::classifier::{ToxicityClassifier, ToxicityScores};
use patterns::CategoryMatch;
use structure::TextStructure;

const NEUTRAL_SCORE: u8 = 50;
const MAX_INDICATORS: usize = 3;
const SENSATIONALISM_FACTOR: f64 = 1.5;
const OBJECTIVITY_FACTOR: f64 = 0.5;

pub const ASPECT_CREDIBILITY: &str = "Confiabilidade";
pub const ASPECT_SENSATIONALISM: &str = "Sensacionalismo";
pub const ASPECT_OBJECTIVITY: &str = "Objetividade";

const EXPLAIN_HIGH_CREDIBILITY: &str =
    "Alto nível de credibilidade devido à presença de fontes oficiais e dados verificáveis";
const EXPLAIN_LOW_CREDIBILITY: &str =
    "Baixa credibilidade devido a elementos sensacionalistas e falta de fontes verificáveis";
const EXPLAIN_SENSATIONAL: &str = "Presença significativa de linguagem sensacionalista";
const EXPLAIN_OBJECTIVE: &str = "Apresentação objetiva dos fatos com dados e fontes";
const EXPLAIN_NOT_OBJECTIVE: &str = "Carência de objetividade na apresentação das informações";
const EXPLAIN_UNAVAILABLE: &str =
    "Análise automática indisponível no momento; pontuações neutras exibidas";

/// Coarse reading of the credibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Verdict {
    #[serde(rename = "VERDADEIRA")]
    LikelyTrue,
    #[serde(rename = "INCONCLUSIVO")]
    Inconclusive,
    #[serde(rename = "FALSA")]
    LikelyFalse,
    #[serde(rename = "INDISPONIVEL")]
    Unavailable,
}

impl Verdict {
    pub fn from_credibility(score: u8) -> Self {
        match score {
            70.. => Self::LikelyTrue,
            40..=69 => Self::Inconclusive,
            _ => Self::LikelyFalse,
        }
    }
}

/// One row of the per-aspect breakdown shown to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AspectDetail {
    pub aspect: String,
    pub probability: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CredibilityAnalysis {
    pub credibility_score: u8,
    pub sensationalism_score: u8,
    pub objectivity_score: u8,
    pub verdict: Verdict,
    /// False when the classifier could not be consulted and the scores are
    /// the neutral placeholder.
    pub available: bool,
    pub details: Vec<AspectDetail>,
}

impl CredibilityAnalysis {
    /// Neutral 50/50/50 placeholder used when the classifier is unavailable.
    pub fn unavailable() -> Self {
        Self {
            credibility_score: NEUTRAL_SCORE,
            sensationalism_score: NEUTRAL_SCORE,
            objectivity_score: NEUTRAL_SCORE,
            verdict: Verdict::Unavailable,
            available: false,
            details: vec![
                AspectDetail {
                    aspect: ASPECT_CREDIBILITY.to_string(),
                    probability: NEUTRAL_SCORE,
                    explanation: Some(EXPLAIN_UNAVAILABLE.to_string()),
                    indicators: None,
                },
                AspectDetail {
                    aspect: ASPECT_SENSATIONALISM.to_string(),
                    probability: NEUTRAL_SCORE,
                    explanation: None,
                    indicators: None,
                },
                AspectDetail {
                    aspect: ASPECT_OBJECTIVITY.to_string(),
                    probability: NEUTRAL_SCORE,
                    explanation: None,
                    indicators: None,
                },
            ],
        }
    }
}

/// Classify `text` and score it; falls back to [`CredibilityAnalysis::unavailable`]
/// when the classifier fails.
pub async fn analyze(classifier: &dyn ToxicityClassifier, text: &str) -> CredibilityAnalysis {
    match classifier.classify(text).await {
        Ok(toxicity) => score(text, &toxicity),
        Err(e) => {
            warn!(error = %e, "toxicity classifier unavailable; using neutral scores");
            CredibilityAnalysis::unavailable()
        }
    }
}

fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

fn indicators(matches: &[CategoryMatch]) -> String {
    matches
        .iter()
        .flat_map(|m| m.phrases.iter().copied())
        .take(MAX_INDICATORS)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Score `text` given the classifier's view of it.
pub fn score(text: &str, toxicity: &ToxicityScores) -> CredibilityAnalysis {
    let toxicity = toxicity.sanitized();

    let mut credibility = ((1.0 - toxicity.toxicity) + (1.0 - toxicity.severe_toxicity)) / 2.0 * 100.0;
    let mut objectivity = ((1.0 - toxicity.threat) + (1.0 - toxicity.insult)) / 2.0 * 100.0;
    let mut sensationalism = 0.0;

    let warnings = patterns::warning_matches(text);
    for category in &warnings {
        let impact = category.impact();
        credibility -= impact;
        objectivity -= impact;
        sensationalism += impact * SENSATIONALISM_FACTOR;
    }

    let reliability = patterns::reliability_matches(text);
    for category in &reliability {
        let impact = category.impact();
        credibility += impact;
        objectivity += impact * OBJECTIVITY_FACTOR;
    }

    let structure = TextStructure::of(text);
    credibility += structure.bonus();

    let credibility_score = to_score(credibility);
    let sensationalism_score = to_score(sensationalism);
    let objectivity_score = to_score(objectivity);

    debug!(
        ?toxicity,
        ?structure,
        warnings = ?warnings.iter().filter(|m| !m.phrases.is_empty()).collect::<Vec<_>>(),
        reliability = ?reliability.iter().filter(|m| !m.phrases.is_empty()).collect::<Vec<_>>(),
        credibility_score,
        sensationalism_score,
        objectivity_score,
        "text scored"
    );

    let mut explanations = Vec::new();
    if credibility_score >= 80 {
        explanations.push(EXPLAIN_HIGH_CREDIBILITY);
    } else if credibility_score <= 40 {
        explanations.push(EXPLAIN_LOW_CREDIBILITY);
    }
    if sensationalism_score >= 70 {
        explanations.push(EXPLAIN_SENSATIONAL);
    }
    if objectivity_score >= 80 {
        explanations.push(EXPLAIN_OBJECTIVE);
    } else if objectivity_score <= 40 {
        explanations.push(EXPLAIN_NOT_OBJECTIVE);
    }

    CredibilityAnalysis {
        credibility_score,
        sensationalism_score,
        objectivity_score,
        verdict: Verdict::from_credibility(credibility_score),
        available: true,
        details: vec![
            AspectDetail {
                aspect: ASPECT_CREDIBILITY.to_string(),
                probability: credibility_score,
                explanation: Some(explanations.join(". ")),
                indicators: None,
            },
            AspectDetail {
                aspect: ASPECT_SENSATIONALISM.to_string(),
                probability: sensationalism_score,
                explanation: None,
                indicators: Some(indicators(&warnings)),
            },
            AspectDetail {
                aspect: ASPECT_OBJECTIVITY.to_string(),
                probability: objectivity_score,
                explanation: None,
                indicators: Some(indicators(&reliability)),
            },
        ],
    }
}
