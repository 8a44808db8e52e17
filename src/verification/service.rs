use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::classifier::ToxicityClassifier;
use crate::extractor::{self, ArticleError};
use crate::factcheck::{ClaimReview, FactCheckError, FactCheckSearch};
use crate::language;
use crate::scorer::{self, CredibilityAnalysis};

const TEXT_PREVIEW_CHARS: usize = 100;
const CONTENT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationInput {
    Text(String),
    Link(String),
}

/// A validated verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub input: VerificationInput,
    /// Advisory only; logged, never scored.
    pub city: Option<String>,
    pub category: Option<String>,
}

/// What the reader submitted, echoed back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EchoedText {
    Text { content: String },
    Article { title: String, content_preview: String },
}

#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub id: Uuid,
    pub analysis: CredibilityAnalysis,
    pub claim_reviews: Vec<ClaimReview>,
    pub language: Option<&'static str>,
    pub analyzed_text_preview: String,
    pub echoed: EchoedText,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Article(#[from] ArticleError),

    #[error(transparent)]
    FactCheck(#[from] FactCheckError),
}

/// Runs one verification: extraction (link mode), scoring and claim search.
pub struct Verifier {
    classifier: Arc<dyn ToxicityClassifier>,
    fact_checks: Arc<dyn FactCheckSearch>,
    default_language: String,
}

/// First `max_chars` characters of `text`; `ellipsis` is appended only when
/// something was cut.
pub fn preview(text: &str, max_chars: usize, ellipsis: bool) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) if ellipsis => format!("{}...", &text[..cut]),
        Some((cut, _)) => text[..cut].to_string(),
    }
}

impl Verifier {
    pub fn new(
        classifier: Arc<dyn ToxicityClassifier>,
        fact_checks: Arc<dyn FactCheckSearch>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            fact_checks,
            default_language: default_language.into(),
        }
    }

    pub fn classifier_configured(&self) -> bool {
        self.classifier.is_configured()
    }

    pub fn fact_check_configured(&self) -> bool {
        self.fact_checks.is_configured()
    }

    pub async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError> {
        let id = Uuid::new_v4();
        let mode = match request.input {
            VerificationInput::Text(_) => "texto",
            VerificationInput::Link(_) => "link",
        };
        let span = info_span!(
            "verification",
            %id,
            mode,
            city = request.city.as_deref().unwrap_or("-"),
            category = request.category.as_deref().unwrap_or("-"),
        );

        self.run(id, request.input).instrument(span).await
    }

    async fn run(
        &self,
        id: Uuid,
        input: VerificationInput,
    ) -> Result<VerificationOutcome, VerificationError> {
        let (text, analyzed_text_preview, echoed) = match input {
            VerificationInput::Link(url) => {
                info!(url = %url, "verifying link");
                let article = extractor::fetch_article(&url).await?;
                (
                    article.analysis_text(),
                    article.title.clone(),
                    EchoedText::Article {
                        content_preview: preview(&article.content, CONTENT_PREVIEW_CHARS, true),
                        title: article.title,
                    },
                )
            }
            VerificationInput::Text(text) => {
                info!(chars = text.chars().count(), "verifying text");
                let text_preview = preview(&text, TEXT_PREVIEW_CHARS, false);
                (
                    text.clone(),
                    text_preview,
                    EchoedText::Text { content: text },
                )
            }
        };

        let detected = language::detect_language(&text);
        let search_language = language::resolve_search_language(detected, &self.default_language);

        let (analysis, claim_reviews) = tokio::join!(
            scorer::analyze(self.classifier.as_ref(), &text),
            self.fact_checks.search(&text, &search_language),
        );
        let claim_reviews = claim_reviews?;

        info!(
            credibility = analysis.credibility_score,
            sensationalism = analysis.sensationalism_score,
            objectivity = analysis.objectivity_score,
            classifier_available = analysis.available,
            claim_reviews = claim_reviews.len(),
            language = detected.unwrap_or("-"),
            "verification completed"
        );

        Ok(VerificationOutcome {
            id,
            analysis,
            claim_reviews,
            language: detected,
            analyzed_text_preview,
            echoed,
            analyzed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierError, MockToxicityClassifier, ToxicityScores};
    use crate::factcheck::MockFactCheckSearch;
    use mockall::predicate::{always, eq};

    const PT_TEXT: &str = "Segundo o Ministério da Saúde, a pesquisa nacional confirma dados sobre a vacinação em todo o país.";

    fn classifier_ok() -> MockToxicityClassifier {
        let mut classifier = MockToxicityClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Ok(ToxicityScores::default()));
        classifier
    }

    fn review() -> ClaimReview {
        ClaimReview {
            claim_text: "Vacina altera DNA".to_string(),
            claimant: "Redes sociais".to_string(),
            publisher_name: "Aos Fatos".to_string(),
            textual_rating: "Falso".to_string(),
            review_url: "https://aosfatos.org/1".to_string(),
        }
    }

    fn text_request(text: &str) -> VerificationRequest {
        VerificationRequest {
            input: VerificationInput::Text(text.to_string()),
            city: Some("Recife".to_string()),
            category: None,
        }
    }

    #[test]
    fn preview_counts_characters() {
        assert_eq!(preview("ação", 2, false), "aç");
        assert_eq!(preview("ação", 2, true), "aç...");
        assert_eq!(preview("ação", 10, true), "ação");
    }

    #[tokio::test]
    async fn text_mode_combines_analysis_and_reviews() {
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks
            .expect_search()
            .with(eq(PT_TEXT), eq("pt-BR"))
            .times(1)
            .returning(|_, _| Ok(vec![review()]));

        let verifier = Verifier::new(Arc::new(classifier_ok()), Arc::new(fact_checks), "pt-BR");
        let outcome = verifier.verify(text_request(PT_TEXT)).await.unwrap();

        assert!(outcome.analysis.available);
        assert_eq!(outcome.claim_reviews, vec![review()]);
        assert_eq!(outcome.language, Some("pt"));
        assert_eq!(outcome.analyzed_text_preview, preview(PT_TEXT, 100, false));
        assert_eq!(
            outcome.echoed,
            EchoedText::Text {
                content: PT_TEXT.to_string()
            }
        );
    }

    #[tokio::test]
    async fn classifier_failure_degrades_to_unavailable_analysis() {
        let mut classifier = MockToxicityClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Err(ClassifierError::Transport("connection refused".to_string())));
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks.expect_search().returning(|_, _| Ok(vec![]));

        let verifier = Verifier::new(Arc::new(classifier), Arc::new(fact_checks), "pt-BR");
        let outcome = verifier.verify(text_request(PT_TEXT)).await.unwrap();

        assert_eq!(outcome.analysis, CredibilityAnalysis::unavailable());
        assert!(outcome.claim_reviews.is_empty());
    }

    #[tokio::test]
    async fn fact_check_failure_fails_the_whole_request() {
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks
            .expect_search()
            .with(always(), always())
            .returning(|_, _| Err(FactCheckError::NotConfigured));

        let verifier = Verifier::new(Arc::new(classifier_ok()), Arc::new(fact_checks), "pt-BR");
        let result = verifier.verify(text_request("Notícia qualquer")).await;

        assert!(matches!(
            result,
            Err(VerificationError::FactCheck(FactCheckError::NotConfigured))
        ));
    }

    #[tokio::test]
    async fn unreachable_link_is_an_article_error() {
        let mut fact_checks = MockFactCheckSearch::new();
        fact_checks.expect_search().never();
        let mut classifier = MockToxicityClassifier::new();
        classifier.expect_classify().never();

        let verifier = Verifier::new(Arc::new(classifier), Arc::new(fact_checks), "pt-BR");
        let result = verifier
            .verify(VerificationRequest {
                input: VerificationInput::Link("not a url".to_string()),
                city: None,
                category: None,
            })
            .await;

        assert!(matches!(result, Err(VerificationError::Article(_))));
    }
}
