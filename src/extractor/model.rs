use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Title and body text pulled out of a fetched page. Lives for one request.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedArticle {
    pub url: Url,
    pub title: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

impl ExtractedArticle {
    /// Text handed to the scorer and the claim search.
    pub fn analysis_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }
}

/// Collapse every whitespace run (line breaks included) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}
