use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::Config;
use crate::factcheck::{
    FactCheckError, FactCheckSearch,
    types::{ClaimReview, SearchResponse},
};

const SEARCH_ENDPOINT: &str = "/v1alpha1/claims:search";
const MAX_QUERY_CHARS: usize = 1000;

/// Client for the Fact Check Tools `claims:search` endpoint.
#[derive(Debug, Clone)]
pub struct FactCheckClient {
    http: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl FactCheckClient {
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = ClientBuilder::new()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.fact_check_base_url().map(str::to_string),
            config.fact_check_api_key().map(str::to_string),
            config.fact_check_timeout(),
        )
    }
}

/// Cap long article bodies at a word boundary; the search matches on the
/// leading text anyway and very long query strings are rejected upstream.
fn bounded_query(query: &str) -> &str {
    match query.char_indices().nth(MAX_QUERY_CHARS) {
        None => query,
        Some((cut, _)) => {
            let head = &query[..cut];
            head.rfind(char::is_whitespace)
                .map(|space| head[..space].trim_end())
                .filter(|trimmed| !trimmed.is_empty())
                .unwrap_or(head)
        }
    }
}

#[async_trait]
impl FactCheckSearch for FactCheckClient {
    #[instrument(skip_all, fields(language = %language, query_chars = query.chars().count()))]
    async fn search(&self, query: &str, language: &str) -> Result<Vec<ClaimReview>, FactCheckError> {
        let (Some(base_url), Some(api_key)) = (self.base_url.as_deref(), self.api_key.as_deref())
        else {
            return Err(FactCheckError::NotConfigured);
        };

        let query = query.trim();
        if query.is_empty() {
            return Err(FactCheckError::EmptyQuery);
        }

        let url = format!("{}{}", base_url.trim_end_matches('/'), SEARCH_ENDPOINT);
        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("query", bounded_query(query)),
                ("languageCode", language),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| FactCheckError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FactCheckError::Upstream { status, body });
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| FactCheckError::Decode(e.without_url().to_string()))?;

        let total_claims = payload.claims.len();
        let reviews: Vec<ClaimReview> = payload
            .claims
            .into_iter()
            .filter_map(|claim| claim.into_claim_review())
            .collect();

        info!(
            claims = total_claims,
            reviewed = reviews.len(),
            "fact-check search completed"
        );

        Ok(reviews)
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_pass_through() {
        assert_eq!(bounded_query("Vacina altera DNA"), "Vacina altera DNA");
    }

    #[test]
    fn long_queries_are_cut_at_a_word_boundary() {
        let query = "notícia ".repeat(300);
        let bounded = bounded_query(&query);

        assert!(bounded.chars().count() <= MAX_QUERY_CHARS);
        assert!(bounded.ends_with("notícia"));
    }

    #[test]
    fn long_single_word_is_cut_at_the_limit() {
        let query = "a".repeat(MAX_QUERY_CHARS + 10);
        assert_eq!(bounded_query(&query).len(), MAX_QUERY_CHARS);
    }
}
