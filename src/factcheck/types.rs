use serde::{Deserialize, Deserializer, Serialize};

pub const UNKNOWN_CLAIM: &str = "Alegação não informada";
pub const UNKNOWN_CLAIMANT: &str = "Autor Desconhecido";
pub const UNKNOWN_PUBLISHER: &str = "Verificador Desconhecido";
pub const UNKNOWN_RATING: &str = "N/A";
pub const UNKNOWN_URL: &str = "#";

/// A published claim and the first fact-checker review of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimReview {
    pub claim_text: String,
    pub claimant: String,
    pub publisher_name: String,
    pub textual_rating: String,
    pub review_url: String,
}

/// Wire shape of `claims:search`. Every field is optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub claims: Vec<Claim>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub text: Option<String>,
    pub claimant: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub claim_review: Vec<Review>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub publisher: Option<Publisher>,
    pub url: Option<String>,
    pub textual_rating: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Publisher {
    pub name: Option<String>,
}

/// Upstream sends `null` as well as omitting empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

impl Claim {
    /// Pairs the claim with its first review; `None` when nobody reviewed it.
    pub fn into_claim_review(self) -> Option<ClaimReview> {
        let review = self.claim_review.into_iter().next()?;
        Some(ClaimReview {
            claim_text: or_placeholder(self.text, UNKNOWN_CLAIM),
            claimant: or_placeholder(self.claimant, UNKNOWN_CLAIMANT),
            publisher_name: or_placeholder(
                review.publisher.and_then(|p| p.name),
                UNKNOWN_PUBLISHER,
            ),
            textual_rating: or_placeholder(review.textual_rating, UNKNOWN_RATING),
            review_url: or_placeholder(review.url, UNKNOWN_URL),
        })
    }
}
