pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::FactCheckClient;
pub use types::ClaimReview;

#[derive(Error, Debug)]
pub enum FactCheckError {
    #[error(
        "Configuração da API ausente. Verifique GOOGLE_API_KEY e FACT_CHECK_BASE_URL no arquivo .env."
    )]
    NotConfigured,

    #[error("Texto não fornecido para verificação.")]
    EmptyQuery,

    #[error("Erro na API ({status}): {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Falha ao contatar o serviço de checagem: {0}")]
    Transport(String),

    #[error("Resposta inválida do serviço de checagem: {0}")]
    Decode(String),
}

/// Search for published fact-checks matching a text.
///
/// Zero matches is `Ok(vec![])`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactCheckSearch: Send + Sync {
    async fn search(&self, query: &str, language: &str) -> Result<Vec<ClaimReview>, FactCheckError>;

    /// Whether credentials and endpoint are present.
    fn is_configured(&self) -> bool;
}
