//! Wire shapes of the verification endpoints.
//!
//! Field names follow the JSON contract the front-end page already consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::factcheck::ClaimReview;
use crate::scorer::{AspectDetail, Verdict};
use crate::verification::service::{
    EchoedText, VerificationInput, VerificationOutcome, VerificationRequest,
};

pub const INVALID_MODE_MESSAGE: &str = "Modo de verificação inválido ou texto/link não fornecido";
pub const AMBIGUOUS_INPUT_MESSAGE: &str = "Informe apenas texto ou apenas link, não ambos";
pub const MISSING_URL_MESSAGE: &str = "URL não fornecida para verificação";

const MODE_TEXT: &str = "texto";
const MODE_LINK: &str = "link";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerificarRequest {
    pub texto: Option<String>,
    pub link: Option<String>,
    /// `"texto"` or `"link"`.
    pub modo: Option<String>,
    pub cidade: Option<String>,
    pub categoria: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl VerificarRequest {
    pub fn validate(self) -> Result<VerificationRequest, String> {
        let texto = non_blank(self.texto);
        let link = non_blank(self.link);

        let input = match (self.modo.as_deref().map(str::trim), texto, link) {
            (_, Some(_), Some(_)) => return Err(AMBIGUOUS_INPUT_MESSAGE.to_string()),
            (Some(MODE_TEXT), Some(texto), None) => VerificationInput::Text(texto),
            (Some(MODE_LINK), None, Some(link)) => VerificationInput::Link(link.trim().to_string()),
            _ => return Err(INVALID_MODE_MESSAGE.to_string()),
        };

        Ok(VerificationRequest {
            input,
            city: non_blank(self.cidade),
            category: non_blank(self.categoria),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerificarLinkRequest {
    pub url: Option<String>,
}

impl VerificarLinkRequest {
    pub fn validate(self) -> Result<VerificationRequest, String> {
        let url = non_blank(self.url).ok_or_else(|| MISSING_URL_MESSAGE.to_string())?;
        Ok(VerificationRequest {
            input: VerificationInput::Link(url.trim().to_string()),
            city: None,
            category: None,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerificarResponse {
    pub sucesso: bool,
    pub dados: DadosVerificacao,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DadosVerificacao {
    pub id: Uuid,
    #[serde(rename = "analiseIA")]
    pub analise_ia: AnaliseIa,
    pub fact_checks: FactChecks,
    pub texto: Texto,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseIa {
    pub porcentagem_verdade: u8,
    pub pontuacao_sensacionalismo: u8,
    pub pontuacao_objetividade: u8,
    pub veredito: Verdict,
    /// False when the classifier was unreachable and the scores are neutral
    /// placeholders.
    pub disponivel: bool,
    pub detalhes: Vec<AspectDetail>,
    pub texto_analisado: String,
    pub idioma: Option<String>,
    pub analisado_em: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FactChecks {
    pub encontrados: bool,
    pub quantidade: usize,
    pub resultados: Vec<ResultadoFactCheck>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResultadoFactCheck {
    pub alegacao: String,
    pub autor: String,
    pub verificador: String,
    pub avaliacao: String,
    pub url_revisao: String,
    pub titulo: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Texto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    pub conteudo: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub sucesso: bool,
    pub erro: String,
}

impl ErrorResponse {
    pub fn new(erro: impl Into<String>) -> Self {
        Self {
            sucesso: false,
            erro: erro.into(),
        }
    }
}

impl From<ClaimReview> for ResultadoFactCheck {
    fn from(review: ClaimReview) -> Self {
        Self {
            titulo: format!("[{}] - {}", review.textual_rating, review.claim_text),
            snippet: format!(
                "Verificado por {} - Avaliação: {}",
                review.publisher_name, review.textual_rating
            ),
            link: review.review_url.clone(),
            alegacao: review.claim_text,
            autor: review.claimant,
            verificador: review.publisher_name,
            avaliacao: review.textual_rating,
            url_revisao: review.review_url,
        }
    }
}

impl From<Vec<ClaimReview>> for FactChecks {
    fn from(reviews: Vec<ClaimReview>) -> Self {
        let resultados: Vec<ResultadoFactCheck> = reviews.into_iter().map(Into::into).collect();
        Self {
            encontrados: !resultados.is_empty(),
            quantidade: resultados.len(),
            resultados,
        }
    }
}

impl From<EchoedText> for Texto {
    fn from(echoed: EchoedText) -> Self {
        match echoed {
            EchoedText::Text { content } => Self {
                titulo: None,
                conteudo: content,
            },
            EchoedText::Article {
                title,
                content_preview,
            } => Self {
                titulo: Some(title),
                conteudo: content_preview,
            },
        }
    }
}

impl From<VerificationOutcome> for VerificarResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        let analysis = outcome.analysis;
        Self {
            sucesso: true,
            dados: DadosVerificacao {
                id: outcome.id,
                analise_ia: AnaliseIa {
                    porcentagem_verdade: analysis.credibility_score,
                    pontuacao_sensacionalismo: analysis.sensationalism_score,
                    pontuacao_objetividade: analysis.objectivity_score,
                    veredito: analysis.verdict,
                    disponivel: analysis.available,
                    detalhes: analysis.details,
                    texto_analisado: outcome.analyzed_text_preview,
                    idioma: outcome.language.map(str::to_string),
                    analisado_em: outcome.analyzed_at,
                },
                fact_checks: outcome.claim_reviews.into(),
                texto: outcome.echoed.into(),
            },
        }
    }
}
