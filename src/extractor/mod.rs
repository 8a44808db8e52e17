pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::{ExtractedArticle, normalize_whitespace};

use thiserror::Error;
use tracing::{info, instrument};

use crate::fetcher::{self, FetchError, types::PageResponse};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no readable text left after stripping markup")]
    EmptyContent,
}

/// Failure of the link pipeline: either the page or its text.
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

pub fn extract(resp: &PageResponse) -> Result<ExtractedArticle, ExtractionError> {
    let result = reader::read(&resp.body_utf8);

    if result.content.is_empty() {
        return Err(ExtractionError::EmptyContent);
    }

    Ok(ExtractedArticle {
        url: resp.url_final.clone(),
        title: result.title,
        content: result.content,
        fetched_at: resp.fetched_at,
    })
}

/// Fetch `url` and pull its article text out. Single attempt, no retry.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_article(url: &str) -> Result<ExtractedArticle, ArticleError> {
    let page = fetcher::fetch(url).await?;
    let article = extract(&page)?;

    info!(
        final_url = %article.url,
        status = %page.status,
        charset = ?page.charset,
        title_chars = article.title.chars().count(),
        content_chars = article.content.chars().count(),
        "article extracted"
    );

    Ok(article)
}
