use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!("verifica/", env!("CARGO_PKG_VERSION"), " (+news verification)");

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Retrieve an HTML page in a single attempt and decode it to UTF-8.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url.trim())?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
    }

    let mut response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    // Content-Length may be missing (chunked) or stripped by decompression,
    // so the cap is enforced while streaming.
    let mut body_bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(FetchError::from_reqwest_error)?
    {
        let received = (body_bytes.len() + chunk.len()) as u64;
        if received > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(received));
        }
        body_bytes.extend_from_slice(&chunk);
    }

    debug!(
        final_url = %final_url,
        bytes = body_bytes.len(),
        "page downloaded"
    );

    Ok(process_response(
        final_url,
        status,
        &body_bytes,
        &content_type,
    ))
}
