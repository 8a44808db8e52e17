use std::fs;
use url::Url;

use crate::extractor::{ExtractionError, extract};
use crate::fetcher::types::PageResponse;

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse::from_html(Url::parse(url).unwrap(), html)
}

#[test]
fn test_extract_news_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://noticias.example.com.br/saude/vacinacao");
    let content = extract(&response).unwrap();

    assert_eq!(content.title, "Campanha de vacinação é ampliada na capital");
    assert_eq!(
        content.url.as_str(),
        "https://noticias.example.com.br/saude/vacinacao"
    );
    assert!(content.content.contains("Segundo a Secretaria Municipal de Saúde"));
    assert!(content.content.contains("\"Queremos alcançar 90% do público-alvo\""));
    assert!(!content.content.contains("Assine nossa newsletter"));
    assert!(!content.content.contains("dataLayer"));
    assert!(!content.content.contains("Editorias"));
    assert!(!content.content.contains('\n'));
}

#[test]
fn test_reject_page_without_text() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/empty.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "https://example.com/empty");
    let result = extract(&response);

    assert!(matches!(result, Err(ExtractionError::EmptyContent)));
}

#[test]
fn test_title_only_page_is_rejected() {
    let html = "<html><head><title>Só título</title></head><body><header><h1>Topo</h1></header></body></html>";

    let response = create_test_response(html.to_string(), "https://example.com/title");
    assert!(extract(&response).is_err());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z]*"
        ) {
            let response = create_test_response(html, &url);
            let _ = extract(&response);
        }

        #[test]
        fn test_extracted_text_is_collapsed(html in "(<p>|</p>|<div>| |\n|\t|[a-z]{1,8})*") {
            let response = create_test_response(html, "https://example.com");
            if let Ok(article) = extract(&response) {
                prop_assert!(!article.content.contains("  "));
                prop_assert!(!article.content.contains('\n'));
                prop_assert_eq!(article.content.trim(), article.content.as_str());
            }
        }
    }
}
