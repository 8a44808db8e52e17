#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use verifica::classifier::ToxicityScores;
use verifica::extractor::extract;
use verifica::fetcher::PageResponse;
use verifica::scorer::score;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let Ok(url) = Url::parse("https://example.com/noticia") else {
        return;
    };
    let page = PageResponse::from_html(url, html);

    // Extraction and scoring must never panic, and scores stay in range
    if let Ok(article) = extract(&page) {
        let analysis = score(&article.analysis_text(), &ToxicityScores::default());
        assert!(analysis.credibility_score <= 100);
        assert!(analysis.sensationalism_score <= 100);
        assert!(analysis.objectivity_score <= 100);
    }
});
