use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

use crate::extractor::model::normalize_whitespace;

/// Subtrees that never contribute to title or content.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer",
];

/// Elements whose boundaries separate words in the flattened text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property='og:title']").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static CONTENT_REGIONS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        Selector::parse("article").unwrap(),
        Selector::parse("main").unwrap(),
        Selector::parse("body").unwrap(),
    ]
});

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadResult {
    pub title: String,
    pub content: String,
}

pub fn read(html: &str) -> ReadResult {
    let document = Html::parse_document(html);

    ReadResult {
        title: extract_title(&document),
        content: extract_content(&document),
    }
}

/// First `h1` outside the stripped regions, then `og:title`, then `<title>`.
fn extract_title(document: &Html) -> String {
    let heading = document
        .select(&H1)
        .filter(|el| !is_inside_stripped(el))
        .map(|el| normalize_whitespace(&flatten_text(el)))
        .find(|text| !text.is_empty());
    if let Some(heading) = heading {
        return heading;
    }

    let og_title = document
        .select(&OG_TITLE)
        .filter_map(|el| el.value().attr("content"))
        .map(normalize_whitespace)
        .find(|text| !text.is_empty());
    if let Some(og_title) = og_title {
        return og_title;
    }

    document
        .select(&TITLE)
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Text of every `article`, else every `main`, else the `body`.
fn extract_content(document: &Html) -> String {
    for selector in CONTENT_REGIONS.iter() {
        let mut text = String::new();
        for region in document.select(selector).filter(|el| !is_inside_stripped(el)) {
            text.push(' ');
            text.push_str(&flatten_text(region));
        }

        let text = normalize_whitespace(&text);
        if !text.is_empty() {
            return text;
        }
    }

    String::new()
}

fn is_stripped(name: &str) -> bool {
    STRIPPED_TAGS.contains(&name)
}

fn is_inside_stripped(element: &ElementRef<'_>) -> bool {
    is_stripped(element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| is_stripped(ancestor.value().name()))
}

enum Step<N> {
    Enter(N),
    LeaveBlock,
}

/// Text under `element` with stripped subtrees skipped. Walks with an explicit
/// stack so nesting depth is bounded by the heap, not the thread stack.
fn flatten_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step<_>> = element.children().rev().map(Step::Enter).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Enter(node) => node,
            Step::LeaveBlock => {
                out.push(' ');
                continue;
            }
        };

        if let Some(child) = ElementRef::wrap(node) {
            let name = child.value().name();
            if is_stripped(name) {
                continue;
            }
            if BLOCK_TAGS.contains(&name) {
                out.push(' ');
                stack.push(Step::LeaveBlock);
            }
            stack.extend(child.children().rev().map(Step::Enter));
        } else if let Node::Text(text) = node.value() {
            out.push_str(text);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_boilerplate_regions() {
        let html = r#"<html><head><style>p { color: red }</style></head><body>
            <header><h1>Portal de Notícias</h1><nav><a href="/">Início</a></nav></header>
            <h1>Prefeitura anuncia obras</h1>
            <p>Segundo a secretaria, as obras começam amanhã.</p>
            <script>track('view')</script>
            <footer>Todos os direitos reservados</footer>
        </body></html>"#;

        let result = read(html);

        assert_eq!(result.title, "Prefeitura anuncia obras");
        assert!(result.content.contains("Segundo a secretaria"));
        assert!(!result.content.contains("Portal de Notícias"));
        assert!(!result.content.contains("Início"));
        assert!(!result.content.contains("track"));
        assert!(!result.content.contains("color"));
        assert!(!result.content.contains("direitos reservados"));
    }

    #[test]
    fn prefers_article_over_main_and_body() {
        let html = r#"<body><main><p>Menu lateral</p><article><p>Texto principal.</p></article></main></body>"#;
        assert_eq!(read(html).content, "Texto principal.");

        let html = r#"<body><aside>Anúncio</aside><main><p>Conteúdo do main.</p></main></body>"#;
        assert_eq!(read(html).content, "Conteúdo do main.");

        let html = r#"<body><p>Só o corpo.</p></body>"#;
        assert_eq!(read(html).content, "Só o corpo.");
    }

    #[test]
    fn concatenates_multiple_articles() {
        let html = r#"<body><article>Primeira.</article><article>Segunda.</article></body>"#;
        assert_eq!(read(html).content, "Primeira. Segunda.");
    }

    #[test]
    fn empty_article_falls_through_to_body() {
        let html = r#"<body><article><script>x()</script></article><p>Texto solto.</p></body>"#;
        assert_eq!(read(html).content, "Texto solto.");
    }

    #[test]
    fn block_boundaries_separate_words_but_inline_does_not() {
        let html = r#"<body><p>Um</p><p>Dois</p><p>Tr<b>ês</b></p></body>"#;
        assert_eq!(read(html).content, "Um Dois Três");
    }

    #[test]
    fn title_falls_back_to_og_title_then_title_tag() {
        let html = r#"<html><head><meta property="og:title" content="Título OG"><title>Título da aba</title></head><body><p>x</p></body></html>"#;
        assert_eq!(read(html).title, "Título OG");

        let html = r#"<html><head><title> Título da aba </title></head><body><p>x</p></body></html>"#;
        assert_eq!(read(html).title, "Título da aba");

        assert_eq!(read("<body><p>x</p></body>").title, "");
    }

    #[test]
    fn handles_malformed_markup() {
        let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";
        let result = read(html);
        assert_eq!(result.title, "Broken");
        assert!(result.content.contains("Unclosed tags"));
        assert!(result.content.contains("More content"));
    }

    #[test]
    fn deeply_nested_markup_does_not_exhaust_the_stack() {
        let depth = 20_000;
        let html = format!(
            "<body>{}texto{}</body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        assert_eq!(read(&html).content, "texto");

        let html = format!(
            "<body>{}<p>fundo</p><script>x()</script>{}<p>fim</p></body>",
            "<section><span>".repeat(depth),
            "</span></section>".repeat(depth)
        );
        assert_eq!(read(&html).content, "fundo fim");
    }
}
