use linkify::{LinkFinder, LinkKind};

const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

pub const BONUS_SENTENCES: f64 = 5.0;
pub const BONUS_WORD_LENGTH: f64 = 3.0;
pub const BONUS_QUOTES: f64 = 8.0;
pub const BONUS_NUMBERS: f64 = 10.0;
pub const BONUS_LINKS: f64 = 5.0;

const MIN_SENTENCES: usize = 3;
const MIN_MEAN_WORD_LENGTH: f64 = 5.0;

/// Surface features of a text that hint at careful writing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStructure {
    pub sentences: usize,
    pub mean_word_length: f64,
    pub has_quotes: bool,
    pub has_numbers: bool,
    pub has_links: bool,
}

impl TextStructure {
    /// `sentences` counts only non-empty segments between `.`, `!` and `?`,
    /// so a trailing terminator adds nothing: "Um. Dois. Três." is 3, not the
    /// 4 that a raw split would report.
    pub fn of(text: &str) -> Self {
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();

        let (words, letters) = text
            .split_whitespace()
            .fold((0usize, 0usize), |(words, letters), word| {
                (words + 1, letters + word.chars().count())
            });
        let mean_word_length = if words == 0 {
            0.0
        } else {
            letters as f64 / words as f64
        };

        let mut finder = LinkFinder::new();
        finder.kinds(&[LinkKind::Url]);
        let has_links = finder.links(text).any(|link| {
            let url = link.as_str().to_ascii_lowercase();
            url.starts_with("http://") || url.starts_with("https://")
        });

        Self {
            sentences,
            mean_word_length,
            has_quotes: text.contains(QUOTE_CHARS),
            has_numbers: text.chars().any(|c| c.is_ascii_digit()),
            has_links,
        }
    }

    /// Credibility points earned by structure alone.
    pub fn bonus(&self) -> f64 {
        let mut bonus = 0.0;
        if self.sentences > MIN_SENTENCES {
            bonus += BONUS_SENTENCES;
        }
        if self.mean_word_length > MIN_MEAN_WORD_LENGTH {
            bonus += BONUS_WORD_LENGTH;
        }
        if self.has_quotes {
            bonus += BONUS_QUOTES;
        }
        if self.has_numbers {
            bonus += BONUS_NUMBERS;
        }
        if self.has_links {
            bonus += BONUS_LINKS;
        }
        bonus
    }
}
