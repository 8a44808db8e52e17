use whatlang::{Lang, detect};

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// ISO 639-1 code of the text's language, when detection is confident.
pub fn detect_language(text: &str) -> Option<&'static str> {
    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return None;
    }

    let info = detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    lang_to_code(info.lang())
}

/// Language code to send with a claim search.
///
/// The configured default (e.g. `pt-BR`) wins unless the text was detected
/// in a different language, in which case the bare detected code is used.
pub fn resolve_search_language(detected: Option<&str>, default: &str) -> String {
    let default_primary = default.split(['-', '_']).next().unwrap_or(default);
    match detected {
        Some(code) if !code.eq_ignore_ascii_case(default_primary) => code.to_string(),
        _ => default.to_string(),
    }
}

fn lang_to_code(lang: Lang) -> Option<&'static str> {
    let code = match lang {
        Lang::Por => "pt",
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        _ => return None,
    };
    Some(code)
}
