use regex::Regex;
use std::sync::LazyLock;

/// A named list of trigger phrases sharing one per-match weight.
pub struct Category {
    pub name: &'static str,
    pub weight: f64,
    pub phrases: &'static [&'static str],
}

pub const WARNING_CATEGORIES: &[Category] = &[
    Category {
        name: "urgency",
        weight: 8.0,
        phrases: &[
            "urgente",
            "atenção",
            "última hora",
            "agora pouco",
            "corre",
            "alerta",
            "aviso importante",
        ],
    },
    Category {
        name: "sensationalism",
        weight: 12.0,
        phrases: &[
            "incrível",
            "chocante",
            "impressionante",
            "surreal",
            "absurdo",
            "você não vai acreditar",
            "inacreditável",
        ],
    },
    Category {
        name: "conspiracy",
        weight: 15.0,
        phrases: &[
            "conspiração",
            "querem esconder",
            "não divulgado pela mídia",
            "a verdade oculta",
            "o que não contaram",
            "revelado",
            "segredo",
            "querem que você não saiba",
        ],
    },
    Category {
        name: "emotional",
        weight: 10.0,
        phrases: &[
            "bomba",
            "polêmico",
            "escândalo",
            "polemico",
            "polêmica",
            "revoltante",
            "absurdo total",
            "vergonhoso",
        ],
    },
];

pub const RELIABILITY_CATEGORIES: &[Category] = &[
    Category {
        name: "official_sources",
        weight: 10.0,
        phrases: &[
            "segundo",
            "conforme",
            "de acordo com",
            "afirmou",
            "declarou",
            "informou",
            "confirmou",
            "divulgou",
            "anunciou",
        ],
    },
    Category {
        name: "institutions",
        weight: 8.0,
        phrases: &[
            "ministério",
            "secretaria",
            "prefeitura",
            "governo",
            "instituto",
            "universidade",
            "polícia",
            "departamento",
            "agência",
        ],
    },
    Category {
        name: "data",
        weight: 12.0,
        phrases: &[
            "pesquisa",
            "estudo",
            "dados",
            "relatório",
            "análise",
            "investigação",
            "levantamento",
            "estatística",
            "índice",
            "percentual",
        ],
    },
    Category {
        name: "experts",
        weight: 10.0,
        phrases: &[
            "especialista",
            "pesquisador",
            "cientista",
            "professor",
            "doutor",
            "especializada",
            "profissional",
            "autoridade",
        ],
    },
];

struct CompiledCategory {
    category: &'static Category,
    matchers: Vec<(&'static str, Regex)>,
}

fn compile(categories: &'static [Category]) -> Vec<CompiledCategory> {
    categories
        .iter()
        .map(|category| CompiledCategory {
            category,
            matchers: category
                .phrases
                .iter()
                .map(|phrase| {
                    let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
                    (*phrase, Regex::new(&pattern).unwrap())
                })
                .collect(),
        })
        .collect()
}

static WARNING: LazyLock<Vec<CompiledCategory>> = LazyLock::new(|| compile(WARNING_CATEGORIES));
static RELIABILITY: LazyLock<Vec<CompiledCategory>> =
    LazyLock::new(|| compile(RELIABILITY_CATEGORIES));

/// Phrases of one category found in a text, in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    pub name: &'static str,
    pub weight: f64,
    pub phrases: Vec<&'static str>,
}

impl CategoryMatch {
    /// Each distinct phrase counts once.
    pub fn impact(&self) -> f64 {
        self.phrases.len() as f64 * self.weight
    }
}

fn find_matches(compiled: &[CompiledCategory], text: &str) -> Vec<CategoryMatch> {
    compiled
        .iter()
        .map(|c| CategoryMatch {
            name: c.category.name,
            weight: c.category.weight,
            phrases: c
                .matchers
                .iter()
                .filter(|(_, regex)| regex.is_match(text))
                .map(|(phrase, _)| *phrase)
                .collect(),
        })
        .collect()
}

pub fn warning_matches(text: &str) -> Vec<CategoryMatch> {
    find_matches(&WARNING, text)
}

pub fn reliability_matches(text: &str) -> Vec<CategoryMatch> {
    find_matches(&RELIABILITY, text)
}
