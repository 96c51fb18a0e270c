use serde::Serialize;

/// Display names for the languages offered in the language pickers
static LANGUAGE_CATALOG: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub fn display_name(code: &str) -> Option<&'static str> {
    LANGUAGE_CATALOG
        .iter()
        .find(|(tag, _)| *tag == code)
        .map(|(_, name)| *name)
}

pub fn all_languages() -> Vec<Language> {
    LANGUAGE_CATALOG
        .iter()
        .map(|(code, name)| Language { code, name })
        .collect()
}
