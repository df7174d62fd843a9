use anyhow::{Result, anyhow};
use isolang::Language;

/// Locale code utilities
///
/// Site locales are short codes such as `de`, `pt-BR` or `zh_Hans`. Only the
/// primary language subtag is checked against ISO 639; region and script
/// subtags are carried through untouched.
/// Return the primary language subtag of a locale code, lowercased
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Validate that a locale code starts with a known ISO 639-1 or ISO 639-3 code
pub fn validate_locale_code(code: &str) -> Result<()> {
    if lookup(code).is_some() {
        Ok(())
    } else {
        Err(anyhow!("Invalid locale code: {}", code))
    }
}

/// English name of the locale's language, e.g. `fr` -> `French`.
/// Unknown codes are returned unchanged.
pub fn get_language_name(code: &str) -> String {
    match lookup(code) {
        Some(lang) => lang.to_name().to_string(),
        None => code.to_string(),
    }
}

/// Label used in log lines: `French (fr)`
pub fn display_locale(code: &str) -> String {
    let name = get_language_name(code);
    if name == code {
        code.to_string()
    } else {
        format!("{} ({})", name, code)
    }
}
