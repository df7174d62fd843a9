/*!
 * Tests for the in-memory locale fill
 */

use serde_json::json;
use wosc_guides::app_config::LocaleConfig;
use wosc_guides::errors::LocaleError;
use wosc_guides::locale_filler::{LocaleDictionary, LocaleFiller};

fn dictionary(value: serde_json::Value) -> LocaleDictionary {
    LocaleDictionary::parse(&value.to_string()).unwrap()
}

/// Test the basic fill: fr gets en's text, de/en untouched
#[test]
fn test_fill_withMissingKey_shouldCopyFallbackText() {
    let config = LocaleConfig::default();
    let mut dict = dictionary(json!({
        "de": { "faq.1": "Frage eins", "nav.home": "Start" },
        "en": { "faq.1": "Question one, in full", "nav.home": "Home" },
        "fr": { "nav.home": "Accueil" }
    }));
    let de_before = dict.entries("de").cloned();
    let en_before = dict.entries("en").cloned();

    let report = LocaleFiller::new(&config).fill(&mut dict).unwrap();

    assert_eq!(dict.get("fr", "faq.1"), dict.get("en", "faq.1"));
    assert_eq!(dict.get("fr", "nav.home"), Some(&json!("Accueil")));
    assert_eq!(dict.entries("de").cloned(), de_before);
    assert_eq!(dict.entries("en").cloned(), en_before);
    assert_eq!(report.required, vec!["faq.1"]);
    assert_eq!(report.filled.get("fr"), Some(&vec!["faq.1".to_string()]));
    assert!(report.still_missing.is_empty());
}

/// Test that existing translations are never overwritten
#[test]
fn test_fill_withExistingTranslation_shouldKeepIt() {
    let config = LocaleConfig::default();
    let mut dict = dictionary(json!({
        "de": { "faq.1": "a", "seoBlock.title": "b" },
        "en": { "faq.1": "A", "seoBlock.title": "B" },
        "es": { "faq.1": "uno" }
    }));

    let report = LocaleFiller::new(&config).fill(&mut dict).unwrap();

    assert_eq!(dict.get("es", "faq.1"), Some(&json!("uno")));
    assert_eq!(dict.get("es", "seoBlock.title"), Some(&json!("B")));
    assert_eq!(report.filled_count(), 1);
}

/// Test that keys only en has are not required
#[test]
fn test_fill_withKeyOnlyInFallback_shouldNotCopyIt() {
    let config = LocaleConfig::default();
    let mut dict = dictionary(json!({
        "de": {},
        "en": { "faq.extra": "only english" },
        "it": {}
    }));

    let report = LocaleFiller::new(&config).fill(&mut dict).unwrap();

    assert!(report.required.is_empty());
    assert_eq!(dict.get("it", "faq.extra"), None);
}

/// Test that a gap in the fallback itself is reported by verification
#[test]
fn test_fill_withGapInFallback_shouldReportStillMissing() {
    let config = LocaleConfig::default();
    let mut dict = dictionary(json!({
        "de": { "faq.1": "a", "faq.2": "b" },
        "en": { "faq.1": "A" },
        "pl": {}
    }));

    let report = LocaleFiller::new(&config).fill(&mut dict).unwrap();

    assert_eq!(dict.get("pl", "faq.1"), Some(&json!("A")));
    assert_eq!(report.still_missing.len(), 1);
    assert_eq!(report.still_missing[0].locale, "pl");
    assert_eq!(report.still_missing[0].keys, vec!["faq.2"]);
    assert_eq!(dict.entries("en").unwrap().len(), 1);
}

/// Test that missing reference or fallback locales abort the fill
#[test]
fn test_fill_withoutReferenceOrFallback_shouldFail() {
    let config = LocaleConfig::default();
    let filler = LocaleFiller::new(&config);

    let mut no_de = dictionary(json!({ "en": {}, "fr": {} }));
    assert!(matches!(filler.fill(&mut no_de), Err(LocaleError::MissingLocale(l)) if l == "de"));

    let mut no_en = dictionary(json!({ "de": { "faq.1": "a" }, "fr": {} }));
    assert!(matches!(filler.fill(&mut no_en), Err(LocaleError::MissingLocale(l)) if l == "en"));
    assert_eq!(no_en.get("fr", "faq.1"), None);
}

/// Test that non-string values are copied verbatim
#[test]
fn test_fill_withStructuredValue_shouldCopyVerbatim() {
    let config = LocaleConfig::default();
    let mut dict = dictionary(json!({
        "de": { "seoBlock.list": ["x"] },
        "en": { "seoBlock.list": ["one", "two"] },
        "ja": {}
    }));

    LocaleFiller::new(&config).fill(&mut dict).unwrap();

    assert_eq!(dict.get("ja", "seoBlock.list"), Some(&json!(["one", "two"])));
}
