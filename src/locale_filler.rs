/*!
 * FAQ/SEO locale gap filling.
 *
 * The site's `index.json` holds one flat object per locale mapping dotted
 * keys (`faq.1.q`, `seoBlock.title`, ...) to text. Every key of the
 * reference locale that starts with a required prefix must exist in every
 * locale; missing ones are copied verbatim from the fallback locale.
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::app_config::LocaleConfig;
use crate::errors::LocaleError;
use crate::file_utils::FileManager;
use crate::language_utils::display_locale;

/// Locale code -> (dotted key -> value), in document order
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleDictionary {
    locales: Map<String, Value>,
}

impl LocaleDictionary {
    /// Parse a dictionary, checking that every locale maps to an object
    pub fn parse(json: &str) -> Result<Self, LocaleError> {
        let value: Value = serde_json::from_str(json).map_err(|e| LocaleError::ParseError(e.to_string()))?;
        let Value::Object(locales) = value else {
            return Err(LocaleError::NotAnObject);
        };

        for (locale, entries) in &locales {
            if !entries.is_object() {
                return Err(LocaleError::LocaleNotAnObject(locale.clone()));
            }
        }

        Ok(Self { locales })
    }

    /// Serialize with two-space indentation, keeping non-ASCII text as is
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.locales).context("Failed to serialize locale dictionary")
    }

    /// Locale codes in document order
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn entries(&self, locale: &str) -> Option<&Map<String, Value>> {
        self.locales.get(locale).and_then(Value::as_object)
    }

    fn entries_mut(&mut self, locale: &str) -> Option<&mut Map<String, Value>> {
        self.locales.get_mut(locale).and_then(Value::as_object_mut)
    }

    pub fn get(&self, locale: &str, key: &str) -> Option<&Value> {
        self.entries(locale)?.get(key)
    }
}

/// Keys still absent from one locale after filling
#[derive(Debug, Clone, PartialEq)]
pub struct MissingKeys {
    pub locale: String,
    pub keys: Vec<String>,
}

/// Summary of a fill run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Required keys, sorted
    pub required: Vec<String>,
    /// Keys copied from the fallback, per locale
    pub filled: BTreeMap<String, Vec<String>>,
    /// Post-fill verification failures
    pub still_missing: Vec<MissingKeys>,
}

impl FillReport {
    pub fn filled_count(&self) -> usize {
        self.filled.values().map(Vec::len).sum()
    }
}

/// Fills missing required keys from the fallback locale
pub struct LocaleFiller<'a> {
    config: &'a LocaleConfig,
}

impl<'a> LocaleFiller<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        Self { config }
    }

    fn is_target(&self, locale: &str) -> bool {
        locale != self.config.reference && locale != self.config.fallback
    }

    /// Reference keys starting with a required prefix, sorted
    pub fn required_keys(&self, dict: &LocaleDictionary) -> Result<Vec<String>, LocaleError> {
        let reference = dict
            .entries(&self.config.reference)
            .ok_or_else(|| LocaleError::MissingLocale(self.config.reference.clone()))?;

        let mut keys: Vec<String> = reference
            .keys()
            .filter(|key| self.config.required_prefixes.iter().any(|p| key.starts_with(p.as_str())))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Fill every target locale in memory.
    ///
    /// Keys the fallback locale lacks too are left missing and surface in
    /// `still_missing`.
    pub fn fill(&self, dict: &mut LocaleDictionary) -> Result<FillReport, LocaleError> {
        let required = self.required_keys(dict)?;
        let fallback = dict
            .entries(&self.config.fallback)
            .cloned()
            .ok_or_else(|| LocaleError::MissingLocale(self.config.fallback.clone()))?;

        let targets: Vec<String> = dict
            .locales()
            .filter(|locale| self.is_target(locale))
            .map(str::to_string)
            .collect();

        let mut report = FillReport {
            required,
            ..FillReport::default()
        };

        for locale in &targets {
            let Some(entries) = dict.entries_mut(locale) else {
                continue;
            };

            let mut filled = Vec::new();
            for key in &report.required {
                if entries.contains_key(key) {
                    continue;
                }
                match fallback.get(key) {
                    Some(value) => {
                        entries.insert(key.clone(), value.clone());
                        filled.push(key.clone());
                    }
                    None => debug!("Fallback '{}' has no '{}', leaving it missing in '{}'", self.config.fallback, key, locale),
                }
            }

            if !filled.is_empty() {
                report.filled.insert(locale.clone(), filled);
            }
        }

        report.still_missing = self.verify(dict, &report.required);
        Ok(report)
    }

    /// Locales that still lack required keys
    pub fn verify(&self, dict: &LocaleDictionary, required: &[String]) -> Vec<MissingKeys> {
        dict.locales()
            .filter(|locale| self.is_target(locale))
            .filter_map(|locale| {
                let entries = dict.entries(locale)?;
                let keys: Vec<String> = required
                    .iter()
                    .filter(|key| !entries.contains_key(key.as_str()))
                    .cloned()
                    .collect();
                (!keys.is_empty()).then(|| MissingKeys {
                    locale: locale.to_string(),
                    keys,
                })
            })
            .collect()
    }

    /// Load `path`, fill it, write it back and report
    pub fn run(&self, path: &Path) -> Result<FillReport> {
        let raw = FileManager::read_to_string(path)?;
        let mut dict = LocaleDictionary::parse(&raw)
            .with_context(|| format!("Failed to load locale dictionary: {}", path.display()))?;

        let report = self.fill(&mut dict)?;

        FileManager::write_to_file(path, &dict.to_json()?)?;

        for (locale, keys) in &report.filled {
            info!("{}: filled {} keys from '{}'", display_locale(locale), keys.len(), self.config.fallback);
        }
        for missing in &report.still_missing {
            warn!("{} still missing {:?}", missing.locale, missing.keys);
        }
        info!(
            "Done. All locales now have {} {} keys.",
            report.required.len(),
            self.config.required_prefixes.join("+")
        );

        Ok(report)
    }
}
