/*!
 * Bot-produced content documents.
 *
 * Each entity (hero, generation summary, expert, guide) is stored as one
 * JSON object mapping a locale code to markdown-subset text:
 *
 * ```json
 * { "en": "**Flint** is a Gen 2 infantry hero...", "de": "..." }
 * ```
 */

use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::ContentError;

/// Locale-keyed text of one entity. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentDocument {
    texts: BTreeMap<String, String>,
}

impl ContentDocument {
    /// Build a document from `(locale, text)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            texts: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Parse a document from its JSON text. Non-string locale values are ignored.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let value: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let texts = value
            .into_iter()
            .filter_map(|(locale, text)| match text {
                Value::String(s) => Some((locale, s)),
                _ => None,
            })
            .collect();
        Ok(Self { texts })
    }

    /// Text for `locale`, if present
    pub fn text(&self, locale: &str) -> Option<&str> {
        self.texts.get(locale).map(String::as_str)
    }

    /// Locales with text, sorted
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.texts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Load a content document, reporting why it is unavailable
pub fn try_load_content(path: &Path) -> Result<ContentDocument, ContentError> {
    if !path.is_file() {
        return Err(ContentError::MissingFile(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ContentError::MalformedJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    ContentDocument::parse(&raw).map_err(|e| ContentError::MalformedJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a content document, returning `None` on a missing file or malformed JSON.
/// Never fails; the reason is logged.
pub fn load_content(path: &Path) -> Option<ContentDocument> {
    match try_load_content(path) {
        Ok(doc) => Some(doc),
        Err(e @ ContentError::MissingFile(_)) => {
            debug!("{}", e);
            None
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
