/*!
 * Sitemap maintenance.
 *
 * New guide URLs are spliced into an existing `sitemap.xml` just before its
 * closing `</urlset>` tag. The document is otherwise left byte-for-byte
 * unchanged.
 */

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::app_config::{SitemapConfig, SitemapPolicy};
use crate::file_utils::FileManager;

const CLOSING_TAG: &str = "</urlset>";

static LOC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<loc>\s*([^<]*?)\s*</loc>").unwrap()
});

/// Result of a sitemap update
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapOutcome {
    /// Entries were inserted
    Updated { added: usize },
    /// Every URL was already listed
    UpToDate,
    /// The guard substring was found, nothing was touched
    Guarded,
    /// The sitemap file does not exist
    Missing,
    /// The document has no closing `</urlset>` tag
    Malformed,
}

/// `<loc>` values listed in a sitemap document
pub fn existing_locations(sitemap: &str) -> HashSet<String> {
    LOC_REGEX
        .captures_iter(sitemap)
        .map(|c| c[1].to_string())
        .collect()
}

/// Entity-escape a URL for use as `<loc>` text
pub fn escape_loc(url: &str) -> String {
    url.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One `<url>` entry, newline-terminated
pub fn url_entry(url: &str, lastmod: NaiveDate) -> String {
    format!(
        "<url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
        escape_loc(url),
        lastmod.format("%Y-%m-%d")
    )
}

/// Merges new URLs into sitemap text
pub struct SitemapUpdater<'a> {
    config: &'a SitemapConfig,
    lastmod: NaiveDate,
}

impl<'a> SitemapUpdater<'a> {
    pub fn new(config: &'a SitemapConfig, lastmod: NaiveDate) -> Self {
        Self { config, lastmod }
    }

    /// Compute the updated document. `urls` should already be sorted and unique.
    /// Returns `None` together with the outcome when nothing should be written.
    pub fn merge(&self, sitemap: &str, urls: &[String]) -> (Option<String>, SitemapOutcome) {
        if self.config.policy == SitemapPolicy::Guarded && sitemap.contains(&self.config.guard_substring) {
            return (None, SitemapOutcome::Guarded);
        }

        let Some(insert_at) = sitemap.rfind(CLOSING_TAG) else {
            return (None, SitemapOutcome::Malformed);
        };

        let existing = existing_locations(sitemap);
        let entries: Vec<String> = urls
            .iter()
            .filter(|url| !existing.contains(&escape_loc(url)))
            .map(|url| url_entry(url, self.lastmod))
            .collect();

        if entries.is_empty() {
            return (None, SitemapOutcome::UpToDate);
        }

        let mut updated = String::with_capacity(sitemap.len() + entries.iter().map(String::len).sum::<usize>());
        updated.push_str(&sitemap[..insert_at]);
        for entry in &entries {
            updated.push_str(entry);
        }
        updated.push_str(&sitemap[insert_at..]);

        (Some(updated), SitemapOutcome::Updated { added: entries.len() })
    }

    /// Update the sitemap file at `path` in place
    pub fn update_file(&self, path: &Path, urls: &[String]) -> Result<SitemapOutcome> {
        if !FileManager::file_exists(path) {
            warn!("Sitemap not found, skipping update: {}", path.display());
            return Ok(SitemapOutcome::Missing);
        }

        let current = FileManager::read_to_string(path)?;
        let (updated, outcome) = self.merge(&current, urls);

        match (&updated, &outcome) {
            (Some(content), SitemapOutcome::Updated { added }) => {
                FileManager::write_to_file(path, content)?;
                info!("Updated {} ({} new URLs)", path.display(), added);
            }
            (_, SitemapOutcome::Guarded) => {
                info!("Sitemap already lists '{}', leaving it unchanged", self.config.guard_substring);
            }
            (_, SitemapOutcome::Malformed) => {
                warn!("Sitemap has no {} tag, leaving it unchanged: {}", CLOSING_TAG, path.display());
            }
            _ => info!("Sitemap already up to date"),
        }

        Ok(outcome)
    }
}
