use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::AppError;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Site identity and links
    #[serde(default)]
    pub site: SiteConfig,

    /// Input/output locations, relative to the site root
    #[serde(default)]
    pub paths: PathsConfig,

    /// Entities to build pages for
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Sitemap update settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// FAQ/SEO locale fill settings
    #[serde(default)]
    pub locales: LocaleConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Site identity used by the page template
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SiteConfig {
    /// Absolute base URL used for canonical links and the sitemap
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Short site name appended to page titles
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Game name used in index headings
    #[serde(default = "default_game_name")]
    pub game_name: String,

    /// Discord invite linked from the nav bar and call-to-action blocks
    #[serde(default = "default_discord_invite")]
    pub discord_invite: String,

    /// Locale whose text is rendered from each content document
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_name: default_site_name(),
            game_name: default_game_name(),
            discord_invite: default_discord_invite(),
            language: default_language(),
        }
    }
}

/// File system layout
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    /// Directory with the bot-produced JSON documents
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory receiving the generated pages; also the URL prefix
    #[serde(default = "default_guides_dir")]
    pub guides_dir: String,

    /// Sitemap document to update
    #[serde(default = "default_sitemap_path")]
    pub sitemap: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            guides_dir: default_guides_dir(),
            sitemap: default_sitemap_path(),
        }
    }
}

/// Heroes released in one generation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationConfig {
    pub generation: u32,
    pub heroes: Vec<String>,
}

impl GenerationConfig {
    pub fn new(generation: u32, heroes: &[&str]) -> Self {
        Self {
            generation,
            heroes: heroes.iter().map(|h| h.to_string()).collect(),
        }
    }
}

/// A standalone guide page built from one content document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GuideConfig {
    /// Content file name, e.g. `am_guide.json`
    pub file: String,
    /// Output page stem, e.g. `alliance-mobilization`
    pub slug: String,
    /// Article heading
    pub heading: String,
    /// Document title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Label of the nav pill pointing at this guide
    pub nav_label: String,
}

/// Entity catalog
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Hero generations, each with its heroes
    #[serde(default = "default_generations")]
    pub generations: Vec<GenerationConfig>,

    /// File name prefix of expert documents
    #[serde(default = "default_expert_prefix")]
    pub expert_prefix: String,

    /// Expert-prefixed files that are not expert pages
    #[serde(default = "default_reserved_expert_files")]
    pub reserved_expert_files: Vec<String>,

    /// Standalone guides
    #[serde(default = "default_guides")]
    pub guides: Vec<GuideConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            expert_prefix: default_expert_prefix(),
            reserved_expert_files: default_reserved_expert_files(),
            guides: default_guides(),
        }
    }
}

/// How new URLs are merged into an existing sitemap
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SitemapPolicy {
    /// Skip the update entirely when the sitemap already mentions the guard substring
    #[default]
    Guarded,
    /// Parse the existing `<loc>` entries and insert only the missing URLs
    Strict,
}

/// Sitemap update settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SitemapConfig {
    #[serde(default)]
    pub policy: SitemapPolicy,

    /// Substring whose presence means guide URLs were already injected
    #[serde(default = "default_guard_substring")]
    pub guard_substring: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            policy: SitemapPolicy::default(),
            guard_substring: default_guard_substring(),
        }
    }
}

/// FAQ/SEO locale fill settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocaleConfig {
    /// Locale defining the required key set
    #[serde(default = "default_reference_locale")]
    pub reference: String,

    /// Locale whose text fills the gaps
    #[serde(default = "default_fallback_locale")]
    pub fallback: String,

    /// Key prefixes that make a reference key required
    #[serde(default = "default_required_prefixes")]
    pub required_prefixes: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            reference: default_reference_locale(),
            fallback: default_fallback_locale(),
            required_prefixes: default_required_prefixes(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Locations resolved against a site root for one build run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPaths {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sitemap: PathBuf,
}

fn default_base_url() -> String {
    "https://www.whiteoutsurvival-community.com".to_string()
}

fn default_site_name() -> String {
    "WOSC".to_string()
}

fn default_game_name() -> String {
    "Whiteout Survival".to_string()
}

fn default_discord_invite() -> String {
    "https://discord.gg/wos-community".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("../bros24-bot/jsons")
}

fn default_guides_dir() -> String {
    "guides".to_string()
}

fn default_sitemap_path() -> PathBuf {
    PathBuf::from("sitemap.xml")
}

fn default_generations() -> Vec<GenerationConfig> {
    vec![
        GenerationConfig::new(2, &["alonso", "flint", "philly"]),
        GenerationConfig::new(3, &["greg", "logan", "mia"]),
        GenerationConfig::new(4, &["ahmose", "reina", "lynn"]),
        GenerationConfig::new(5, &["hector", "norah", "gwen"]),
        GenerationConfig::new(6, &["wu_ming", "renee", "wayne"]),
        GenerationConfig::new(7, &["bradley", "edith", "gordon"]),
        GenerationConfig::new(8, &["gatot", "sonya", "hendrik"]),
        GenerationConfig::new(9, &["xura", "fred", "magnus"]),
        GenerationConfig::new(10, &["blanchette", "freya", "gregory"]),
        GenerationConfig::new(11, &["rufus", "lloyd", "eleonora"]),
        GenerationConfig::new(12, &["ligeia", "karol", "hervor"]),
        GenerationConfig::new(13, &["gisela", "flora", "vulcanus"]),
        GenerationConfig::new(14, &["elif", "dominic", "cara"]),
    ]
}

fn default_expert_prefix() -> String {
    "expert_".to_string()
}

fn default_reserved_expert_files() -> Vec<String> {
    vec!["expert_intro.json".to_string(), "expert_summary.json".to_string()]
}

fn default_guides() -> Vec<GuideConfig> {
    vec![GuideConfig {
        file: "am_guide.json".to_string(),
        slug: "alliance-mobilization".to_string(),
        heading: "Alliance Mobilization (AM)".to_string(),
        title: "Alliance Mobilization Guide | WOSC".to_string(),
        description: "AM guide: SvS-safe priorities. Join WOSC Discord.".to_string(),
        nav_label: "AM".to_string(),
    }]
}

fn default_guard_substring() -> String {
    "guides/heroes".to_string()
}

fn default_reference_locale() -> String {
    "de".to_string()
}

fn default_fallback_locale() -> String {
    "en".to_string()
}

fn default_required_prefixes() -> Vec<String> {
    vec!["faq.".to_string(), "seoBlock.".to_string()]
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.site.base_url)
            .map_err(|e| AppError::Config(format!("Invalid base URL '{}': {}", self.site.base_url, e)))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::Config(format!("Base URL must be http(s): {}", self.site.base_url)).into());
        }

        language_utils::validate_locale_code(&self.site.language)
            .map_err(|e| AppError::Config(e.to_string()))?;
        language_utils::validate_locale_code(&self.locales.reference)
            .map_err(|e| AppError::Config(e.to_string()))?;
        language_utils::validate_locale_code(&self.locales.fallback)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.locales.reference == self.locales.fallback {
            return Err(AppError::Config("Reference and fallback locale must differ".to_string()).into());
        }

        if self.locales.required_prefixes.is_empty()
            || self.locales.required_prefixes.iter().any(|p| p.is_empty())
        {
            return Err(AppError::Config("Required key prefixes must be non-empty".to_string()).into());
        }

        if self.catalog.generations.is_empty() {
            return Err(AppError::Config("At least one hero generation is required".to_string()).into());
        }

        let mut seen = HashSet::new();
        for generation in &self.catalog.generations {
            if !seen.insert(generation.generation) {
                return Err(AppError::Config(format!("Duplicate generation: {}", generation.generation)).into());
            }
        }

        let guides_dir = self.paths.guides_dir.trim_matches('/');
        if self.sitemap.policy == SitemapPolicy::Guarded
            && !self.sitemap.guard_substring.starts_with(&format!("{}/", guides_dir))
        {
            return Err(AppError::Config(format!(
                "Sitemap guard '{}' must lie under the guides directory '{}'",
                self.sitemap.guard_substring, guides_dir
            ))
            .into());
        }

        if self.catalog.expert_prefix.is_empty() {
            return Err(AppError::Config("Expert file prefix must not be empty".to_string()).into());
        }

        for guide in &self.catalog.guides {
            if guide.file.is_empty() || guide.slug.is_empty() {
                return Err(AppError::Config("Guides need both a file and a slug".to_string()).into());
            }
        }

        Ok(())
    }

    /// Load the configuration from `path`, writing a default one if the file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the configured paths against `site_root`.
    /// `content_override` replaces the configured content directory.
    pub fn resolve_paths(&self, site_root: &Path, content_override: Option<&Path>) -> BuildPaths {
        let content_dir = match content_override {
            Some(dir) => dir.to_path_buf(),
            None => site_root.join(&self.paths.content_dir),
        };

        BuildPaths {
            content_dir,
            output_dir: site_root.join(&self.paths.guides_dir),
            sitemap: site_root.join(&self.paths.sitemap),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            paths: PathsConfig::default(),
            catalog: CatalogConfig::default(),
            sitemap: SitemapConfig::default(),
            locales: LocaleConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
