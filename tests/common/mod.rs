/*!
 * Common test utilities for the wosc-guides test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use wosc_guides::app_config::{BuildPaths, Config, GenerationConfig};

/// Route library logs through env_logger once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes a content document with the given English text
pub fn create_content(dir: &Path, filename: &str, en_text: &str) -> Result<PathBuf> {
    let json = serde_json::json!({ "en": en_text, "de": "Deutscher Text" });
    create_test_file(dir, filename, &serde_json::to_string(&json)?)
}

/// Minimal sitemap with one existing entry
pub const SITEMAP: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n<url><loc>https://www.whiteoutsurvival-community.com/</loc></url>\n</urlset>\n";

/// A site layout inside a temporary directory
pub struct TestSite {
    pub root: TempDir,
    pub paths: BuildPaths,
}

impl TestSite {
    /// Site root with an empty content directory and a sitemap
    pub fn new(config: &Config) -> Result<Self> {
        let root = create_temp_dir()?;
        let content = root.path().join("content");
        fs::create_dir_all(&content)?;
        let paths = config.resolve_paths(root.path(), Some(&content));
        fs::write(&paths.sitemap, SITEMAP)?;
        Ok(Self { root, paths })
    }

    pub fn content_dir(&self) -> &Path {
        &self.paths.content_dir
    }

    pub fn output(&self, relative: &str) -> PathBuf {
        self.paths.output_dir.join(relative)
    }

    pub fn read_output(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.output(relative))?)
    }

    pub fn read_sitemap(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.paths.sitemap)?)
    }
}

/// A small catalog: two generations of two heroes each, default guides
pub fn small_config() -> Config {
    let mut config = Config::default();
    config.catalog.generations = vec![
        GenerationConfig::new(2, &["flint", "philly"]),
        GenerationConfig::new(6, &["wu_ming", "renee"]),
    ];
    config
}
