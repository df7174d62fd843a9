use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::locale_filler::{FillReport, LocaleFiller};
use crate::page_builder::{BuildReport, PageBuilder};
use crate::sitemap::SitemapOutcome;

// @module: Application controller for guide generation

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build all guide pages under `site_root`.
    /// `content_override` replaces the configured content directory.
    pub fn build(&self, site_root: &Path, content_override: Option<&Path>) -> Result<BuildReport> {
        self.build_with_progress(site_root, content_override, ProgressBar::hidden())
    }

    /// Build with a visible progress bar
    pub fn build_interactive(&self, site_root: &Path, content_override: Option<&Path>) -> Result<BuildReport> {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} entities {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar.set_message("Building");

        self.build_with_progress(site_root, content_override, progress_bar)
    }

    fn build_with_progress(&self, site_root: &Path, content_override: Option<&Path>, progress: ProgressBar) -> Result<BuildReport> {
        let start_time = std::time::Instant::now();
        let paths = self.config.resolve_paths(site_root, content_override);
        info!("Building guides from {}", paths.content_dir.display());

        let mut builder = PageBuilder::new(&self.config, paths).with_progress(progress);
        let report = builder.run()?;

        info!(
            "Wrote {} pages, skipped {} entities in {}.",
            report.pages.len(),
            report.skipped.len(),
            Self::format_duration(start_time.elapsed())
        );
        if let SitemapOutcome::Updated { added } = report.sitemap {
            info!("Sitemap: {} URLs added", added);
        }

        Ok(report)
    }

    /// Fill missing FAQ/SEO keys in the locale dictionary at `index_path`
    pub fn fill_locales(&self, index_path: &Path) -> Result<FillReport> {
        let filler = LocaleFiller::new(&self.config.locales);
        let report = filler.run(index_path)?;

        if report.filled.is_empty() {
            info!("No locale needed filling");
        } else {
            info!("Filled {} keys across {} locales", report.filled_count(), report.filled.len());
        }
        if !report.still_missing.is_empty() {
            warn!("{} locales are still incomplete", report.still_missing.len());
        }

        Ok(report)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
