/*!
 * Static guide page generation.
 *
 * A build run loads every catalog entity's content document, writes one page
 * per available entity plus an index page per category, and finally merges
 * the URLs of everything written into the site's sitemap.
 *
 * Unavailable entities (missing file, malformed JSON, no text for the
 * display language) are skipped; only a missing content root aborts the run.
 */

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::app_config::{BuildPaths, Config};
use crate::catalog::{Catalog, CatalogEntry, EntityKind};
use crate::content::try_load_content;
use crate::errors::{BuildError, ContentError};
use crate::file_utils::FileManager;
use crate::html::{NavLink, PageLayout, escape_attribute, slug_title};
use crate::markdown::{plain_excerpt, render_markdown_subset};
use crate::sitemap::{SitemapOutcome, SitemapUpdater};
use crate::url_registry::UrlRegistry;

/// Characters of raw text used for generated meta descriptions
const DESCRIPTION_CHARS: usize = 150;

/// One page ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// Location relative to the guides directory
    pub output_path: String,
    /// Site-relative canonical path
    pub canonical_path: String,
    pub title: String,
    pub description: String,
    pub body_html: String,
    pub nav_extras: Vec<NavLink>,
}

/// An entity that produced no page
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntity {
    pub file_name: String,
    pub reason: String,
}

/// Summary of a build run
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Absolute paths of the pages written, in write order
    pub pages: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntity>,
    /// Canonical URLs of every written page, sorted
    pub urls: Vec<String>,
    pub sitemap: SitemapOutcome,
}

/// Builds the guide pages for one run
pub struct PageBuilder<'a> {
    config: &'a Config,
    paths: BuildPaths,
    layout: PageLayout,
    guides_prefix: String,
    today: NaiveDate,
    registry: UrlRegistry,
    progress: ProgressBar,
}

impl<'a> PageBuilder<'a> {
    pub fn new(config: &'a Config, paths: BuildPaths) -> Self {
        let guides_prefix = format!("/{}", config.paths.guides_dir.trim_matches('/'));
        Self {
            config,
            paths,
            layout: PageLayout::new(&config.site, &guides_prefix),
            guides_prefix,
            today: Utc::now().date_naive(),
            registry: UrlRegistry::new(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Use `date` as the sitemap `lastmod` instead of today
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    /// Report per-entity progress on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn registry(&self) -> &UrlRegistry {
        &self.registry
    }

    /// Run the full build
    pub fn run(&mut self) -> Result<BuildReport> {
        if !FileManager::dir_exists(&self.paths.content_dir) {
            return Err(BuildError::MissingRoot(self.paths.content_dir.clone()).into());
        }

        let catalog = Catalog::discover(&self.config.catalog, &self.paths.content_dir)?;
        let mut report = BuildReport {
            pages: Vec::new(),
            skipped: Vec::new(),
            urls: Vec::new(),
            sitemap: SitemapOutcome::Missing,
        };

        let texts = self.load_texts(&catalog, &mut report);

        FileManager::ensure_dir(self.paths.output_dir.join("heroes"))?;
        FileManager::ensure_dir(self.paths.output_dir.join("experts"))?;

        self.progress.set_length(catalog.entries().count() as u64 + 2);

        let index = self.heroes_index(&catalog, &texts);
        report.pages.push(self.write_page(&index)?);
        self.progress.inc(1);

        for (generation, heroes) in &catalog.generations {
            let summary = CatalogEntry::generation_summary(*generation);
            let has_summary = texts.contains_key(&summary.file_name);
            if let Some(text) = texts.get(&summary.file_name) {
                let page = self.generation_page(*generation, text);
                report.pages.push(self.write_page(&page)?);
            }
            self.progress.inc(1);

            for hero in heroes {
                if let Some(text) = texts.get(&hero.file_name) {
                    let page = self.hero_page(hero, *generation, text, has_summary);
                    report.pages.push(self.write_page(&page)?);
                }
                self.progress.inc(1);
            }
        }

        let index = self.experts_index(&catalog, &texts);
        report.pages.push(self.write_page(&index)?);
        self.progress.inc(1);

        for expert in &catalog.experts {
            if let Some(text) = texts.get(&expert.file_name) {
                let page = self.expert_page(expert, text);
                report.pages.push(self.write_page(&page)?);
            }
            self.progress.inc(1);
        }

        for guide in &catalog.guides {
            if let (Some(text), EntityKind::Guide(settings)) = (texts.get(&guide.file_name), &guide.kind) {
                let page = self.guide_page(guide, settings.heading.as_str(), &settings.title, &settings.description, text);
                report.pages.push(self.write_page(&page)?);
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        report.urls = self.registry.canonical_urls(&self.config.site.base_url);
        let updater = SitemapUpdater::new(&self.config.sitemap, self.today);
        report.sitemap = updater.update_file(&self.paths.sitemap, &report.urls)?;

        info!("Done. {} URLs", report.urls.len());
        Ok(report)
    }

    /// Load the display-language text of every entity, keyed by content file name
    fn load_texts(&self, catalog: &Catalog, report: &mut BuildReport) -> HashMap<String, String> {
        let language = &self.config.site.language;
        let mut texts = HashMap::new();

        for entry in catalog.entries() {
            let path = self.paths.content_dir.join(&entry.file_name);
            let loaded = try_load_content(&path).and_then(|doc| {
                doc.text(language)
                    .map(str::to_string)
                    .ok_or_else(|| ContentError::MissingLanguage {
                        path: path.clone(),
                        language: language.clone(),
                    })
            });

            match loaded {
                Ok(text) => {
                    texts.insert(entry.file_name, text);
                }
                Err(e) => {
                    match &e {
                        ContentError::MissingFile(_) => debug!("Skipping {}: {}", entry.file_name, e),
                        _ => warn!("Skipping {}: {}", entry.file_name, e),
                    }
                    report.skipped.push(SkippedEntity {
                        file_name: entry.file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        texts
    }

    fn write_page(&mut self, page: &PageDescriptor) -> Result<PathBuf> {
        let html = self.layout.build_page(
            &page.title,
            &page.description,
            &page.canonical_path,
            &page.body_html,
            &page.nav_extras,
        );
        let path = self.paths.output_dir.join(&page.output_path);
        FileManager::write_to_file(&path, &html)
            .with_context(|| format!("Failed to write page {}", page.output_path))?;
        self.registry.register(page.canonical_path.clone());
        debug!("Wrote {}/{}", self.config.paths.guides_dir, page.output_path);
        Ok(path)
    }

    fn page_path(&self, relative: &str) -> String {
        format!("{}/{}", self.guides_prefix, relative)
    }

    fn guide_links(&self) -> Vec<NavLink> {
        self.config
            .catalog
            .guides
            .iter()
            .map(|g| NavLink::new(self.page_path(&format!("{}.html", g.slug)), g.nav_label.clone()))
            .collect()
    }

    fn article(&self, heading: &str, before: &str, content_html: &str, after: &str) -> String {
        format!(
            "<article><h1>{}</h1>{}{}{}{}</article>",
            escape_attribute(heading),
            before,
            content_html,
            after,
            self.layout.call_to_action()
        )
    }

    fn heroes_index(&mut self, catalog: &Catalog, texts: &HashMap<String, String>) -> PageDescriptor {
        let config: &'a Config = self.config;
        let site = &config.site;
        let (first, last) = catalog.generation_range().unwrap_or((0, 0));
        let mut grid = String::new();

        for (generation, heroes) in &catalog.generations {
            grid.push_str(&format!("<h2>Generation {}</h2><div class=\"hero-grid\">", generation));
            for hero in heroes {
                let name = escape_attribute(&slug_title(&hero.slug));
                if texts.contains_key(&hero.file_name) {
                    let href = self.page_path(&hero.output_path());
                    grid.push_str(&format!("<a href=\"{}\">{}</a>", escape_attribute(&href), name));
                    self.registry.register(href);
                } else {
                    grid.push_str(&format!("<span style=\"color:#aab8d6\">{}</span>", name));
                }
            }
            grid.push_str("</div>");

            let summary = CatalogEntry::generation_summary(*generation);
            if texts.contains_key(&summary.file_name) {
                let href = self.page_path(&summary.output_path());
                grid.push_str(&format!(
                    "<p><a href=\"{}\">Gen {} summary</a></p>",
                    escape_attribute(&href),
                    generation
                ));
                self.registry.register(href);
            }
        }

        let mut nav_extras = vec![NavLink::new(self.page_path("experts/"), "Experts")];
        nav_extras.extend(self.guide_links());

        PageDescriptor {
            output_path: "heroes/index.html".to_string(),
            canonical_path: self.page_path("heroes/"),
            title: format!("Heroes Guide Gen {}–{} | {}", first, last, site.site_name),
            description: format!(
                "{} hero guides Gen {} to {}. Join {} Discord.",
                site.game_name, first, last, site.site_name
            ),
            body_html: self.article(
                &format!("{} Heroes Gen {}–{}", site.game_name, first, last),
                "<p>Guides and meta. Join Discord for more.</p>",
                &grid,
                "",
            ),
            nav_extras,
        }
    }

    fn generation_page(&self, generation: u32, text: &str) -> PageDescriptor {
        let site = &self.config.site;
        PageDescriptor {
            output_path: CatalogEntry::generation_summary(generation).output_path(),
            canonical_path: self.page_path(&CatalogEntry::generation_summary(generation).output_path()),
            title: format!("Gen {} Meta | {}", generation, site.site_name),
            description: format!("Gen {} hero meta. Join {} Discord.", generation, site.site_name),
            body_html: self.article(
                &format!("Gen {} Meta", generation),
                "",
                &format!("<div class=\"content\">{}</div>", render_markdown_subset(text)),
                &format!("<p><a href=\"{}\">All heroes</a></p>", self.page_path("heroes/")),
            ),
            nav_extras: Vec::new(),
        }
    }

    fn hero_page(&self, hero: &CatalogEntry, generation: u32, text: &str, has_summary: bool) -> PageDescriptor {
        let name = slug_title(&hero.slug);
        let all = format!("<a href=\"{}\">All</a>", self.page_path("heroes/"));
        let links = if has_summary {
            let summary = CatalogEntry::generation_summary(generation);
            format!(
                "<p><a href=\"{}\">Gen {}</a> · {}</p>",
                self.page_path(&summary.output_path()),
                generation,
                all
            )
        } else {
            format!("<p>{}</p>", all)
        };

        PageDescriptor {
            output_path: hero.output_path(),
            canonical_path: self.page_path(&hero.output_path()),
            title: format!("{} Gen {} | {}", name, generation, self.config.site.site_name),
            description: plain_excerpt(text, DESCRIPTION_CHARS),
            body_html: self.article(
                &format!("{} (Gen {})", name, generation),
                &links,
                &format!("<div class=\"content\">{}</div>", render_markdown_subset(text)),
                "",
            ),
            nav_extras: Vec::new(),
        }
    }

    fn experts_index(&mut self, catalog: &Catalog, texts: &HashMap<String, String>) -> PageDescriptor {
        let config: &'a Config = self.config;
        let site = &config.site;
        let mut grid = String::from("<div class=\"hero-grid\">");
        for expert in catalog.experts.iter().filter(|e| texts.contains_key(&e.file_name)) {
            let href = self.page_path(&expert.output_path());
            grid.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_attribute(&href),
                escape_attribute(&slug_title(&expert.slug))
            ));
            self.registry.register(href);
        }
        grid.push_str("</div>");

        let mut nav_extras = vec![NavLink::new(self.page_path("heroes/"), "Heroes")];
        nav_extras.extend(self.guide_links());

        PageDescriptor {
            output_path: "experts/index.html".to_string(),
            canonical_path: self.page_path("experts/"),
            title: format!("Experts Guide | {}", site.site_name),
            description: format!("{} Experts. Join {} Discord.", site.game_name, site.site_name),
            body_html: self.article("Experts Guide", "<p>F2P vs P4W, affinity. Join Discord.</p>", &grid, ""),
            nav_extras,
        }
    }

    fn expert_page(&self, expert: &CatalogEntry, text: &str) -> PageDescriptor {
        let title = slug_title(&expert.slug);
        PageDescriptor {
            output_path: expert.output_path(),
            canonical_path: self.page_path(&expert.output_path()),
            title: format!("{} Expert | {}", title, self.config.site.site_name),
            description: plain_excerpt(text, DESCRIPTION_CHARS),
            body_html: self.article(
                &title,
                &format!("<p><a href=\"{}\">All experts</a></p>", self.page_path("experts/")),
                &format!("<div class=\"content\">{}</div>", render_markdown_subset(text)),
                "",
            ),
            nav_extras: Vec::new(),
        }
    }

    fn guide_page(&self, guide: &CatalogEntry, heading: &str, title: &str, description: &str, text: &str) -> PageDescriptor {
        PageDescriptor {
            output_path: guide.output_path(),
            canonical_path: self.page_path(&guide.output_path()),
            title: title.to_string(),
            description: description.to_string(),
            body_html: self.article(
                heading,
                "",
                &format!("<div class=\"content\">{}</div>", render_markdown_subset(text)),
                "",
            ),
            nav_extras: vec![
                NavLink::new(self.page_path("heroes/"), "Heroes"),
                NavLink::new(self.page_path("experts/"), "Experts"),
            ],
        }
    }
}
