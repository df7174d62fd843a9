use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::app_config::{CatalogConfig, GuideConfig};
use crate::file_utils::FileManager;

// @module: Entity catalog

/// What kind of page an entity becomes
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A hero released in `generation`
    Hero { generation: u32 },
    /// The meta summary of one generation
    GenerationSummary { generation: u32 },
    /// An expert guide discovered by file pattern
    Expert,
    /// A standalone guide page
    Guide(GuideConfig),
}

/// One entity and the content file it is rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub slug: String,
    pub kind: EntityKind,
    pub file_name: String,
}

impl CatalogEntry {
    pub fn hero(slug: &str, generation: u32) -> Self {
        Self {
            slug: slug.to_string(),
            kind: EntityKind::Hero { generation },
            file_name: format!("{}.json", slug),
        }
    }

    pub fn generation_summary(generation: u32) -> Self {
        Self {
            slug: format!("gen-{}", generation),
            kind: EntityKind::GenerationSummary { generation },
            file_name: format!("gen{}_summary.json", generation),
        }
    }

    pub fn expert(slug: &str, file_name: &str) -> Self {
        Self {
            slug: slug.to_string(),
            kind: EntityKind::Expert,
            file_name: file_name.to_string(),
        }
    }

    pub fn guide(guide: &GuideConfig) -> Self {
        Self {
            slug: guide.slug.clone(),
            kind: EntityKind::Guide(guide.clone()),
            file_name: guide.file.clone(),
        }
    }

    /// Output location relative to the guides directory
    pub fn output_path(&self) -> String {
        match &self.kind {
            EntityKind::Hero { .. } | EntityKind::GenerationSummary { .. } => {
                format!("heroes/{}.html", self.slug)
            }
            EntityKind::Expert => format!("experts/{}.html", self.slug),
            EntityKind::Guide(_) => format!("{}.html", self.slug),
        }
    }
}

/// The full set of entities for one build run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Generations in ascending order, each with its heroes in configured order
    pub generations: Vec<(u32, Vec<CatalogEntry>)>,
    pub experts: Vec<CatalogEntry>,
    pub guides: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build the catalog from configuration, discovering expert documents in `content_dir`
    pub fn discover(config: &CatalogConfig, content_dir: &Path) -> Result<Self> {
        let mut generations: Vec<(u32, Vec<CatalogEntry>)> = config
            .generations
            .iter()
            .map(|g| {
                let heroes = g.heroes.iter().map(|slug| CatalogEntry::hero(slug, g.generation)).collect();
                (g.generation, heroes)
            })
            .collect();
        generations.sort_by_key(|(generation, _)| *generation);

        let mut experts = Vec::new();
        for path in FileManager::find_files_with_prefix(content_dir, &config.expert_prefix, "json")? {
            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if config.reserved_expert_files.contains(&file_name) {
                debug!("Skipping reserved expert file: {}", file_name);
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let slug = stem.strip_prefix(config.expert_prefix.as_str()).unwrap_or(&stem);
            if slug.is_empty() {
                continue;
            }
            experts.push(CatalogEntry::expert(slug, &file_name));
        }

        let guides = config.guides.iter().map(CatalogEntry::guide).collect();

        Ok(Self {
            generations,
            experts,
            guides,
        })
    }

    /// Lowest and highest configured generation
    pub fn generation_range(&self) -> Option<(u32, u32)> {
        let first = self.generations.first()?.0;
        let last = self.generations.last()?.0;
        Some((first, last))
    }

    /// Every entity, in build order
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.generations
            .iter()
            .flat_map(|(generation, heroes)| {
                heroes.iter().cloned().chain(std::iter::once(CatalogEntry::generation_summary(*generation)))
            })
            .chain(self.experts.iter().cloned())
            .chain(self.guides.iter().cloned())
    }
}
