use std::collections::BTreeSet;

/// Site-relative paths of every page written during one build run.
///
/// Registering the same path twice is a no-op, so pages reachable from more
/// than one place (an index and a cross-reference) are listed once.
/// Iteration is in sorted order, which is also the sitemap order.
#[derive(Debug, Default, Clone)]
pub struct UrlRegistry {
    paths: BTreeSet<String>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path; returns `false` if it was already present
    pub fn register(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Absolute URLs against `base_url`
    pub fn canonical_urls(&self, base_url: &str) -> Vec<String> {
        let base = base_url.trim_end_matches('/');
        self.iter()
            .map(|path| format!("{}/{}", base, path.trim_start_matches('/')))
            .collect()
    }
}
