use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::source::{CacheManager, DirSource, HttpSource, Region, Sources, TableSource};

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub root: String,
    pub global_root: String,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub retries: u32,
    /// Re-download cached documents
    pub refresh: bool,
    pub use_cache: bool,
}

impl SourceConfig {
    pub fn new(root: impl Into<String>, global_root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            global_root: global_root.into(),
            cache_dir: None,
            timeout: Duration::from_secs(30),
            retries: 2,
            refresh: false,
            use_cache: true,
        }
    }

    pub fn cache(&self) -> Result<CacheManager> {
        CacheManager::new(self.cache_dir.clone())
    }

    /// Drop every cached document of both regions
    pub fn clear_cache(&self) -> Result<()> {
        let cache = self.cache()?;
        for region in [Region::Primary, Region::Global] {
            cache.clear(region)?;
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Sources> {
        let cache = if self.use_cache && (is_remote(&self.root) || is_remote(&self.global_root)) {
            Some(self.cache()?)
        } else {
            None
        };

        let primary = self.source(Region::Primary, &self.root, cache.as_ref())?;
        let global = self.source(Region::Global, &self.global_root, cache.as_ref())?;
        Ok(Sources::new(primary, global))
    }

    fn source(
        &self,
        region: Region,
        root: &str,
        cache: Option<&CacheManager>,
    ) -> Result<Box<dyn TableSource>> {
        if !is_remote(root) {
            debug!(%region, root, "Reading documents from directory");
            return Ok(Box::new(DirSource::new(root)));
        }

        let http = HttpSource::new(root, self.timeout, self.retries)
            .with_context(|| format!("Failed to set up HTTP client for {}", root))?;

        match cache {
            Some(cache) => {
                debug!(%region, root, cache = ?cache.region_dir(region), "Fetching documents through cache");
                Ok(Box::new(cache.wrap(region, http, self.refresh)?))
            }
            None => Ok(Box::new(http)),
        }
    }
}

/// Whether a root is fetched over HTTP rather than read from disk
pub fn is_remote(root: &str) -> bool {
    root.starts_with("http://") || root.starts_with("https://")
}
