use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Region, TableSource};
use crate::error::DataResult;

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "ba-data")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get path to a region's document directory
    pub fn region_dir(&self, region: Region) -> PathBuf {
        self.cache_dir.join(region.as_str())
    }

    /// Check if a document is already cached
    pub fn is_cached(&self, region: Region, file: &str) -> bool {
        self.region_dir(region).join(file).exists()
    }

    /// Remove every cached document for a region
    pub fn clear(&self, region: Region) -> Result<()> {
        let dir = self.region_dir(region);
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to clear cache: {:?}", dir))?;
        }
        Ok(())
    }

    /// Wrap a source so its documents are read from and written to this cache
    pub fn wrap<S: TableSource>(&self, region: Region, inner: S, refresh: bool) -> Result<CachedSource<S>> {
        let dir = self.region_dir(region);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", dir))?;
        Ok(CachedSource { inner, dir, refresh })
    }
}

/// A source backed by an on-disk copy of each fetched document
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
    refresh: bool,
}

impl<S: TableSource> TableSource for CachedSource<S> {
    fn fetch(&self, file: &str) -> DataResult<String> {
        let path = self.dir.join(file);

        if !self.refresh {
            match fs::read_to_string(&path) {
                Ok(text) if is_document(&text) => {
                    debug!(path = ?path, "Cache hit");
                    return Ok(text);
                }
                Ok(_) => warn!(path = ?path, "Ignoring unreadable cached document"),
                Err(_) => debug!(path = ?path, "Cache miss"),
            }
        }

        let text = self.inner.fetch(file)?;
        if !is_document(&text) {
            warn!(file, "Not caching a body without a DataList array");
            return Ok(text);
        }

        if let Err(e) = write_atomic(&path, &text) {
            warn!(path = ?path, error = %e, "Failed to write cached document");
        }
        Ok(text)
    }
}

/// Whether a body parses as a `{"DataList": [...]}` document
fn is_document(text: &str) -> bool {
    serde_json::from_str::<Value>(text)
        .map(|doc| doc.get("DataList").is_some_and(Value::is_array))
        .unwrap_or(false)
}

/// Write next to the target, then rename into place
fn write_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, text)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::schema::tables::ITEMS;
    use crate::source::load;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    const V1: &str = r#"{"DataList": [{"Id": 1}]}"#;
    const V2: &str = r#"{"DataList": [{"Id": 2}]}"#;

    /// Counts fetches and serves a replaceable body
    struct Counting {
        body: Mutex<String>,
        calls: AtomicU32,
    }

    impl Counting {
        fn new(body: &str) -> Self {
            Self {
                body: Mutex::new(body.to_string()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TableSource for &Counting {
        fn fetch(&self, file: &str) -> DataResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if file == "Missing.json" {
                return Err(DataError::unavailable(file, "not found"));
            }
            Ok(self.body.lock().unwrap().clone())
        }
    }

    #[test]
    fn test_cached_documents_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let upstream = Counting::new(V1);

        let source = cache.wrap(Region::Primary, &upstream, false).unwrap();
        assert_eq!(source.fetch("A.json").unwrap(), V1);
        assert_eq!(source.fetch("A.json").unwrap(), V1);
        assert_eq!(upstream.calls(), 1);
        assert!(cache.is_cached(Region::Primary, "A.json"));
        assert!(!cache.is_cached(Region::Global, "A.json"));
    }

    #[test]
    fn test_refresh_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let upstream = Counting::new(V1);
        cache.wrap(Region::Global, &upstream, false).unwrap().fetch("A.json").unwrap();

        *upstream.body.lock().unwrap() = V2.to_string();
        let refreshed = cache.wrap(Region::Global, &upstream, true).unwrap();
        assert_eq!(refreshed.fetch("A.json").unwrap(), V2);

        let cached = cache.wrap(Region::Global, &upstream, false).unwrap();
        assert_eq!(cached.fetch("A.json").unwrap(), V2);
        assert_eq!(upstream.calls(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let upstream = Counting::new(V1);
        let source = cache.wrap(Region::Primary, &upstream, false).unwrap();

        assert!(source.fetch("Missing.json").is_err());
        assert!(!cache.is_cached(Region::Primary, "Missing.json"));

        cache.clear(Region::Primary).unwrap();
        assert!(!cache.region_dir(Region::Primary).exists());
    }

    #[test]
    fn test_error_pages_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let upstream = Counting::new("<html>rate limited</html>");
        let source = cache.wrap(Region::Primary, &upstream, false).unwrap();

        assert!(load(&source, &ITEMS).is_err());
        assert!(!cache.is_cached(Region::Primary, ITEMS.source_file));

        *upstream.body.lock().unwrap() = V1.to_string();
        assert_eq!(load(&source, &ITEMS).unwrap().len(), 1);
        assert_eq!(load(&source, &ITEMS).unwrap().len(), 1);
        assert_eq!(upstream.calls(), 2);
    }

    #[test]
    fn test_corrupt_cached_documents_are_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let upstream = Counting::new(V1);
        let source = cache.wrap(Region::Primary, &upstream, false).unwrap();

        let path = cache.region_dir(Region::Primary).join("A.json");
        fs::write(&path, r#"{"DataList": [{"Id"#).unwrap();

        assert_eq!(source.fetch("A.json").unwrap(), V1);
        assert_eq!(fs::read_to_string(&path).unwrap(), V1);
        assert!(!cache.region_dir(Region::Primary).join("A.json.part").exists());
        assert_eq!(upstream.calls(), 1);
    }
}
