use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use super::TableSource;
use crate::error::{DataError, DataResult};

/// Fetches documents from an HTTP root, e.g. a raw file host
pub struct HttpSource {
    client: Client,
    root: String,
    retries: u32,
}

impl HttpSource {
    pub fn new(root: &str, timeout: Duration, retries: u32) -> DataResult<Self> {
        let client = Client::builder()
            .user_agent("ba-data")
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::unavailable(root, e))?;

        let mut root = root.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }

        Ok(Self {
            client,
            root,
            retries,
        })
    }

    fn try_fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

impl TableSource for HttpSource {
    fn fetch(&self, file: &str) -> DataResult<String> {
        let url = format!("{}{}", self.root, file);
        let mut last_error = String::new();

        for attempt in 0..=self.retries {
            match self.try_fetch(&url) {
                Ok(text) => {
                    debug!(url = %url, bytes = text.len(), "Fetched document");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(url = %url, attempt, error = %e, "Fetch failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(DataError::unavailable(
            file,
            format!("{} after {} attempts: {}", url, self.retries + 1, last_error),
        ))
    }
}

/// Reads documents from a local directory
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSource for DirSource {
    fn fetch(&self, file: &str) -> DataResult<String> {
        let path = self.dir.join(file);
        fs::read_to_string(&path)
            .map_err(|e| DataError::unavailable(file, format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_http_root_gets_trailing_slash() {
        let source = HttpSource::new("https://example.invalid/Excel", Duration::from_secs(1), 0)
            .unwrap();
        assert_eq!(source.root, "https://example.invalid/Excel/");
    }

    #[test]
    fn test_http_retries_are_bounded() {
        let source = HttpSource::new("http://127.0.0.1:1", Duration::from_secs(2), 1).unwrap();

        match source.fetch("A.json") {
            Err(DataError::SourceUnavailable { table, reason }) => {
                assert_eq!(table, "A.json");
                assert!(reason.starts_with("http://127.0.0.1:1/A.json"), "{}", reason);
                assert!(reason.contains("after 2 attempts"), "{}", reason);
            }
            other => panic!("expected SourceUnavailable, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_dir_source_reads_and_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.json"), r#"{"DataList": []}"#).unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch("A.json").unwrap(), r#"{"DataList": []}"#);

        let err = source.fetch("B.json").unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { ref table, .. } if table == "B.json"));
    }
}
