//! Route table persistence.
//!
//! # Responsibilities
//! - Serialize the scanned route table to a JSON record on disk
//! - Reload it on later startups without rescanning the handler tree
//!
//! # Design Decisions
//! - Store writes to a sibling temp file, then renames into place; a
//!   concurrent load never observes a partial record
//! - No TTL and no checksum against handler sources: freshness is the
//!   operator's responsibility (invalidate with `router-cli cache clear`)

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::routing::descriptor::RouteDescriptor;

/// Errors from reading or writing the cache record.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache record at {path} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk snapshot of the route table.
pub struct RouteCache {
    path: PathBuf,
}

impl RouteCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache record, if one exists.
    ///
    /// A missing file is `Ok(None)` (first start); a present but unreadable
    /// or malformed record is an error, surfaced at startup.
    pub fn load(&self) -> Result<Option<Vec<RouteDescriptor>>, CacheError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let routes: Vec<RouteDescriptor> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| CacheError::Format {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(path = %self.path.display(), routes = routes.len(), "Route cache loaded");
        Ok(Some(routes))
    }

    /// Write the route table, creating the parent directory if missing.
    pub fn store(&self, routes: &[RouteDescriptor]) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp_path = self.tmp_path();
        let file = File::create(&tmp_path).map_err(|source| CacheError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, routes).map_err(|source| CacheError::Format {
            path: tmp_path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| CacheError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        // Rename is atomic on the same filesystem.
        std::fs::rename(&tmp_path, &self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), routes = routes.len(), "Route cache stored");
        Ok(())
    }

    /// Remove the cache record. Missing file is not an error.
    pub fn clear(&self) -> Result<bool, CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
