//! Route table construction.
//!
//! # Data Flow
//! ```text
//! Startup (exactly once):
//!     cache.load()
//!         hit  → RouteTable (provenance: Cache)
//!         miss → scanner::scan(root) → cache.store() → RouteTable (provenance: Scan)
//!     → frozen behind Arc, shared by all requests
//! ```
//!
//! # Design Decisions
//! - Table order is discovery order; first match wins, no specificity scoring
//! - Immutable after construction; rebuilding requires a restart (and a
//!   cache clear, if a record exists)

use std::path::Path;
use thiserror::Error;

use crate::config::ScanConvention;
use crate::routing::cache::{CacheError, RouteCache};
use crate::routing::descriptor::RouteDescriptor;
use crate::routing::scanner::{self, ScanError};

/// Where a constructed table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Cache,
    Scan,
}

/// Errors that prevent table construction; all are fatal at startup.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// The immutable, ordered route collection used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Build the table from the cache record, falling back to a fresh scan
    /// (which is then persisted).
    pub fn load_or_scan(
        cache: &RouteCache,
        handler_root: &Path,
        convention: &ScanConvention,
    ) -> Result<(Self, TableSource), BuildError> {
        if let Some(routes) = cache.load()? {
            return Ok((Self::new(routes), TableSource::Cache));
        }

        let routes = scanner::scan(handler_root, convention)?;
        cache.store(&routes)?;
        Ok((Self::new(routes), TableSource::Scan))
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
