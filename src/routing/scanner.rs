//! Handler-tree scanning and route extraction.
//!
//! # Responsibilities
//! - Recursively enumerate handler files under the configured root
//! - Parse the declarative header of each file into a RouteDescriptor
//! - Produce descriptors in a deterministic traversal order
//!
//! # Design Decisions
//! - Only a bounded file prefix is read (HEADER_PREFIX_BYTES); scan cost per
//!   file stays constant no matter how large handlers grow
//! - Marker lines must appear within the first HEADER_LINE_LIMIT lines
//! - Directory entries are sorted by name and visited depth-first, so table
//!   precedence does not depend on filesystem enumeration order
//! - Files without route markers are skipped silently; a malformed method
//!   list or an unreadable directory aborts the whole scan

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ScanConvention;
use crate::routing::descriptor::{is_known_method, RouteDescriptor, PARAM_MARKER};

/// Bytes read from the head of each handler file. Route metadata must live
/// inside this window.
pub const HEADER_PREFIX_BYTES: usize = 256;

/// Number of leading lines inspected for marker lines.
pub const HEADER_LINE_LIMIT: usize = 5;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Route line ends with `]` but contains no opening `[`.
    #[error("malformed method list in {path}: route line ends with ']' but has no '['")]
    MalformedMethodList { path: PathBuf },

    /// Method list names something outside the recognized HTTP methods.
    #[error("unknown HTTP method {method:?} declared in {path}")]
    UnknownMethod { path: PathBuf, method: String },

    /// Two parameter segments in one template share a name.
    #[error("duplicate path parameter {name:?} in {path}")]
    DuplicateParam { path: PathBuf, name: String },
}

/// Walk `root` and extract a descriptor from every eligible handler file.
///
/// The returned order is the traversal order and becomes the route table's
/// precedence order.
pub fn scan(root: &Path, convention: &ScanConvention) -> Result<Vec<RouteDescriptor>, ScanError> {
    let mut routes = Vec::new();
    scan_dir(root, convention, &mut routes)?;
    tracing::debug!(root = %root.display(), routes = routes.len(), "Handler scan complete");
    Ok(routes)
}

fn scan_dir(
    dir: &Path,
    convention: &ScanConvention,
    routes: &mut Vec<RouteDescriptor>,
) -> Result<(), ScanError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(entry.path());
    }
    // Sorted traversal keeps precedence stable across filesystems.
    entries.sort();

    for path in entries {
        if path.is_dir() {
            scan_dir(&path, convention, routes)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(convention.extension.as_str())
        {
            if let Some(descriptor) = extract_descriptor(&path, convention)? {
                tracing::trace!(
                    handler = %path.display(),
                    template = %descriptor.template,
                    "Route discovered"
                );
                routes.push(descriptor);
            }
        }
    }
    Ok(())
}

/// Parse the leading lines of one handler file.
///
/// Returns `Ok(None)` for files that carry no route declaration; only
/// structural errors (bad method list, I/O failure) are surfaced.
fn extract_descriptor(
    path: &Path,
    convention: &ScanConvention,
) -> Result<Option<RouteDescriptor>, ScanError> {
    let head = read_prefix(path)?;

    // Cheap rejections before any line parsing.
    if !head.starts_with(&convention.opening) || !head.contains(&convention.route_marker) {
        return Ok(None);
    }

    let lines: Vec<&str> = head.lines().take(HEADER_LINE_LIMIT).collect();

    let raw_route = lines
        .iter()
        .find_map(|line| marker_payload(line, &convention.route_marker));
    let raw_route = match raw_route {
        Some(r) => r,
        None => return Ok(None),
    };

    let (template, methods) = parse_route_line(raw_route, path)?;
    check_param_names(&template, path)?;

    let auth_rule = lines
        .iter()
        .find_map(|line| marker_payload(line, &convention.auth_marker))
        .filter(|rule| !rule.is_empty())
        .map(str::to_string);

    Ok(Some(RouteDescriptor {
        template,
        methods,
        auth_rule,
        handler_ref: path.to_path_buf(),
    }))
}

fn read_prefix(path: &Path) -> Result<String, ScanError> {
    let mut file = File::open(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = [0u8; HEADER_PREFIX_BYTES];
    let mut filled = 0;
    // A single read may return short; fill until EOF or the cap.
    loop {
        let n = file
            .read(&mut buf[filled..])
            .map_err(|source| ScanError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 || filled == HEADER_PREFIX_BYTES {
            break;
        }
        filled += n;
    }
    Ok(String::from_utf8_lossy(&buf[..filled]).into_owned())
}

/// Everything after `marker` on this line, trimmed, if the marker occurs.
fn marker_payload<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker)
        .map(|idx| line[idx + marker.len()..].trim())
}

/// Split a raw route line into template and optional method set.
///
/// `"/user/:id [GET, POST]"` → `("/user/:id", Some({GET, POST}))`.
fn parse_route_line(
    raw: &str,
    path: &Path,
) -> Result<(String, Option<BTreeSet<String>>), ScanError> {
    if !raw.ends_with(']') {
        return Ok((raw.to_string(), None));
    }

    let open = raw.rfind('[').ok_or_else(|| ScanError::MalformedMethodList {
        path: path.to_path_buf(),
    })?;

    let mut methods = BTreeSet::new();
    for entry in raw[open + 1..raw.len() - 1].split(',') {
        let method = entry.trim().to_uppercase();
        if method.is_empty() {
            continue;
        }
        if !is_known_method(&method) {
            return Err(ScanError::UnknownMethod {
                path: path.to_path_buf(),
                method,
            });
        }
        methods.insert(method);
    }

    let template = raw[..open].trim().to_string();
    // `[]` declares nothing; treat like an absent list (any method).
    let methods = if methods.is_empty() { None } else { Some(methods) };
    Ok((template, methods))
}

fn check_param_names(template: &str, path: &Path) -> Result<(), ScanError> {
    let mut seen = BTreeSet::new();
    for segment in template.trim_matches('/').split('/') {
        if let Some(name) = segment.strip_prefix(PARAM_MARKER) {
            if !seen.insert(name.to_string()) {
                return Err(ScanError::DuplicateParam {
                    path: path.to_path_buf(),
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
