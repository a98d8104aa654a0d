//! Result root discovery and estimate file search.
//!
//! All returned paths are relative to the base directory the search ran in,
//! so output reads the same whether the process was started inside the
//! project or pointed at it with `--dir`.

use crate::config::ReportConfig;
use std::path::{Path, PathBuf};

/// Find the result roots under `base`: the fixed root first, then every
/// match of the member glob in the order the glob yields them.
///
/// Fails only when the filesystem cannot be probed at all or the glob
/// pattern itself is invalid. Zero roots is a normal, empty result.
pub fn discover_roots(base: &Path, config: &ReportConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut roots = Vec::new();

    let fixed = base.join(&config.root);
    let exists = fixed.try_exists().map_err(|e| DiscoveryError::Probe {
        path: fixed.clone(),
        source: e,
    })?;
    if exists {
        tracing::debug!(root = %config.root.display(), "found fixed result root");
        roots.push(config.root.clone());
    }

    let pattern = member_pattern(base, &config.member_glob);
    let matches = glob::glob(&pattern).map_err(|e| DiscoveryError::Pattern {
        pattern: pattern.clone(),
        source: e,
    })?;

    for entry in matches {
        match entry {
            Ok(path) => {
                let rel = relative_to(base, &path);
                tracing::debug!(root = %rel.display(), "found member result root");
                roots.push(rel);
            }
            Err(e) => {
                tracing::debug!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "skipping unreadable glob entry"
                );
            }
        }
    }

    Ok(roots)
}

/// Recursively collect every file named exactly `file_name` beneath `root`.
///
/// `root` is relative to `base`. Entries are visited in name order within
/// each directory, and symlinked directories are not followed. Unreadable
/// directories are skipped along with their subtree.
pub fn find_estimate_files(base: &Path, root: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_recursive(base, root, file_name, &mut files);
    files
}

fn collect_recursive(base: &Path, dir: &Path, file_name: &str, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(base.join(dir)) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let path = dir.join(&name);
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            collect_recursive(base, &path, file_name, files);
        } else if name.to_str() == Some(file_name) {
            files.push(path);
        }
    }
}

/// Build the glob pattern for member roots, escaping any glob syntax in `base`.
fn member_pattern(base: &Path, member_glob: &str) -> String {
    let escaped = glob::Pattern::escape(&base.to_string_lossy());
    Path::new(&escaped)
        .join(member_glob)
        .to_string_lossy()
        .into_owned()
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Fatal errors from root discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The existence check for a root could not be performed.
    Probe {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The member glob is not a valid pattern.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::Probe { path, source } => {
                write!(f, "failed to probe result root {}: {source}", path.display())
            }
            DiscoveryError::Pattern { pattern, source } => {
                write!(f, "invalid result root pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::Probe { source, .. } => Some(source),
            DiscoveryError::Pattern { source, .. } => Some(source),
        }
    }
}
