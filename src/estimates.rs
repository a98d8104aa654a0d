//! Decoding of criterion `estimates.json` files.
//!
//! Only the median point estimate is read. The rest of the document is
//! accepted in whatever shape it has.

use serde_json::Value;
use std::path::{Component, Path};

/// Read and decode an estimate file as JSON.
pub fn read_estimates(path: &Path) -> Result<Value, Skip> {
    let contents = std::fs::read_to_string(path).map_err(Skip::Read)?;
    serde_json::from_str(&contents).map_err(Skip::Decode)
}

/// Look up `median.point_estimate`, treating any missing or non-numeric
/// level as absent.
pub fn median_point_estimate(estimates: &Value) -> Option<f64> {
    estimates
        .get("median")
        .and_then(|m| m.get("point_estimate"))
        .and_then(|p| p.as_f64())
}

/// Benchmark identity derived from the directories following the anchor.
///
/// Segments past the end of the path are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchIdentity {
    pub bench: String,
    pub group: String,
    pub param: String,
}

impl BenchIdentity {
    /// Derive the identity of an estimate file from its directory path.
    ///
    /// The first directory component equal to `anchor` marks where identity
    /// segments begin. The file name itself is never an identity segment.
    pub fn from_path(path: &Path, anchor: &str) -> Result<Self, Skip> {
        let segments: Vec<String> = path
            .parent()
            .map(|dir| {
                dir.components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let i = segments
            .iter()
            .position(|s| s == anchor)
            .ok_or(Skip::MissingAnchor)?;

        let segment = |offset: usize| segments.get(i + offset).cloned().unwrap_or_default();

        Ok(Self {
            bench: segment(1),
            group: segment(2),
            param: segment(3),
        })
    }
}

/// Reason an estimate file produced no row. Never fatal.
#[derive(Debug)]
pub enum Skip {
    /// The file could not be read.
    Read(std::io::Error),
    /// The file is not valid JSON.
    Decode(serde_json::Error),
    /// No path segment equals the anchor.
    MissingAnchor,
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skip::Read(e) => write!(f, "unreadable: {e}"),
            Skip::Decode(e) => write!(f, "invalid JSON: {e}"),
            Skip::MissingAnchor => write!(f, "no anchor segment in path"),
        }
    }
}
