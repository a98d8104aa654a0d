use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Layout of criterion output on disk.
///
/// Every field has a default matching criterion's standard layout, so a
/// partial TOML file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Fixed result root, relative to the base directory.
    pub root: PathBuf,
    /// Glob matching one result root per workspace member.
    pub member_glob: String,
    /// Exact name of the estimate files to collect.
    pub file_name: String,
    /// Path segment after which benchmark identity segments begin.
    pub anchor: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("target/criterion"),
            member_glob: "crates/*/target/criterion".to_string(),
            file_name: "estimates.json".to_string(),
            anchor: "criterion".to_string(),
        }
    }
}

/// Load layout overrides from a TOML file.
pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors from loading an explicitly requested config file.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_criterion_layout() {
        let cfg = ReportConfig::default();
        assert_eq!(cfg.root, PathBuf::from("target/criterion"));
        assert_eq!(cfg.member_glob, "crates/*/target/criterion");
        assert_eq!(cfg.file_name, "estimates.json");
        assert_eq!(cfg.anchor, "criterion");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "member_glob = \"libs/*/target/criterion\"\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.member_glob, "libs/*/target/criterion");
        assert_eq!(cfg.root, PathBuf::from("target/criterion"));
        assert_eq!(cfg.anchor, "criterion");
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ReportConfig::default());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "anchor = [").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
