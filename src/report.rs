//! Report collection and rendering.
//!
//! Collection walks every discovered result root, turns each estimate file
//! into a row or a [`Skip`], and keeps only the rows. Rendering writes the
//! rows as a table with a fixed header.

use crate::config::ReportConfig;
use crate::discovery::{self, DiscoveryError};
use crate::estimates::{self, BenchIdentity, Skip};
use std::io::Write;
use std::path::Path;

/// Column names, in output order.
pub const HEADER: [&str; 6] = ["root", "bench", "group", "param", "median_ns", "estimates_path"];

/// Output table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-joined fields with no quoting.
    #[default]
    Plain,
    /// RFC 4180 CSV, quoting fields that contain commas, quotes or newlines.
    Quoted,
}

/// One estimate file's row in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub root: String,
    pub identity: BenchIdentity,
    pub median: Option<f64>,
    pub path: String,
}

impl OutputRow {
    /// Median formatted with six fractional digits, or empty when absent.
    pub fn median_field(&self) -> String {
        match self.median {
            Some(m) => format!("{m:.6}"),
            None => String::new(),
        }
    }

    fn fields(&self) -> [String; 6] {
        [
            self.root.clone(),
            self.identity.bench.clone(),
            self.identity.group.clone(),
            self.identity.param.clone(),
            self.median_field(),
            self.path.clone(),
        ]
    }
}

/// Collected rows, in root-discovery then traversal order.
#[derive(Debug, Default)]
pub struct Report {
    pub roots: usize,
    pub rows: Vec<OutputRow>,
}

impl Report {
    /// Write the header and every row to `out` in the given format.
    pub fn render<W: Write>(&self, out: W, format: OutputFormat) -> std::io::Result<()> {
        match format {
            OutputFormat::Plain => self.render_plain(out),
            OutputFormat::Quoted => self.render_quoted(out),
        }
    }

    fn render_plain<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{}", HEADER.join(","))?;
        for row in &self.rows {
            writeln!(out, "{}", row.fields().join(","))?;
        }
        out.flush()
    }

    fn render_quoted<W: Write>(&self, out: W) -> std::io::Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER).map_err(csv_to_io)?;
        for row in &self.rows {
            writer.write_record(row.fields()).map_err(csv_to_io)?;
        }
        writer.flush()
    }
}

/// Unwrap I/O failures so callers can still match on the error kind.
fn csv_to_io(e: csv::Error) -> std::io::Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => io,
        kind => std::io::Error::other(format!("{kind:?}")),
    }
}

/// Discover result roots under `base` and build a row for every usable
/// estimate file beneath them.
///
/// Files that cannot be read, are not valid JSON, or sit outside the anchor
/// directory are skipped. Only discovery failures are returned as errors.
pub fn collect(base: &Path, config: &ReportConfig) -> Result<Report, DiscoveryError> {
    let roots = discovery::discover_roots(base, config)?;
    let mut rows = Vec::new();

    for root in &roots {
        for path in discovery::find_estimate_files(base, root, &config.file_name) {
            match extract_row(base, root, &path, &config.anchor) {
                Ok(row) => rows.push(row),
                Err(skip) => {
                    tracing::debug!(
                        file = %path.display(),
                        reason = %skip,
                        "skipping estimate file"
                    );
                }
            }
        }
    }

    tracing::info!(roots = roots.len(), rows = rows.len(), "collected benchmark estimates");

    Ok(Report {
        roots: roots.len(),
        rows,
    })
}

/// Build the row for one estimate file. `root` and `path` are relative to `base`.
fn extract_row(base: &Path, root: &Path, path: &Path, anchor: &str) -> Result<OutputRow, Skip> {
    let data = estimates::read_estimates(&base.join(path))?;
    let identity = BenchIdentity::from_path(path, anchor)?;
    Ok(OutputRow {
        root: root.display().to_string(),
        identity,
        median: estimates::median_point_estimate(&data),
        path: path.display().to_string(),
    })
}
