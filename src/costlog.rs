//! Buffered per-run file log of the iteration-cost stream.
//!
//! One value per line, written with Rust's shortest round-trip `f64`
//! formatting. Identical runs therefore produce byte-identical files, and
//! every line parses back to the exact bits that were recorded. The
//! analyzers in [`crate::analysis`] rely on this to group runs by exact
//! cost.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::sa::CostSink;

/// Buffered lines are appended to the file once this many accumulate.
pub const FLUSH_THRESHOLD: usize = 500;

/// Prefix of the trailer line holding the run's best cost.
pub const FINAL_COST_PREFIX: &str = "Final solution cost: ";

/// A [`CostSink`] that appends costs to a file in batches.
///
/// Recording never fails: the first I/O error is kept, later writes are
/// skipped, and the error surfaces from [`finish`](FileCostLog::finish).
/// A log dropped without `finish` (for example when the run failed) still
/// writes its pending costs, but no trailer.
#[derive(Debug)]
pub struct FileCostLog {
    path: PathBuf,
    lines: Vec<String>,
    error: Option<io::Error>,
}

impl FileCostLog {
    /// Creates (or truncates) the log file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;
        Ok(Self {
            path,
            lines: Vec::with_capacity(FLUSH_THRESHOLD + 1),
            error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes pending lines plus the trailer with `best_cost`.
    pub fn finish(mut self, best_cost: f64) -> io::Result<()> {
        self.lines.push(format!("{FINAL_COST_PREFIX}{best_cost}"));
        self.flush_lines();
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn flush_lines(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        if self.error.is_none() {
            if let Err(err) = self.append() {
                tracing::warn!(path = %self.path.display(), error = %err, "cost log write failed");
                self.error = Some(err);
            }
        }
        self.lines.clear();
    }

    fn append(&self) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        let mut buf = String::new();
        for line in &self.lines {
            buf.push_str(line);
            buf.push('\n');
        }
        file.write_all(buf.as_bytes())
    }
}

impl Drop for FileCostLog {
    fn drop(&mut self) {
        self.flush_lines();
    }
}

impl CostSink for FileCostLog {
    fn record(&mut self, cost: f64) {
        self.lines.push(cost.to_string());
        if self.lines.len() > FLUSH_THRESHOLD {
            self.flush_lines();
        }
    }
}
