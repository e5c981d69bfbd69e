//! JSON workbook corpus source.
//!
//! The workbook is a JSON object mapping partition names to rows, where
//! each row is an array of cells:
//!
//! ```json
//! {
//!   "Sheet1": [["What is the admission deadline?", "March 1st."]],
//!   "Sheet2": [["Is hostel available?", "Yes, for first-year students.", "note"]]
//! }
//! ```
//!
//! Column 0 is the question and column 1 the answer; further columns are
//! kept on rewrite but otherwise ignored. String and number cells are read
//! as text; anything else counts as empty.

use guidance_application::ports::corpus_source::{CorpusSource, CorpusSourceError};
use guidance_domain::CorpusEntry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

type Workbook = BTreeMap<String, Vec<Vec<Value>>>;

/// Errors reading or writing the workbook file
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Workbook not found: {0}")]
    NotFound(PathBuf),

    #[error("Partition '{partition}' not found in {path}")]
    MissingPartition { path: PathBuf, partition: String },

    #[error("Invalid workbook {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<WorkbookError> for CorpusSourceError {
    fn from(e: WorkbookError) -> Self {
        match &e {
            WorkbookError::NotFound(_) => CorpusSourceError::NotFound(e.to_string()),
            WorkbookError::MissingPartition { partition, .. } => {
                CorpusSourceError::MissingPartition(partition.clone())
            }
            WorkbookError::Parse { .. } => CorpusSourceError::Malformed(e.to_string()),
            WorkbookError::Io { .. } => CorpusSourceError::Io(e.to_string()),
        }
    }
}

/// Corpus source backed by a JSON workbook file.
pub struct JsonWorkbookSource {
    path: PathBuf,
}

impl JsonWorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Workbook, WorkbookError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                WorkbookError::NotFound(self.path.clone())
            } else {
                WorkbookError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|source| WorkbookError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, workbook: &Workbook) -> Result<(), WorkbookError> {
        let content =
            serde_json::to_string_pretty(workbook).map_err(|source| WorkbookError::Parse {
                path: self.path.clone(),
                source,
            })?;
        super::write_atomic(&self.path, &content).map_err(|source| WorkbookError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn cell_text(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Question/answer pair from a row, if the row is usable
fn parse_row(row: &[Value]) -> Option<CorpusEntry> {
    let question = cell_text(row.first())?;
    let answer = cell_text(row.get(1))?;
    if question.trim().is_empty() {
        return None;
    }
    Some(CorpusEntry::new(question, answer))
}

impl CorpusSource for JsonWorkbookSource {
    fn load(&self, partitions: &[String]) -> Result<Vec<CorpusEntry>, CorpusSourceError> {
        let workbook = self.read()?;
        let mut entries = Vec::new();

        for name in partitions {
            let rows = workbook
                .get(name)
                .ok_or_else(|| WorkbookError::MissingPartition {
                    path: self.path.clone(),
                    partition: name.clone(),
                })?;
            let before = entries.len();
            entries.extend(rows.iter().filter_map(|row| parse_row(row)));
            let kept = entries.len() - before;
            if kept < rows.len() {
                debug!(
                    "Skipped {} unusable row(s) in partition '{}'",
                    rows.len() - kept,
                    name
                );
            }
        }

        Ok(entries)
    }

    fn append(&self, partition: &str, entry: &CorpusEntry) -> Result<(), CorpusSourceError> {
        let mut workbook = self.read()?;
        let rows = workbook.entry(partition.to_string()).or_insert_with(|| {
            info!("Creating partition '{}' in {}", partition, self.path.display());
            Vec::new()
        });
        rows.push(vec![
            Value::String(entry.question.clone()),
            Value::String(entry.answer.clone()),
        ]);
        self.write(&workbook)?;
        Ok(())
    }
}
