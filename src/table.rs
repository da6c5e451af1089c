//! # Reference Tables
//!
//! One table per characteristic, mapping a keyword to likelihood percentages
//! across demographic buckets.
//!
//! CSV shape:
//! ```text
//! keyword,18-24,25-34,35-44
//! invest,10,45,30
//! gaming,60,25,5
//! ```
//!
//! - The first header cell names the keyword column and is not a bucket.
//! - Bucket indices are 0-based over the remaining header cells.
//! - Rows keep their file order; lookups are case-insensitive.
//!
//! Tables are loaded once and are read-only afterwards.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::TableError;

#[derive(Debug, Clone)]
struct Row {
    keyword: String,
    percentages: Vec<u32>,
}

/// In-memory keyword → bucket percentage table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    labels: Vec<String>,
    rows: Vec<Row>,
    // lowercase keyword -> position in `rows`
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Parse a table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(h) => h?,
            None => return Err(TableError::MissingHeader),
        };
        let labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

        let mut table = Self {
            labels,
            rows: Vec::new(),
            index: HashMap::new(),
        };

        for record in records {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            table.push_record(&record)?;
        }

        debug!(
            target: "profiler",
            buckets = table.labels.len(),
            keywords = table.rows.len(),
            "reference table loaded"
        );
        Ok(table)
    }

    /// Load a table from a CSV file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    fn push_record(&mut self, record: &StringRecord) -> Result<(), TableError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let keyword = record.get(0).unwrap_or_default().to_string();
        if keyword.is_empty() {
            return Err(TableError::EmptyKeyword(line));
        }

        let cells: Vec<&str> = record.iter().skip(1).collect();
        if cells.len() != self.labels.len() {
            return Err(TableError::RowWidth {
                keyword,
                expected: self.labels.len(),
                found: cells.len(),
            });
        }

        let mut percentages = Vec::with_capacity(cells.len());
        for (column, cell) in cells.iter().enumerate() {
            let pct = cell.parse::<u32>().map_err(|_| TableError::Percentage {
                keyword: keyword.clone(),
                column,
                value: cell.to_string(),
            })?;
            if pct > 100 {
                warn!(target: "profiler", %keyword, column, pct, "percentage above 100");
            }
            percentages.push(pct);
        }

        let key = keyword.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(TableError::DuplicateKeyword(keyword));
        }
        self.index.insert(key, self.rows.len());
        self.rows.push(Row {
            keyword,
            percentages,
        });
        Ok(())
    }

    /// Bucket labels, in column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Percentage row for `keyword` (case-insensitive).
    pub fn row(&self, keyword: &str) -> Option<&[u32]> {
        self.index
            .get(&keyword.to_lowercase())
            .map(|&i| self.rows[i].percentages.as_slice())
    }

    /// Keywords with their original casing, in file order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
