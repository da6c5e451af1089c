use thiserror::Error;

/// Failures while loading a keyword reference table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("reference table is missing its header row")]
    MissingHeader,
    #[error("row for '{keyword}' has {found} percentages, expected {expected}")]
    RowWidth {
        keyword: String,
        expected: usize,
        found: usize,
    },
    #[error("keyword '{keyword}', column {column}: '{value}' is not an integer percentage")]
    Percentage {
        keyword: String,
        column: usize,
        value: String,
    },
    #[error("keyword '{0}' appears more than once")]
    DuplicateKeyword(String),
    #[error("empty keyword cell on line {0}")]
    EmptyKeyword(u64),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while resolving a narrowed result into a profile value.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileError {
    #[error("bucket index {index} has no label (table has {labels} buckets)")]
    BucketOutOfRange { index: usize, labels: usize },
    #[error("range label '{0}' is not in low-high form")]
    MalformedRangeLabel(String),
}
