//! # Profile
//! The per-user accumulator of resolved characteristics and its plain text report.

use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A resolved characteristic value, or the explicit "unknown" state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prediction {
    #[default]
    Unknown,
    Value(String),
}

impl Prediction {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Prediction::Unknown)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Prediction::Unknown => None,
            Prediction::Value(v) => Some(v.as_str()),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Unknown => f.write_str("unknown"),
            Prediction::Value(v) => f.write_str(v),
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a characteristic's narrowed result turns into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Merge "low-high" bucket labels into one span.
    Range,
    /// Pick the label of the strongest bucket.
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Age,
    Gender,
    MaritalStatus,
    Salary,
}

impl Characteristic {
    pub const ALL: [Characteristic; 4] = [
        Characteristic::Age,
        Characteristic::Gender,
        Characteristic::MaritalStatus,
        Characteristic::Salary,
    ];

    pub fn resolution(self) -> Resolution {
        match self {
            Characteristic::Age => Resolution::Range,
            _ => Resolution::Label,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Characteristic::Age => "age",
            Characteristic::Gender => "gender",
            Characteristic::MaritalStatus => "marital_status",
            Characteristic::Salary => "salary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub age: Prediction,
    pub gender: Prediction,
    pub marital_status: Prediction,
    pub salary: Prediction,
}

impl Profile {
    /// Fresh profile with every characteristic unknown.
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn set(&mut self, c: Characteristic, value: Prediction) {
        *self.slot(c) = value;
    }

    pub fn get(&self, c: Characteristic) -> &Prediction {
        match c {
            Characteristic::Age => &self.age,
            Characteristic::Gender => &self.gender,
            Characteristic::MaritalStatus => &self.marital_status,
            Characteristic::Salary => &self.salary,
        }
    }

    fn slot(&mut self, c: Characteristic) -> &mut Prediction {
        match c {
            Characteristic::Age => &mut self.age,
            Characteristic::Gender => &mut self.gender,
            Characteristic::MaritalStatus => &mut self.marital_status,
            Characteristic::Salary => &mut self.salary,
        }
    }

    /// Write the plain text report to `path`, replacing any existing file.
    pub fn write_report<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

/// Plain text report.
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = self.name.as_deref().unwrap_or("user");
        writeln!(f, "Predictions for {who} are as follows:")?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Gender: {}", self.gender)?;
        writeln!(f, "Marital Status: {}", self.marital_status)?;
        write!(f, "Salary: {}", self.salary)
    }
}
