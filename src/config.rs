// src/config.rs
//! Profiler configuration (TOML) and table loading.
//!
//! ```toml
//! narrow_gap = 10
//!
//! [tables]
//! age = "../data/age_keyword_data.csv"
//! gender = "../data/gender_keyword_data.csv"
//! marital_status = "../data/marital_keyword_data.csv"
//! salary = "../data/salary_keyword_data.csv"
//! ```
//!
//! Relative table paths resolve against the config file's directory.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::narrow::DEFAULT_NARROW_GAP;
use crate::pipeline::Predictor;
use crate::profile::Characteristic;
use crate::table::ReferenceTable;

// --- env defaults & names ---
pub const DEFAULT_PROFILER_CONFIG_PATH: &str = "config/profiler.toml";
pub const ENV_PROFILER_CONFIG_PATH: &str = "PROFILER_CONFIG_PATH";
pub const ENV_PROFILER_NARROW_GAP: &str = "PROFILER_NARROW_GAP";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfilerConfig {
    #[serde(default = "default_narrow_gap")]
    pub narrow_gap: u32,
    #[serde(default)]
    pub tables: TablePaths,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TablePaths {
    #[serde(default = "default_age")]
    pub age: PathBuf,
    #[serde(default = "default_gender")]
    pub gender: PathBuf,
    #[serde(default = "default_marital")]
    pub marital_status: PathBuf,
    #[serde(default = "default_salary")]
    pub salary: PathBuf,
}

fn default_narrow_gap() -> u32 {
    DEFAULT_NARROW_GAP
}
fn default_age() -> PathBuf {
    PathBuf::from("data/age_keyword_data.csv")
}
fn default_gender() -> PathBuf {
    PathBuf::from("data/gender_keyword_data.csv")
}
fn default_marital() -> PathBuf {
    PathBuf::from("data/marital_keyword_data.csv")
}
fn default_salary() -> PathBuf {
    PathBuf::from("data/salary_keyword_data.csv")
}

impl Default for TablePaths {
    fn default() -> Self {
        Self {
            age: default_age(),
            gender: default_gender(),
            marital_status: default_marital(),
            salary: default_salary(),
        }
    }
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            narrow_gap: default_narrow_gap(),
            tables: TablePaths::default(),
        }
    }
}

impl TablePaths {
    pub fn get(&self, c: Characteristic) -> &Path {
        match c {
            Characteristic::Age => &self.age,
            Characteristic::Gender => &self.gender,
            Characteristic::MaritalStatus => &self.marital_status,
            Characteristic::Salary => &self.salary,
        }
    }

    fn rebase(&mut self, base: &Path) {
        for p in [
            &mut self.age,
            &mut self.gender,
            &mut self.marital_status,
            &mut self.salary,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

impl ProfilerConfig {
    /// Parse a config from TOML text. Table paths are left as written.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing profiler config")
    }

    /// Load a config file; relative table paths are rebased onto its directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading profiler config from {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            cfg.tables.rebase(dir);
        }
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $PROFILER_CONFIG_PATH (must exist)
    /// 2) config/profiler.toml
    /// 3) built-in defaults (paths relative to the working directory)
    ///
    /// `$PROFILER_NARROW_GAP` overrides the gap when it parses.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_PROFILER_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("PROFILER_CONFIG_PATH points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_PROFILER_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                Self::default()
            }
        };

        if let Some(gap) = parse_gap_env(std::env::var(ENV_PROFILER_NARROW_GAP).ok()) {
            cfg.narrow_gap = gap;
        }
        Ok(cfg)
    }

    /// Load every reference table once and build a predictor over them.
    pub fn build_predictor(&self) -> Result<Predictor> {
        let mut predictor = Predictor::new().with_narrow_gap(self.narrow_gap);
        for c in Characteristic::ALL {
            let path = self.tables.get(c);
            let table = ReferenceTable::from_path(path).with_context(|| {
                format!("loading {} table from {}", c.name(), path.display())
            })?;
            info!(
                target: "profiler",
                characteristic = c.name(),
                keywords = table.len(),
                buckets = table.labels().len(),
                "reference table ready"
            );
            predictor = predictor.with_table(c, table);
        }
        Ok(predictor)
    }
}

fn parse_gap_env(raw: Option<String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}
