//! # Prediction Pipeline
//! Pure, testable mapping `(searches, reference tables)` → `Profile`.
//! No I/O after the tables are loaded.
//!
//! Per characteristic:
//! matched keywords → per-keyword top-2 → aggregated top-2 → narrowed → value.

use metrics::counter;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ProfileError;
use crate::matcher::matched_keywords;
use crate::narrow::{narrow, Narrowed, DEFAULT_NARROW_GAP};
use crate::profile::{Characteristic, Prediction, Profile};
use crate::resolve::resolve;
use crate::scoring::{aggregate, top_two_or_sentinel, BucketScore, TopTwo, NO_SIGNAL};
use crate::table::ReferenceTable;

/// One matched keyword with its top-2 buckets.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub top: TopTwo,
}

/// Intermediate results of one characteristic, for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct CharacteristicTrace {
    pub characteristic: Characteristic,
    pub keywords: Vec<KeywordScore>,
    pub aggregated: TopTwo,
    pub narrowed: Vec<BucketScore>,
    pub value: Prediction,
}

/// Loaded reference tables plus the narrowing policy.
#[derive(Debug, Clone)]
pub struct Predictor {
    tables: HashMap<Characteristic, Arc<ReferenceTable>>,
    narrow_gap: u32,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor {
    /// Predictor without tables; every characteristic resolves to unknown.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            narrow_gap: DEFAULT_NARROW_GAP,
        }
    }

    pub fn with_table(mut self, c: Characteristic, table: ReferenceTable) -> Self {
        self.tables.insert(c, Arc::new(table));
        self
    }

    pub fn with_narrow_gap(mut self, gap: u32) -> Self {
        self.narrow_gap = gap;
        self
    }

    pub fn narrow_gap(&self) -> u32 {
        self.narrow_gap
    }

    pub fn table(&self, c: Characteristic) -> Option<&ReferenceTable> {
        self.tables.get(&c).map(Arc::as_ref)
    }

    /// Run every characteristic's pipeline and collect the results.
    pub fn predict<S: AsRef<str>>(
        &self,
        name: Option<String>,
        searches: &[S],
    ) -> Result<Profile, ProfileError> {
        self.predict_traced(name, searches).map(|(profile, _)| profile)
    }

    /// [`predict`](Self::predict) that also hands back the per-characteristic traces.
    pub fn predict_traced<S: AsRef<str>>(
        &self,
        name: Option<String>,
        searches: &[S],
    ) -> Result<(Profile, Vec<CharacteristicTrace>), ProfileError> {
        let traces = self.explain(searches)?;
        let mut profile = Profile::new(name);
        for trace in &traces {
            profile.set(trace.characteristic, trace.value.clone());
        }

        counter!("profile_predictions_total").increment(1);
        info!(
            target: "profiler",
            id = %anon_id(searches),
            age = %profile.age,
            gender = %profile.gender,
            marital_status = %profile.marital_status,
            salary = %profile.salary,
            "profile predicted"
        );
        Ok((profile, traces))
    }

    /// Same as [`predict`](Self::predict) but keeps every intermediate step.
    pub fn explain<S: AsRef<str>>(
        &self,
        searches: &[S],
    ) -> Result<Vec<CharacteristicTrace>, ProfileError> {
        Characteristic::ALL
            .iter()
            .map(|&c| self.run_one(c, searches))
            .collect()
    }

    fn run_one<S: AsRef<str>>(
        &self,
        c: Characteristic,
        searches: &[S],
    ) -> Result<CharacteristicTrace, ProfileError> {
        let Some(table) = self.tables.get(&c) else {
            debug!(target: "profiler", characteristic = c.name(), "no reference table");
            counter!("profile_unknown_total", "characteristic" => c.name()).increment(1);
            return Ok(CharacteristicTrace {
                characteristic: c,
                keywords: Vec::new(),
                aggregated: NO_SIGNAL,
                narrowed: narrow(NO_SIGNAL, self.narrow_gap).scores(),
                value: Prediction::Unknown,
            });
        };

        let keywords: Vec<KeywordScore> = matched_keywords(searches, table)
            .into_iter()
            .map(|kw| {
                let top = top_two_or_sentinel(table.row(&kw));
                KeywordScore { keyword: kw, top }
            })
            .collect();

        let aggregated = aggregate(keywords.iter().map(|k| &k.top));
        let narrowed: Narrowed = narrow(aggregated, self.narrow_gap);
        let value = resolve(c.resolution(), &aggregated, &narrowed, table.labels())?;

        debug!(
            target: "profiler",
            characteristic = c.name(),
            matched = ?keywords.iter().map(|k| k.keyword.as_str()).collect::<Vec<_>>(),
            aggregated = ?aggregated,
            retained = narrowed.scores().len(),
            value = %value,
            "characteristic resolved"
        );
        if value.is_unknown() {
            counter!("profile_unknown_total", "characteristic" => c.name()).increment(1);
        }

        Ok(CharacteristicTrace {
            characteristic: c,
            keywords,
            aggregated,
            narrowed: narrowed.scores(),
            value,
        })
    }
}

/// Short anonymized id of the searches; raw query text is never logged.
pub(crate) fn anon_id<S: AsRef<str>>(searches: &[S]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for s in searches {
        hasher.update(s.as_ref().as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
