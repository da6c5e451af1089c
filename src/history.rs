//! history.rs — bounded in-memory log of recent predictions for the debug endpoint.

use serde::Serialize;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::profile::Profile;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub ts_unix: u64,
    // anonymized id of the searches, never the raw text
    pub id: String,
    pub matched: usize,
    pub profile: Profile,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, id: String, matched: usize, profile: &Profile) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            id,
            matched,
            profile: profile.clone(),
        };

        let mut v = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let start = v.len().saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let h = History::with_capacity(2);
        for i in 0..3 {
            h.push(format!("id{i}"), i, &Profile::new(None));
        }
        let snap = h.snapshot_last_n(10);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].id, "id1");
        assert_eq!(snap[1].id, "id2");
        assert_eq!(h.snapshot_last_n(1)[0].matched, 2);
    }
}
