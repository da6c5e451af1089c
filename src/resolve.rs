//! Map a narrowed top-2 onto a final characteristic value.
//!
//! "unknown" is decided on the aggregated result: only the untouched
//! `[(0,0),(0,0)]` pair means no signal, whatever the narrowing gap did to it.

use crate::error::ProfileError;
use crate::narrow::Narrowed;
use crate::profile::{Prediction, Resolution};
use crate::scoring::{TopTwo, NO_SIGNAL};

fn label_at(labels: &[String], index: usize) -> Result<&str, ProfileError> {
    labels
        .get(index)
        .map(String::as_str)
        .ok_or(ProfileError::BucketOutOfRange {
            index,
            labels: labels.len(),
        })
}

/// Merge the "low-high" labels of every retained bucket into one span.
///
/// Endpoints are compared as strings, so "5-9" + "10-17" gives "10-9".
pub fn resolve_range(narrowed: &Narrowed, labels: &[String]) -> Result<Prediction, ProfileError> {
    let mut endpoints: Vec<&str> = Vec::with_capacity(4);
    for score in narrowed.scores() {
        let label = label_at(labels, score.bucket)?;
        let (low, high) = label
            .split_once('-')
            .ok_or_else(|| ProfileError::MalformedRangeLabel(label.to_string()))?;
        let high = high.split('-').next().unwrap_or(high);
        endpoints.push(low.trim());
        endpoints.push(high.trim());
    }

    // non-empty: at least one retained pair
    let min = endpoints.iter().min().copied().unwrap_or_default();
    let max = endpoints.iter().max().copied().unwrap_or_default();
    Ok(Prediction::Value(format!("{min}-{max}")))
}

/// Label of the strongest retained bucket; a later entry with an equal
/// percentage replaces an earlier one.
pub fn resolve_label(narrowed: &Narrowed, labels: &[String]) -> Result<Prediction, ProfileError> {
    let scores = narrowed.scores();
    let mut best = scores[0];
    for s in &scores {
        if s.percentage >= best.percentage {
            best = *s;
        }
    }

    label_at(labels, best.bucket).map(|l| Prediction::Value(l.to_string()))
}

/// Final value for one characteristic; unknown when `aggregated` is the no-signal pair.
pub fn resolve(
    resolution: Resolution,
    aggregated: &TopTwo,
    narrowed: &Narrowed,
    labels: &[String],
) -> Result<Prediction, ProfileError> {
    if *aggregated == NO_SIGNAL {
        return Ok(Prediction::Unknown);
    }
    match resolution {
        Resolution::Range => resolve_range(narrowed, labels),
        Resolution::Label => resolve_label(narrowed, labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrow::{narrow, DEFAULT_NARROW_GAP};
    use crate::scoring::BucketScore;

    fn bs(p: u32, b: usize) -> BucketScore {
        BucketScore::new(p, b)
    }

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn value(s: &str) -> Prediction {
        Prediction::Value(s.to_string())
    }

    #[test]
    fn adjacent_age_buckets_merge() {
        let l = labels(&["0-17", "18-24", "25-34", "35-44"]);
        let n = Narrowed::Pair(bs(40, 1), bs(35, 2));
        assert_eq!(resolve_range(&n, &l).unwrap(), value("18-34"));
    }

    #[test]
    fn single_age_bucket_is_its_own_label() {
        let l = labels(&["0-17", "18-24", "25-34"]);
        let n = Narrowed::Single(bs(80, 2));
        assert_eq!(resolve_range(&n, &l).unwrap(), value("25-34"));
    }

    #[test]
    fn age_endpoints_compare_as_strings() {
        let l = labels(&["5-9", "10-17"]);
        let n = Narrowed::Pair(bs(40, 0), bs(35, 1));
        // "10" < "17" < "5" < "9" lexicographically
        assert_eq!(resolve_range(&n, &l).unwrap(), value("10-9"));
    }

    #[test]
    fn no_signal_age_is_unknown() {
        let l = labels(&["0-17", "18-24"]);
        let n = narrow(NO_SIGNAL, DEFAULT_NARROW_GAP);
        assert_eq!(
            resolve(Resolution::Range, &NO_SIGNAL, &n, &l).unwrap(),
            Prediction::Unknown
        );
    }

    #[test]
    fn no_signal_stays_unknown_with_zero_gap() {
        // a zero gap collapses the sentinel pair to a single (0, 0)
        let n = narrow(NO_SIGNAL, 0);
        assert_eq!(n, Narrowed::Single(BucketScore::SENTINEL));
        let ages = labels(&["0-17", "18-24"]);
        let genders = labels(&["Male", "Female"]);
        assert_eq!(
            resolve(Resolution::Range, &NO_SIGNAL, &n, &ages).unwrap(),
            Prediction::Unknown
        );
        assert_eq!(
            resolve(Resolution::Label, &NO_SIGNAL, &n, &genders).unwrap(),
            Prediction::Unknown
        );
    }

    #[test]
    fn weak_single_keyword_pulls_in_bucket_zero() {
        // one keyword at 5%: the untouched sentinel slot stays in the range
        let l = labels(&["0-17", "18-24", "25-34"]);
        let agg = [bs(5, 2), bs(0, 0)];
        let n = narrow(agg, DEFAULT_NARROW_GAP);
        assert_eq!(resolve(Resolution::Range, &agg, &n, &l).unwrap(), value("0-34"));
    }

    #[test]
    fn malformed_range_label_errors() {
        let l = labels(&["adult"]);
        let n = Narrowed::Single(bs(70, 0));
        assert_eq!(
            resolve_range(&n, &l),
            Err(ProfileError::MalformedRangeLabel("adult".into()))
        );
    }

    #[test]
    fn label_picks_strongest() {
        let l = labels(&["Unknown", "Male", "Female"]);
        let n = Narrowed::Single(bs(90, 1));
        assert_eq!(resolve_label(&n, &l).unwrap(), value("Male"));

        let n = Narrowed::Pair(bs(60, 2), bs(55, 1));
        assert_eq!(resolve_label(&n, &l).unwrap(), value("Female"));
    }

    #[test]
    fn label_tie_goes_to_later_entry() {
        let l = labels(&["Single", "Married", "Divorced"]);
        let n = Narrowed::Pair(bs(50, 0), bs(50, 2));
        assert_eq!(resolve_label(&n, &l).unwrap(), value("Divorced"));
    }

    #[test]
    fn no_signal_label_is_unknown() {
        let l = labels(&["Unknown", "Male", "Female"]);
        let n = narrow(NO_SIGNAL, DEFAULT_NARROW_GAP);
        assert_eq!(
            resolve(Resolution::Label, &NO_SIGNAL, &n, &l).unwrap(),
            Prediction::Unknown
        );
    }

    #[test]
    fn bucket_without_label_errors() {
        let l = labels(&["Male"]);
        let n = Narrowed::Single(bs(70, 3));
        assert_eq!(
            resolve_label(&n, &l),
            Err(ProfileError::BucketOutOfRange {
                index: 3,
                labels: 1
            })
        );
    }

    #[test]
    fn dispatch_follows_resolution_kind() {
        let l = labels(&["18-24", "25-34"]);
        let agg = [bs(70, 1), bs(0, 0)];
        let n = Narrowed::Single(bs(70, 1));
        assert_eq!(resolve(Resolution::Range, &agg, &n, &l).unwrap(), value("25-34"));
        assert_eq!(resolve(Resolution::Label, &agg, &n, &l).unwrap(), value("25-34"));
    }
}
