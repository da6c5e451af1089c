// tests/pipeline_data.rs
//
// End-to-end predictions against the bundled reference tables in data/.

use std::path::Path;

use search_profiler::{Characteristic, Predictor, Profile, ProfilerConfig};

fn bundled() -> Predictor {
    ProfilerConfig::load_from(Path::new("config/profiler.toml"))
        .expect("load bundled config")
        .build_predictor()
        .expect("load bundled tables")
}

#[test]
fn example_persona_matches_documented_prediction() {
    let p = bundled()
        .predict(
            Some("Colin".into()),
            &[
                "Tutorial for investing in cars",
                "Most popular fashion when gaming",
                "Travel plans for popular ski mountains",
            ],
        )
        .unwrap();

    assert_eq!(p.age.as_deref(), Some("0-17"));
    assert_eq!(p.gender.as_deref(), Some("Male"));
    assert_eq!(p.marital_status.as_deref(), Some("Single"));
    assert_eq!(p.salary.as_deref(), Some("Upper-Class"));
    assert_eq!(
        p.to_string(),
        "Predictions for Colin are as follows:\n\
         Age: 0-17\n\
         Gender: Male\n\
         Marital Status: Single\n\
         Salary: Upper-Class"
    );
}

#[test]
fn unmatched_characteristics_stay_unknown() {
    let p = bundled()
        .predict(
            None,
            &["wedding planning", "diapers on sale", "mortgage calculator"],
        )
        .unwrap();

    assert_eq!(p.age.as_deref(), Some("25-34"));
    assert!(p.gender.is_unknown());
    assert_eq!(p.marital_status.as_deref(), Some("Married"));
    assert!(p.salary.is_unknown());
}

#[test]
fn close_age_buckets_merge_into_one_range() {
    let p = bundled().predict(None, &["homework", "college"]).unwrap();
    assert_eq!(p.age.as_deref(), Some("0-24"));

    let p = bundled()
        .predict(None, &["retirement pension plans"])
        .unwrap();
    assert_eq!(p.age.as_deref(), Some("55-64"));
}

#[test]
fn nothing_matched_is_all_unknown() {
    let p = bundled()
        .predict(Some("Ana".into()), &["weather", "news today", "recipes"])
        .unwrap();
    assert_eq!(p, Profile::new(Some("Ana".into())));
}

#[test]
fn every_characteristic_has_a_table() {
    let predictor = bundled();
    for c in Characteristic::ALL {
        let t = predictor.table(c).expect("table loaded");
        assert!(!t.is_empty(), "{} table is empty", c.name());
    }
    let age = predictor.table(Characteristic::Age).unwrap();
    assert!(age.labels().iter().all(|l| l.contains('-')));
}

#[test]
fn predictions_are_repeatable() {
    let predictor = bundled();
    let q = ["golf trips", "yacht charter", "cruise deals"];
    let a = predictor.predict(None, &q).unwrap();
    let b = predictor.predict(None, &q).unwrap();
    assert_eq!(a, b);
}
