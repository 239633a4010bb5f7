// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::mixer::Mixer;
use crate::types::{Ratio, Source};

#[test]
fn test_plan_matches_documented_scenario() {
    let plan: Vec<(Source, u64)> = Mixer::plan(Ratio::new(3).unwrap(), 5, 2).collect();
    assert_eq!(
        plan,
        vec![(Source::A, 0), (Source::B, 0), (Source::B, 1), (Source::A, 1)]
    );
}

#[test]
fn test_plan_summary() {
    let report = Mixer::plan(Ratio::new(2).unwrap(), 1, 10).summarize();
    assert_eq!(report.produced, 2);
    assert_eq!(report.exhausted, Source::A);
    assert_eq!(report.available_b, 10);
}

#[test]
fn test_plan_summary_after_partial_iteration() {
    let mut plan = Mixer::plan(Ratio::new(4).unwrap(), 3, 100);
    assert_eq!(plan.next(), Some((Source::A, 0)));
    let report = plan.summarize();
    // A at 0, 4, 8; position 12 needs a fourth A.
    assert_eq!(report.produced, 12);
    assert_eq!(report.taken_b, 9);
}

#[test]
fn test_plan_is_fused_after_stop() {
    let mut plan = Mixer::plan(Ratio::ONE, 1, 0);
    assert_eq!(plan.next(), Some((Source::A, 0)));
    assert_eq!(plan.next(), None);
    assert_eq!(plan.next(), None);
}
