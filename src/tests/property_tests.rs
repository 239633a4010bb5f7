// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use proptest::prelude::*;

use crate::mixer::{mix, Mixer};
use crate::stream::VecSource;
use crate::types::{Ratio, Source};

fn tagged(source: Source, n: u64) -> Vec<(Source, u64)> {
    (0..n).map(|i| (source, i)).collect()
}

proptest! {
    #[test]
    fn prop_cadence_order_and_stop(r in 1i64..12, count_a in 0u64..40, count_b in 0u64..40) {
        let ratio = Ratio::new(r).unwrap();
        let mut a = VecSource::new(tagged(Source::A, count_a));
        let mut b = VecSource::new(tagged(Source::B, count_b));
        let mut out: Vec<(Source, u64)> = Vec::new();

        let report = mix(&mut a, &mut b, &mut out, ratio).unwrap();
        prop_assert_eq!(report.produced, out.len() as u64);

        // Cadence: position p comes from A iff p % r == 0.
        for (p, (source, _)) in out.iter().enumerate() {
            prop_assert_eq!(*source, ratio.source_for(p as u64));
        }

        // Order: each input is consumed as 0, 1, 2, ... with no gaps.
        for source in [Source::A, Source::B] {
            let pulled: Vec<u64> = out
                .iter()
                .filter(|(s, _)| *s == source)
                .map(|(_, i)| *i)
                .collect();
            let expected: Vec<u64> = (0..pulled.len() as u64).collect();
            prop_assert_eq!(pulled, expected);
        }
        prop_assert_eq!(a.reads().to_vec(), (0..report.taken_a).collect::<Vec<_>>());
        prop_assert_eq!(b.reads().to_vec(), (0..report.taken_b).collect::<Vec<_>>());

        // Stop: the position right after the output needed an empty input.
        let stop_source = ratio.source_for(report.produced);
        prop_assert_eq!(stop_source, report.exhausted);
        match stop_source {
            Source::A => prop_assert_eq!(report.taken_a, count_a),
            Source::B => prop_assert_eq!(report.taken_b, count_b),
        }
    }

    #[test]
    fn prop_plan_agrees_with_mix(r in 1i64..12, count_a in 0u64..40, count_b in 0u64..40) {
        let ratio = Ratio::new(r).unwrap();
        let mut a = VecSource::new(tagged(Source::A, count_a));
        let mut b = VecSource::new(tagged(Source::B, count_b));
        let mut out: Vec<(Source, u64)> = Vec::new();

        let report = mix(&mut a, &mut b, &mut out, ratio).unwrap();
        let planned: Vec<(Source, u64)> = Mixer::plan(ratio, count_a, count_b).collect();

        prop_assert_eq!(&planned, &out);
        prop_assert_eq!(Mixer::plan(ratio, count_a, count_b).summarize(), report);
    }
}
