// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use core::convert::Infallible;

use crate::mixer::{MixReport, MixState, Mixer};
use crate::types::Source;

/// Dry run of a merge: yields `(source, index)` for every output position.
pub struct MixPlan {
    mixer: Mixer,
}

impl MixPlan {
    pub(crate) fn new(mixer: Mixer) -> Self {
        Self { mixer }
    }

    /// Drains the remaining positions and returns the final report.
    pub fn summarize(mut self) -> MixReport {
        loop {
            if let MixState::Stopped { exhausted } = self.advance().1 {
                return self.mixer.build_report(exhausted);
            }
        }
    }

    fn advance(&mut self) -> (Option<(Source, u64)>, MixState) {
        let mut pulled = None;
        let state = self
            .mixer
            .step_with(|source, index| {
                pulled = Some((source, index));
                Ok::<(), Infallible>(())
            })
            .unwrap_or_else(|never| match never {});
        (pulled, state)
    }
}

impl Iterator for MixPlan {
    type Item = (Source, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().0
    }
}
