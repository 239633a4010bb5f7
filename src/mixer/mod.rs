// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Interleaving mixer.
//!
//! Output position `p` is filled from input A when `p % ratio == 0` and from
//! input B otherwise. The merge ends at the first position whose input has no
//! unread record left, even if the other input still has data, so the output
//! keeps the requested cadence over its whole length.

pub mod cursor;
pub mod plan;

use tracing::{debug, info};

use crate::stream::{RecordSink, RecordSource};
use crate::types::{Ratio, Source};

pub use cursor::Cursor;
pub use plan::MixPlan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixState {
    Running,
    /// Terminal. `exhausted` is the input that was required but empty.
    Stopped { exhausted: Source },
}

impl MixState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, MixState::Stopped { .. })
    }
}

/// Outcome of a completed merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixReport {
    pub ratio: Ratio,
    /// Records appended to the output.
    pub produced: u64,
    pub taken_a: u64,
    pub taken_b: u64,
    pub available_a: u64,
    pub available_b: u64,
    pub exhausted: Source,
}

impl MixReport {
    /// Records of `source` that the merge never pulled.
    pub fn left_over(&self, source: Source) -> u64 {
        match source {
            Source::A => self.available_a - self.taken_a,
            Source::B => self.available_b - self.taken_b,
        }
    }
}

pub struct Mixer {
    ratio: Ratio,
    position: u64,
    cursor_a: Cursor,
    cursor_b: Cursor,
    state: MixState,
}

impl Mixer {
    pub fn new(ratio: Ratio, count_a: u64, count_b: u64) -> Self {
        Self {
            ratio,
            position: 0,
            cursor_a: Cursor::new(count_a),
            cursor_b: Cursor::new(count_b),
            state: MixState::Running,
        }
    }

    /// Sizes the cursors from the sources' own counts.
    pub fn for_sources<A, B>(ratio: Ratio, a: &A, b: &B) -> Self
    where
        A: RecordSource,
        B: RecordSource,
    {
        Self::new(ratio, a.count(), b.count())
    }

    /// Computes the merge for the given counts without reading anything.
    pub fn plan(ratio: Ratio, count_a: u64, count_b: u64) -> MixPlan {
        MixPlan::new(Self::new(ratio, count_a, count_b))
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// Output position the next step fills; equals records produced so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn state(&self) -> MixState {
        self.state
    }

    pub fn cursor(&self, source: Source) -> &Cursor {
        match source {
            Source::A => &self.cursor_a,
            Source::B => &self.cursor_b,
        }
    }

    pub fn required_source(&self) -> Source {
        self.ratio.source_for(self.position)
    }

    /// Available once the mixer has stopped.
    pub fn report(&self) -> Option<MixReport> {
        match self.state {
            MixState::Running => None,
            MixState::Stopped { exhausted } => Some(self.build_report(exhausted)),
        }
    }

    /// Fills one output position, or stops if its input is exhausted.
    ///
    /// The record moves from the source straight into the sink. Cursor and
    /// position only advance after the sink accepted it.
    pub fn step<A, B, W>(
        &mut self,
        a: &mut A,
        b: &mut B,
        out: &mut W,
    ) -> Result<MixState, A::Error>
    where
        A: RecordSource,
        B: RecordSource<Record = A::Record, Error = A::Error>,
        W: RecordSink<A::Record>,
        A::Error: From<W::Error>,
    {
        self.step_with::<A::Error>(|source, index| {
            let record = match source {
                Source::A => a.read_at(index)?,
                Source::B => b.read_at(index)?,
            };
            out.append(record)?;
            Ok(())
        })
    }

    /// Steps until a required input runs out.
    pub fn run<A, B, W>(
        &mut self,
        a: &mut A,
        b: &mut B,
        out: &mut W,
    ) -> Result<MixReport, A::Error>
    where
        A: RecordSource,
        B: RecordSource<Record = A::Record, Error = A::Error>,
        W: RecordSink<A::Record>,
        A::Error: From<W::Error>,
    {
        loop {
            if let MixState::Stopped { exhausted } = self.step(a, b, out)? {
                return Ok(self.build_report(exhausted));
            }
        }
    }

    pub(crate) fn step_with<E>(
        &mut self,
        pull: impl FnOnce(Source, u64) -> Result<(), E>,
    ) -> Result<MixState, E> {
        if self.state.is_stopped() {
            return Ok(self.state);
        }

        let source = self.required_source();
        let cursor = *self.cursor(source);
        if cursor.is_exhausted() {
            info!(
                event_type = source.event_type(),
                position = self.position,
                "no more events of type {}, stopping",
                source.event_type()
            );
            self.state = MixState::Stopped { exhausted: source };
            return Ok(self.state);
        }

        let index = cursor.next_index();
        pull(source, index)?;

        match source {
            Source::A => self.cursor_a.advance(),
            Source::B => self.cursor_b.advance(),
        }
        debug!(position = self.position, %source, index, "mixed event");
        self.position += 1;

        Ok(self.state)
    }

    fn build_report(&self, exhausted: Source) -> MixReport {
        MixReport {
            ratio: self.ratio,
            produced: self.position,
            taken_a: self.cursor_a.consumed(),
            taken_b: self.cursor_b.consumed(),
            available_a: self.cursor_a.count(),
            available_b: self.cursor_b.count(),
            exhausted,
        }
    }
}

/// Merges `a` and `b` into `out` at `ratio`.
pub fn mix<A, B, W>(
    a: &mut A,
    b: &mut B,
    out: &mut W,
    ratio: Ratio,
) -> Result<MixReport, A::Error>
where
    A: RecordSource,
    B: RecordSource<Record = A::Record, Error = A::Error>,
    W: RecordSink<A::Record>,
    A::Error: From<W::Error>,
{
    Mixer::for_sources(ratio, &*a, &*b).run(a, b, out)
}
