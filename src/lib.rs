// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! kinemix: deterministic ratio interleaving of two simulated-event streams.
//!
//! The crate owns the data model and the merge loop. Storage lives behind the
//! [`stream::RecordSource`] and [`stream::RecordSink`] traits so the mixer
//! never touches a file format.

pub mod config;
pub mod error;
pub mod types;
pub mod stream;
pub mod mixer;

pub use config::MixConfig;
pub use error::{MixError, Result};
pub use mixer::{mix, Cursor, MixPlan, MixReport, MixState, Mixer};
pub use stream::{RecordSink, RecordSource, VecSource};
pub use types::{EventRecord, Ratio, SeriesId, Source, Track};

#[cfg(test)]
pub mod tests;
