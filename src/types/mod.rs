// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Core value types.

pub mod id;
pub mod ratio;
pub mod track;

pub use id::{SeriesId, Source};
pub use ratio::Ratio;
pub use track::{EventRecord, Track};
