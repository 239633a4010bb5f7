// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Event payload definitions.

use serde::{Deserialize, Serialize};

/// One generated particle. Carried through the merge untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub pdg: i32,
    pub mother: i32,
    pub second_mother: i32,
    pub first_daughter: i32,
    pub last_daughter: i32,
    pub momentum: [f64; 3],
    pub vertex: [f64; 3],
    pub time: f64,
    pub flags: u32,
}

/// All tracks of one simulated collision, in generator order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tracks: Vec<Track>,
}

impl EventRecord {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl From<Vec<Track>> for EventRecord {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}
