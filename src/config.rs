// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

use crate::types::{Ratio, SeriesId};

/// Tree name every generated kinematics store uses.
pub const DEFAULT_TREE: &str = "o2sim";

/// Branch holding the per-event track vectors.
pub const DEFAULT_BRANCH: &str = "MCTrack";

/// Leading bytes of every store file.
pub const STORE_MAGIC: [u8; 4] = *b"KMIX";

/// Leading bytes of the footer written by a finalized store.
pub const FOOTER_MAGIC: [u8; 4] = *b"KEND";

/// On-disk format version.
pub const STORE_VERSION: u32 = 1;

/// Parameters of a single merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixConfig {
    pub ratio: Ratio,
    pub series: SeriesId,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            ratio: Ratio::ONE,
            series: SeriesId::default(),
        }
    }
}
