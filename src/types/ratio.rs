// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Interleaving cadence.

use core::fmt;
use core::num::NonZeroU32;

use crate::error::{MixError, Result};
use crate::types::id::Source;

/// Period of the output cadence. Position `p` takes from A iff `p % r == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ratio(NonZeroU32);

impl Ratio {
    pub const ONE: Ratio = Ratio(NonZeroU32::MIN);

    /// Validates a raw integer. Zero and negative values have no cadence.
    pub fn new(raw: i64) -> Result<Self> {
        u32::try_from(raw)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Ratio)
            .ok_or_else(|| {
                MixError::InvalidArgument(format!(
                    "ratio must be a positive integer no larger than {}, got {raw}",
                    u32::MAX
                ))
            })
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Which input the output position `position` must be filled from.
    pub fn source_for(self, position: u64) -> Source {
        if position % u64::from(self.get()) == 0 {
            Source::A
        } else {
            Source::B
        }
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ONE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
