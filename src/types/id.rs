// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Identity types.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BRANCH, DEFAULT_TREE};

/// Names the record collection inside a store: a tree and one of its branches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId {
    pub tree: String,
    pub branch: String,
}

impl SeriesId {
    pub fn new(tree: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            tree: tree.into(),
            branch: branch.into(),
        }
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new(DEFAULT_TREE, DEFAULT_BRANCH)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tree, self.branch)
    }
}

/// One of the two merge inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    A,
    B,
}

impl Source {
    /// 1-based event type number used in operator-facing messages.
    pub fn event_type(self) -> u8 {
        match self {
            Source::A => 1,
            Source::B => 2,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::A => f.write_str("A"),
            Source::B => f.write_str("B"),
        }
    }
}
