// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Per-input read position.

/// Next unread index of one input plus its total count.
///
/// Only moves forward, one step per successful pull, and never past `count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    next: u64,
    count: u64,
}

impl Cursor {
    pub fn new(count: u64) -> Self {
        Self { next: 0, count }
    }

    /// Index the next pull reads.
    pub fn next_index(&self) -> u64 {
        self.next
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Records pulled so far.
    pub fn consumed(&self) -> u64 {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.count
    }

    pub(crate) fn advance(&mut self) {
        debug_assert!(!self.is_exhausted(), "cursor advanced past its count");
        if !self.is_exhausted() {
            self.next += 1;
        }
    }
}
