// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MixError {
    /// A caller-supplied argument can never produce a valid merge.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = core::result::Result<T, MixError>;
