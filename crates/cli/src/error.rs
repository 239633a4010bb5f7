use kinemix::MixError;
use kinemix_persistence::PersistenceError;
use thiserror::Error;

/// Failure of a `kmix` command. Every variant aborts the command; none is
/// retried.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An input store could not be opened.
    #[error(transparent)]
    NotFound(PersistenceError),
    /// An input store does not hold the requested series.
    #[error(transparent)]
    SchemaMismatch(PersistenceError),
    /// The output store could not be created.
    #[error(transparent)]
    CreateFailed(PersistenceError),
    #[error(transparent)]
    Store(PersistenceError),
}

impl ToolError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::InvalidArgument(_) => 2,
            ToolError::NotFound(_) => 3,
            ToolError::SchemaMismatch(_) => 4,
            ToolError::CreateFailed(_) => 5,
            ToolError::Store(_) => 1,
        }
    }
}

impl From<PersistenceError> for ToolError {
    fn from(e: PersistenceError) -> Self {
        match e {
            e @ PersistenceError::NotFound { .. } => ToolError::NotFound(e),
            e @ PersistenceError::SchemaMismatch { .. } => ToolError::SchemaMismatch(e),
            e @ PersistenceError::CreateFailed { .. } => ToolError::CreateFailed(e),
            other => ToolError::Store(other),
        }
    }
}

impl From<MixError> for ToolError {
    fn from(e: MixError) -> Self {
        match e {
            MixError::InvalidArgument(msg) => ToolError::InvalidArgument(msg),
        }
    }
}
