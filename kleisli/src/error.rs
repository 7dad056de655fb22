use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KleisliError {
    #[error("too many arguments: function takes {arity}, got {supplied}")]
    TooManyArguments { arity: usize, supplied: usize },
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("cannot compose an empty pipeline")]
    EmptyPipeline,
}

pub type Result<T> = std::result::Result<T, KleisliError>;

/// The failure state a `Deferred` settles to when it produces no value.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rejected {
    #[error("no value was produced")]
    Absent,
    #[error("completer dropped before settling")]
    Abandoned,
    #[error("producer failed: {0}")]
    Failed(String),
}
