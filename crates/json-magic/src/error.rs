use json_magic_pointer::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MagicError {
    #[error("Invalid type for path")]
    InvalidPathType,
    #[error("Invalid object for {0}")]
    InvalidTarget(&'static str),
    #[error("Invalid reference token: {0}")]
    InvalidPath(String),
    #[error("Invalid array index: \"{0}\"")]
    InvalidIndex(String),
}

impl From<PathError> for MagicError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::InvalidPathType => MagicError::InvalidPathType,
            PathError::InvalidPointer(pointer) => MagicError::InvalidPath(pointer),
        }
    }
}

pub type MagicResult<T> = Result<T, MagicError>;
