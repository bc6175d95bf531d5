use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::repositories::LoadError;

/// Errors returned by the inspection operations
#[derive(Error, Debug)]
pub enum SifError {
    /// The loader could not open or decode the image
    #[error("Cannot load image {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Descriptor not found: no occupied slot has ID {0}")]
    NotFound(u32),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read on descriptor {id}: expected {expected} bytes, got {actual}")]
    ShortRead { id: u32, expected: u64, actual: u64 },
}

impl SifError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SifError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SifError>;
