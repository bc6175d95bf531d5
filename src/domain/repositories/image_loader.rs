//! Image loader trait
//!
//! The loader opens a file, decodes its header and descriptor table and
//! hands back a navigable [`Image`] together with a [`DataSource`] for the
//! payload bytes. It owns the underlying file handle for the whole scope.

use super::data_source::DataSource;
use crate::core::error::SifError;
use crate::domain::entities::Image;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while opening or decoding an image
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image truncated: {what} needs {needed} bytes, file has {available}")]
    Truncated {
        what: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Trait for opening images
///
/// # Example
///
/// ```ignore
/// let loader = FileImageLoader::new();
/// let count = loader.with_image(Path::new("alpine.sif"), |image, _source| {
///     Ok(image.occupied_count())
/// })?;
/// ```
pub trait ImageLoader {
    type Source: DataSource;

    /// Opens and decodes the image at `path`
    fn load(&self, path: &Path) -> Result<(Image, Self::Source), LoadError>;

    /// Runs `f` inside an open-use-close scope
    ///
    /// The image and its source are released when `f` returns; neither can
    /// escape the closure. Load failures come back as
    /// [`SifError::ResourceUnavailable`] with the loader's error untouched.
    fn with_image<T, F>(&self, path: &Path, f: F) -> Result<T, SifError>
    where
        F: FnOnce(&Image, &Self::Source) -> Result<T, SifError>,
    {
        let (image, source) = self
            .load(path)
            .map_err(|source| SifError::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        f(&image, &source)
    }
}
