//! Inspect image use case
//!
//! The four operations exposed to the CLI. Each call opens the image through
//! the loader, works inside the loader's scope, and releases the file before
//! returning.

use crate::application::dto::InspectOptions;
use crate::core::error::Result;
use crate::domain::repositories::ImageLoader;
use crate::domain::services::{extract, find_descriptor};
use crate::presentation::RenderContext;
use std::io::Write;
use std::path::Path;

/// Inspect image use case
///
/// Holds no per-call state, so one instance can serve several threads as
/// long as the loader allows it.
pub struct InspectImageUseCase<L: ImageLoader> {
    loader: L,
    options: InspectOptions,
}

impl<L: ImageLoader> InspectImageUseCase<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            options: InspectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InspectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    /// Renders the global header of the image at `path`
    pub fn print_header<W: Write>(&self, path: &Path, out: &mut RenderContext<W>) -> Result<()> {
        tracing::debug!(path = %path.display(), "printing header");
        self.loader.with_image(path, |image, _| {
            out.write_header(image)?;
            Ok(())
        })
    }

    /// Renders the container summary and every occupied descriptor
    pub fn list_descriptors<W: Write>(
        &self,
        path: &Path,
        out: &mut RenderContext<W>,
    ) -> Result<()> {
        tracing::debug!(path = %path.display(), "listing descriptors");
        self.loader.with_image(path, |image, _| {
            out.write_listing(image)?;
            Ok(())
        })
    }

    /// Renders the descriptor with ID `id`
    ///
    /// Nothing is written when the ID is unknown.
    pub fn print_descriptor_info<W: Write>(
        &self,
        path: &Path,
        id: u32,
        out: &mut RenderContext<W>,
    ) -> Result<()> {
        self.loader.with_image(path, |image, _| {
            let descriptor = find_descriptor(image, id)?;
            out.write_descriptor(descriptor)?;
            Ok(())
        })
    }

    /// Streams the payload of descriptor `id` to `sink`
    ///
    /// Returns the number of bytes written.
    pub fn dump_descriptor_data<W: Write + ?Sized>(
        &self,
        path: &Path,
        id: u32,
        sink: &mut W,
    ) -> Result<u64> {
        let copied = self.loader.with_image(path, |image, source| {
            extract(image, source, id, sink, self.options.copy_buffer_size)
        })?;

        tracing::info!(path = %path.display(), id, bytes = copied, "dumped descriptor data");
        Ok(copied)
    }
}
