//! Output context and the two-column table renderer
//!
//! Every rendering goes through a [`RenderContext`] owned by the caller, so
//! concurrent invocations against different sinks never share state.

use super::fields::{Field, descriptor_fields, header_fields};
use super::listing;
use crate::domain::entities::{Descriptor, Image};
use serde::Serialize;
use std::io::{self, Write};

/// How renderings are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Layout settings for label/value tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    /// Minimum spaces between the label column and the value column
    pub padding: usize,
    /// Leading spaces on descriptor detail rows
    pub detail_indent: usize,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            padding: 1,
            detail_indent: 2,
        }
    }
}

/// Output destination plus rendering configuration
pub struct RenderContext<W: Write> {
    sink: W,
    style: TableStyle,
    format: OutputFormat,
}

impl<W: Write> RenderContext<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            style: TableStyle::default(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes `fields` as an aligned two-column table and flushes the sink
    ///
    /// The label column is as wide as the longest label plus the style's
    /// padding. Rows with an empty value carry no padding. A write failure
    /// aborts the remaining rows.
    pub fn write_fields(&mut self, fields: &[Field], indent: usize) -> io::Result<()> {
        let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0) + self.style.padding;

        for field in fields {
            if field.value.is_empty() {
                writeln!(self.sink, "{:indent$}{}", "", field.label)?;
            } else {
                writeln!(
                    self.sink,
                    "{:indent$}{:<width$}{}",
                    "", field.label, field.value
                )?;
            }
        }

        self.sink.flush()
    }

    /// Writes `value` as pretty-printed JSON followed by a newline
    pub fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, value)?;
        writeln!(self.sink)?;
        self.sink.flush()
    }

    /// Renders the image header
    pub fn write_header(&mut self, image: &Image) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_fields(&header_fields(image), 0),
            OutputFormat::Json => self.write_json(image),
        }
    }

    /// Renders one descriptor in detail
    pub fn write_descriptor(&mut self, descriptor: &Descriptor) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.write_fields(&descriptor_fields(descriptor), self.style.detail_indent)
            }
            OutputFormat::Json => self.write_json(descriptor),
        }
    }

    /// Renders the summary of all occupied descriptors
    pub fn write_listing(&mut self, image: &Image) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => listing::write_listing(&mut self.sink, image)?,
            OutputFormat::Json => return self.write_json(&listing::ListingView::new(image)),
        }
        self.sink.flush()
    }
}
