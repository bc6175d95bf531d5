//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories: the on-disk SIF
//! loader and its file-backed data source.

pub mod sif;
