//! Application layer
//!
//! Use cases that open an image through the loader and drive the domain
//! services and renderers.

pub mod dto;
mod inspect_image;

pub use inspect_image::InspectImageUseCase;
