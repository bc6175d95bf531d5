pub mod application;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::InspectImageUseCase;
pub use application::dto::InspectOptions;
pub use crate::core::{Result, SifError};
pub use domain::entities::{Arch, DataType, Descriptor, Image, Link, TypeInfo};
pub use domain::repositories::{DataSource, ImageLoader, LoadError};
pub use domain::services::{extract, find_descriptor, readable_size, resolve};
pub use infrastructure::sif::{FileDataSource, FileImageLoader};
pub use presentation::{OutputFormat, RenderContext, TableStyle};
