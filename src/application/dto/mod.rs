//! Data Transfer Objects

mod inspect_options;

pub use inspect_options::InspectOptions;
