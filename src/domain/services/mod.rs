//! Domain services
//!
//! Size formatting, descriptor resolution and payload extraction.

mod extractor;
mod readable_size;
mod resolver;

pub use extractor::{DEFAULT_COPY_BUFFER_SIZE, copy_payload, extract};
pub use readable_size::readable_size;
pub use resolver::{PayloadReader, find_descriptor, resolve};
