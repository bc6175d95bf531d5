//! Domain layer - Core inspection logic
//!
//! Entities describing a decoded image, the traits the loader must provide,
//! and the services that resolve descriptors and stream their payloads.

pub mod entities;
pub mod repositories;
pub mod services;
