//! Inspect options DTO

use crate::domain::services::DEFAULT_COPY_BUFFER_SIZE;

/// Options for inspecting an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Buffer size used when streaming payloads
    pub copy_buffer_size: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl InspectOptions {
    /// Sets the copy buffer size, clamped to at least one byte
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size.max(1);
        self
    }
}
