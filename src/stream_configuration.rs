//! Configuration types for stream construction

use serde::{Deserialize, Serialize};

/// Buffering and concurrency defaults for newly created streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Capacity of sequences created for the stream (0 = unbuffered)
    pub buffer_size: usize,
    /// Concurrency level used by ordered transforms (0 = sequential)
    pub concurrency: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_size: 0,
            concurrency: 0,
        }
    }
}

impl StreamConfig {
    /// One worker per available CPU, with a matching buffer
    pub fn parallel() -> Self {
        let cpus = num_cpus::get();
        Self {
            buffer_size: cpus,
            concurrency: cpus,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
