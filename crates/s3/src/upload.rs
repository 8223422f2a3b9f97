//! Upload planning
//!
//! Payloads that fit in one part go out as a single `PutObject`; larger payloads are
//! split into sequential multipart parts.

use std::ops::Range;

/// Default part size: 5 MiB, matching the SDK upload managers
pub const DEFAULT_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Minimum part size: 5 MiB (S3 requirement)
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum part size: 5 GiB
pub const MAX_PART_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// Maximum number of parts: 10,000 (S3 limit)
pub const MAX_PARTS: usize = 10_000;

/// Upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Part size in bytes; also the single-request threshold
    pub part_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
        }
    }
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part_size(mut self, size: u64) -> Self {
        self.part_size = size.clamp(MIN_PART_SIZE, MAX_PART_SIZE);
        self
    }

    /// Whether a payload of this size needs a multipart upload
    pub fn is_multipart(&self, size: u64) -> bool {
        size > self.part_size
    }

    /// Calculate appropriate part size for a payload
    pub fn calculate_part_size(&self, size: u64) -> u64 {
        let parts = size.div_ceil(self.part_size);

        if parts <= MAX_PARTS as u64 {
            self.part_size
        } else {
            // Need larger parts to fit within 10,000 limit
            let required_size = size.div_ceil(MAX_PARTS as u64);
            required_size.clamp(MIN_PART_SIZE, MAX_PART_SIZE)
        }
    }

    /// Byte ranges of each part, in part-number order
    pub fn part_ranges(&self, size: u64) -> Vec<Range<usize>> {
        let size = size as usize;
        let part_size = self.calculate_part_size(size as u64) as usize;

        (0..size)
            .step_by(part_size.max(1))
            .map(|start| start..(start + part_size).min(size))
            .collect()
    }
}
