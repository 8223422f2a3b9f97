//! Bucket and object addressing
//!
//! Only the checks the service cannot do for us are made here: a bucket name must be
//! a single non-empty path segment and an object key must be non-empty. Keys are
//! otherwise used verbatim, including separators and a leading `./`.

use std::fmt;

use crate::error::{Error, Result};

/// Check that a bucket name can be sent to the service
pub fn validate_bucket_name(bucket: &str) -> Result<()> {
    if bucket.is_empty() {
        return Err(Error::InvalidArgument("bucket name cannot be empty".into()));
    }
    if bucket.contains('/') {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{bucket}' must not contain '/'"
        )));
    }
    Ok(())
}

/// Check that an object key can be sent to the service
pub fn validate_object_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("object key cannot be empty".into()));
    }
    Ok(())
}

/// A bucket plus object key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    pub bucket: String,
    pub key: String,
}

impl ObjectPath {
    /// Create a validated object path
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();
        validate_bucket_name(&bucket)?;
        validate_object_key(&key)?;
        Ok(Self { bucket, key })
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
