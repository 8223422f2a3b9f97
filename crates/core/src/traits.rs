//! ObjectStore trait definition
//!
//! This trait defines the four storage operations the CLI performs.
//! It keeps the CLI decoupled from the specific S3 SDK implementation.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::acl::CannedAcl;
use crate::error::Result;
use crate::path::ObjectPath;

/// Metadata for an object or bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key or bucket name
    pub key: String,

    /// Size in bytes (None for buckets)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Human-readable size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Last modified timestamp (creation date for buckets)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Whether this entry is a bucket rather than an object
    pub is_bucket: bool,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            size_human: Some(humansize::format_size(size.max(0) as u64, humansize::BINARY)),
            last_modified: None,
            etag: None,
            storage_class: None,
            is_bucket: false,
        }
    }

    /// Create a new ObjectInfo for a bucket
    pub fn bucket(name: impl Into<String>) -> Self {
        Self {
            key: name.into(),
            size_bytes: None,
            size_human: None,
            last_modified: None,
            etag: None,
            storage_class: None,
            is_bucket: true,
        }
    }
}

/// Result of a list operation: a single page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether the result is truncated (more items available)
    pub truncated: bool,

    /// Marker to pass back for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Start listing after this key
    pub marker: Option<String>,

    /// Maximum number of keys to return
    pub max_keys: Option<i32>,
}

/// Destination and attributes of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: ObjectPath,

    /// Canned ACL; `None` leaves the header off
    pub acl: Option<CannedAcl>,

    pub content_type: Option<String>,
}

impl UploadRequest {
    pub fn new(path: ObjectPath) -> Self {
        Self {
            path,
            acl: None,
            content_type: None,
        }
    }

    pub fn acl(mut self, acl: Option<CannedAcl>) -> Self {
        self.acl = acl;
        self
    }

    pub fn content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Confirmation returned by the service after an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutput {
    pub bucket: String,
    pub key: String,

    /// URL of the stored object
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    pub size_bytes: u64,

    /// Multipart upload ID, when the payload was sent in parts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,

    /// Number of parts sent (1 for a single request)
    pub parts: usize,
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets owned by the caller, from a single response
    async fn list_buckets(&self) -> Result<Vec<ObjectInfo>>;

    /// List the first page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Upload a payload as one object
    async fn upload_object(&self, data: Vec<u8>, request: &UploadRequest) -> Result<UploadOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_file() {
        let info = ObjectInfo::file("test.mp4", 1024);
        assert_eq!(info.key, "test.mp4");
        assert_eq!(info.size_bytes, Some(1024));
        assert_eq!(info.size_human.as_deref(), Some("1 KiB"));
        assert!(!info.is_bucket);
    }

    #[test]
    fn test_object_info_bucket() {
        let info = ObjectInfo::bucket("hello-world");
        assert_eq!(info.key, "hello-world");
        assert!(info.is_bucket);
        assert!(info.size_bytes.is_none());
    }

    #[test]
    fn test_upload_request_builder() {
        let path = ObjectPath::new("hello-world", "./test.mp4").unwrap();
        let request = UploadRequest::new(path.clone())
            .acl(Some(CannedAcl::PublicRead))
            .content_type(Some("video/mp4".into()));

        assert_eq!(request.path, path);
        assert_eq!(request.acl, Some(CannedAcl::PublicRead));
        assert_eq!(request.content_type.as_deref(), Some("video/mp4"));
        assert_eq!(UploadRequest::new(path).acl, None);
    }
}
