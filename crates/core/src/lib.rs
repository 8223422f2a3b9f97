//! ncs-core: Core library for the ncs object storage CLI client
//!
//! This crate provides the SDK-independent pieces of the client:
//! - Configuration file management
//! - Storage connection settings and credentials
//! - Canned ACL parsing and bucket/key validation
//! - ObjectStore trait for the storage operations
//!
//! Nothing here depends on the AWS SDK, so the CLI can be tested against mocks.

pub mod acl;
pub mod config;
pub mod error;
pub mod path;
pub mod storage;
pub mod traits;

pub use acl::CannedAcl;
pub use config::{Config, ConfigManager, Defaults, StorageProfile};
pub use error::{Error, Result};
pub use path::{ObjectPath, validate_bucket_name, validate_object_key};
pub use storage::{Credentials, StorageConfig, StorageOverrides};
pub use traits::{ListOptions, ListResult, ObjectInfo, ObjectStore, UploadOutput, UploadRequest};
