//! run command - Fixed exercise sequence
//!
//! Runs the four storage operations in order against one bucket:
//! list buckets, list the bucket, remove it, then upload a file into it.
//! The first failing step ends the run.

use std::path::PathBuf;

use clap::Args;
use ncs_core::{CannedAcl, ListOptions, ObjectPath, ObjectStore, Result};

use super::{ls, put, rb};
use crate::output::Formatter;

/// Run the list/list/remove/upload sequence
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Bucket to list, remove, and upload into
    #[arg(long, default_value = "hello-world")]
    pub bucket: String,

    /// Local file to upload
    #[arg(long, default_value = "./test.mp4")]
    pub file: PathBuf,

    /// Object key (defaults to the file path as given)
    #[arg(long)]
    pub key: Option<String>,

    /// Canned ACL for the upload; empty leaves the service default
    #[arg(long, default_value = "")]
    pub acl: String,
}

/// Execute the run command
pub async fn execute(args: RunArgs, store: &dyn ObjectStore, formatter: &Formatter) -> Result<()> {
    // Bad input must fail before the bucket is removed
    let acl = CannedAcl::parse_optional(&args.acl)?;
    let path = ObjectPath::new(&args.bucket, &put::default_key(&args.file, args.key))?;

    tracing::info!(bucket = %args.bucket, file = %args.file.display(), "starting run");

    ls::list_buckets(store, formatter, false).await?;
    ls::list_objects(store, &args.bucket, ListOptions::default(), false, formatter).await?;
    rb::remove_bucket(store, &args.bucket, formatter).await?;
    put::upload_file(store, &args.file, path, acl, None, formatter).await?;

    Ok(())
}
