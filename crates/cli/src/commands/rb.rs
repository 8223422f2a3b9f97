//! rb command - Remove bucket
//!
//! Removes an empty bucket. The service refuses to remove a bucket that still
//! holds objects, and nothing inside it is touched.

use clap::Args;
use ncs_core::{Error, ObjectStore, Result};
use serde::Serialize;

use crate::output::Formatter;

/// Remove a bucket
#[derive(Args, Debug)]
pub struct RbArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct RbOutput<'a> {
    status: &'static str,
    bucket: &'a str,
}

/// Execute the rb command
pub async fn execute(args: RbArgs, store: &dyn ObjectStore, formatter: &Formatter) -> Result<()> {
    remove_bucket(store, &args.bucket, formatter).await
}

/// Delete a bucket and print the outcome
pub async fn remove_bucket(store: &dyn ObjectStore, bucket: &str, formatter: &Formatter) -> Result<()> {
    store.delete_bucket(bucket).await.map_err(|e| match e {
        Error::Conflict(msg) if msg.contains("BucketNotEmpty") => Error::Conflict(format!(
            "bucket '{bucket}' is not empty; remove its objects first"
        )),
        other => other,
    })?;

    tracing::info!(%bucket, "deleted bucket");

    if formatter.is_json() {
        formatter.json(&RbOutput {
            status: "success",
            bucket,
        });
    } else {
        formatter.success(&format!("Bucket '{bucket}' removed successfully."));
    }

    Ok(())
}
