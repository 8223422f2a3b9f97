//! ls command - List buckets and objects
//!
//! Lists buckets when no bucket is given, or the first page of objects in a bucket.

use clap::Args;
use ncs_core::{ListOptions, ListResult, ObjectInfo, ObjectStore, Result};
use serde::Serialize;

use crate::output::Formatter;

/// List buckets or objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Bucket to list (lists all buckets when omitted)
    pub bucket: Option<String>,

    /// Only list keys starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Start listing after this key (from a previous truncated listing)
    #[arg(long)]
    pub marker: Option<String>,

    /// Maximum number of keys to return
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=1000))]
    pub max_keys: Option<i32>,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    items: Vec<ObjectInfo>,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

impl Summary {
    fn of(items: &[ObjectInfo]) -> Self {
        let total_size: i64 = items.iter().filter_map(|i| i.size_bytes).sum();
        Self {
            total_objects: items.len(),
            total_size_bytes: total_size,
            total_size_human: humansize::format_size(total_size.max(0) as u64, humansize::BINARY),
        }
    }
}

/// Execute the ls command
pub async fn execute(args: LsArgs, store: &dyn ObjectStore, formatter: &Formatter) -> Result<()> {
    match args.bucket {
        None => list_buckets(store, formatter, args.summarize).await.map(|_| ()),
        Some(bucket) => {
            let options = ListOptions {
                prefix: args.prefix,
                marker: args.marker,
                max_keys: args.max_keys,
            };
            list_objects(store, &bucket, options, args.summarize, formatter)
                .await
                .map(|_| ())
        }
    }
}

/// List all buckets and print them
pub async fn list_buckets(
    store: &dyn ObjectStore,
    formatter: &Formatter,
    summarize: bool,
) -> Result<Vec<ObjectInfo>> {
    let buckets = store.list_buckets().await?;
    tracing::info!(count = buckets.len(), ?buckets, "listed buckets");

    if formatter.is_json() {
        let output = LsOutput {
            items: buckets.clone(),
            truncated: false,
            next_marker: None,
            summary: summarize.then(|| Summary::of(&buckets)),
        };
        formatter.json(&output);
    } else {
        for bucket in &buckets {
            formatter.entry(bucket);
        }
        if summarize {
            formatter.println(&format!("\nTotal: {} buckets", buckets.len()));
        }
    }

    Ok(buckets)
}

/// List the first page of objects in a bucket and print them
pub async fn list_objects(
    store: &dyn ObjectStore,
    bucket: &str,
    options: ListOptions,
    summarize: bool,
    formatter: &Formatter,
) -> Result<ListResult> {
    let result = store.list_objects(bucket, options).await?;
    tracing::info!(
        %bucket,
        count = result.items.len(),
        truncated = result.truncated,
        items = ?result.items,
        "listed objects"
    );

    if formatter.is_json() {
        let output = LsOutput {
            items: result.items.clone(),
            truncated: result.truncated,
            next_marker: result.next_marker.clone(),
            summary: summarize.then(|| Summary::of(&result.items)),
        };
        formatter.json(&output);
        return Ok(result);
    }

    for item in &result.items {
        formatter.entry(item);
    }

    if summarize {
        let summary = Summary::of(&result.items);
        formatter.println(&format!(
            "\nTotal: {} objects, {}",
            summary.total_objects, summary.total_size_human
        ));
    }

    if result.truncated {
        let hint = match &result.next_marker {
            Some(marker) => format!("More objects available; continue with --marker '{marker}'"),
            None => "More objects available".to_string(),
        };
        formatter.warning(&hint);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{MockStore, quiet_formatter};
    use ncs_core::Error;

    #[tokio::test]
    async fn test_list_buckets_empty_is_ok() {
        let mut store = MockStore::new();
        store.expect_list_buckets().times(1).returning(|| Ok(vec![]));

        let buckets = list_buckets(&store, &quiet_formatter(), true).await.unwrap();
        assert!(buckets.is_empty());
    }

    #[tokio::test]
    async fn test_list_objects_missing_bucket_is_not_found() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .withf(|bucket, _| bucket.to_string() == "no-such-bucket")
            .times(1)
            .returning(|_, _| Err(Error::NotFound("bucket no-such-bucket (NoSuchBucket)".into())));

        let err = list_objects(
            &store,
            "no-such-bucket",
            ListOptions::default(),
            false,
            &quiet_formatter(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_execute_passes_list_options() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .withf(|bucket, options| {
                bucket.to_string() == "hello-world"
                    && options.prefix.as_deref() == Some("videos/")
                    && options.max_keys == Some(10)
                    && options.marker.is_none()
            })
            .times(1)
            .returning(|_, _| {
                Ok(ListResult {
                    items: vec![ObjectInfo::file("videos/clip.mp4", 42)],
                    truncated: false,
                    next_marker: None,
                })
            });

        let args = LsArgs {
            bucket: Some("hello-world".into()),
            prefix: Some("videos/".into()),
            marker: None,
            max_keys: Some(10),
            summarize: false,
        };
        execute(args, &store, &quiet_formatter()).await.unwrap();
    }

    #[test]
    fn test_summary_totals() {
        let items = vec![ObjectInfo::file("a", 1024), ObjectInfo::file("b", 1024)];
        let summary = Summary::of(&items);
        assert_eq!(summary.total_objects, 2);
        assert_eq!(summary.total_size_bytes, 2048);
        assert_eq!(summary.total_size_human, "2 KiB");
    }

    #[test]
    fn test_ls_output_json_shape() {
        let output = LsOutput {
            items: vec![ObjectInfo::bucket("hello-world")],
            truncated: false,
            next_marker: None,
            summary: None,
        };
        insta::assert_json_snapshot!(output, @r#"
        {
          "items": [
            {
              "key": "hello-world",
              "is_bucket": true
            }
          ],
          "truncated": false
        }
        "#);
    }
}
