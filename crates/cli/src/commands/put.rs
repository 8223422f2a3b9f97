//! put command - Upload a local file
//!
//! Reads the whole file and uploads it under the given key. The key defaults to the
//! file argument exactly as typed, so `ncs put ./test.mp4 b` stores `./test.mp4`.

use std::path::{Path, PathBuf};

use clap::Args;
use ncs_core::{CannedAcl, Error, ObjectPath, ObjectStore, Result, UploadOutput, UploadRequest};
use serde::Serialize;

use crate::output::{Formatter, ProgressBar};

/// Upload a file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Destination bucket
    pub bucket: String,

    /// Object key (defaults to the file path as given)
    pub key: Option<String>,

    /// Canned ACL (private, public-read, ...); empty leaves the service default
    #[arg(long, default_value = "")]
    pub acl: String,

    /// Content type (guessed from the file extension when omitted)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Part size in MiB for multipart uploads; smaller files go in one request
    #[arg(long = "part-size", default_value_t = 5)]
    pub part_size_mib: u64,
}

#[derive(Debug, Serialize)]
struct PutOutput<'a> {
    status: &'static str,
    source: String,
    #[serde(flatten)]
    upload: &'a UploadOutput,
}

/// Execute the put command
pub async fn execute(args: PutArgs, store: &dyn ObjectStore, formatter: &Formatter) -> Result<()> {
    let acl = CannedAcl::parse_optional(&args.acl)?;
    let path = ObjectPath::new(&args.bucket, &default_key(&args.file, args.key))?;

    upload_file(store, &args.file, path, acl, args.content_type, formatter)
        .await
        .map(|_| ())
}

/// Key to use when none was given
pub(crate) fn default_key(file: &Path, key: Option<String>) -> String {
    key.unwrap_or_else(|| file.to_string_lossy().into_owned())
}

/// Read a local file and upload it to an already validated object path
pub async fn upload_file(
    store: &dyn ObjectStore,
    file: &Path,
    path: ObjectPath,
    acl: Option<CannedAcl>,
    content_type: Option<String>,
    formatter: &Formatter,
) -> Result<UploadOutput> {
    let content_type = content_type.or_else(|| {
        mime_guess::from_path(file)
            .first()
            .map(|m| m.essence_str().to_string())
    });

    let data = read_payload(file).await?;
    let source = file.display().to_string();
    tracing::debug!(%source, size = data.len(), object = %path, "read upload payload");

    let request = UploadRequest::new(path)
        .acl(acl)
        .content_type(content_type);

    let spinner = ProgressBar::spinner(
        formatter.config(),
        &format!("Uploading {source} -> {}", request.path),
    );
    let result = store.upload_object(data, &request).await;
    spinner.finish_and_clear();
    let output = result?;

    tracing::info!(?output, "uploaded object");

    if formatter.is_json() {
        formatter.json(&PutOutput {
            status: "success",
            source,
            upload: &output,
        });
    } else {
        formatter.uploaded(&source, &output);
    }

    Ok(output)
}

/// Read the whole payload; the file handle is closed when the read returns
async fn read_payload(file: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(file).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", file.display()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{MockStore, quiet_formatter};
    use std::io::Write;

    fn upload_output(request: &UploadRequest, size: u64) -> UploadOutput {
        UploadOutput {
            bucket: request.path.bucket.clone(),
            key: request.path.key.clone(),
            location: format!(
                "https://kr.object.ncloudstorage.com/{}",
                request.path
            ),
            etag: Some("d41d8cd98f00b204e9800998ecf8427e".into()),
            size_bytes: size,
            upload_id: None,
            parts: 1,
        }
    }

    #[test]
    fn test_default_key_is_verbatim() {
        assert_eq!(default_key(Path::new("./test.mp4"), None), "./test.mp4");
        assert_eq!(
            default_key(Path::new("./test.mp4"), Some("videos/test.mp4".into())),
            "videos/test.mp4"
        );
    }

    #[tokio::test]
    async fn test_upload_sends_file_bytes() {
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(b"payload").unwrap();
        let file_path = file.path().to_path_buf();

        let mut store = MockStore::new();
        store
            .expect_upload_object()
            .withf(|data, request| {
                data.as_slice() == &b"payload"[..]
                    && request.path.bucket == "hello-world"
                    && request.path.key == "./test.mp4"
                    && request.acl.is_none()
                    && request.content_type.as_deref() == Some("video/mp4")
            })
            .times(1)
            .returning(|data, request| Ok(upload_output(request, data.len() as u64)));

        let output = upload_file(
            &store,
            &file_path,
            ObjectPath::new("hello-world", "./test.mp4").unwrap(),
            None,
            None,
            &quiet_formatter(),
        )
        .await
        .unwrap();

        assert_eq!(output.key, "./test.mp4");
        assert_eq!(output.size_bytes, 7);
    }

    #[tokio::test]
    async fn test_explicit_acl_and_content_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        let file_path = file.path().to_path_buf();

        let mut store = MockStore::new();
        store
            .expect_upload_object()
            .withf(|_, request| {
                request.acl == Some(CannedAcl::PublicRead)
                    && request.content_type.as_deref() == Some("application/json")
            })
            .times(1)
            .returning(|data, request| Ok(upload_output(request, data.len() as u64)));

        let args = PutArgs {
            file: file_path,
            bucket: "hello-world".into(),
            key: Some("data.json".into()),
            acl: "public-read".into(),
            content_type: Some("application/json".into()),
            part_size_mib: 5,
        };
        execute(args, &store, &quiet_formatter()).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_acl_sends_nothing() {
        let mut store = MockStore::new();
        store.expect_upload_object().never();

        let args = PutArgs {
            file: PathBuf::from("./test.mp4"),
            bucket: "hello-world".into(),
            key: None,
            acl: "world-writable".into(),
            content_type: None,
            part_size_mib: 5,
        };
        let err = execute(args, &store, &quiet_formatter()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_empty_key_sends_nothing() {
        let mut store = MockStore::new();
        store.expect_upload_object().never();

        let args = PutArgs {
            file: PathBuf::from("./test.mp4"),
            bucket: "hello-world".into(),
            key: Some(String::new()),
            acl: String::new(),
            content_type: None,
            part_size_mib: 5,
        };
        let err = execute(args, &store, &quiet_formatter()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");

        let mut store = MockStore::new();
        store.expect_upload_object().never();

        let err = upload_file(
            &store,
            &missing,
            ObjectPath::new("hello-world", "missing.mp4").unwrap(),
            None,
            None,
            &quiet_formatter(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("missing.mp4"));
    }

    #[tokio::test]
    async fn test_upload_error_propagates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"x").unwrap();
        let file_path = file.path().to_path_buf();

        let mut store = MockStore::new();
        store
            .expect_upload_object()
            .times(1)
            .returning(|_, _| Err(Error::Auth("object hello-world/x: AccessDenied".into())));

        let err = upload_file(
            &store,
            &file_path,
            ObjectPath::new("hello-world", "x").unwrap(),
            None,
            None,
            &quiet_formatter(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
