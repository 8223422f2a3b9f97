//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from ncs-core.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart, ObjectCannedAcl};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::{Position, Url};

use ncs_core::{
    Error, ListOptions, ListResult, ObjectInfo, ObjectStore, Result, StorageConfig,
    UploadOutput, UploadRequest, validate_bucket_name,
};

use crate::error::map_sdk_error;
use crate::upload::UploadConfig;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    config: StorageConfig,
    upload: UploadConfig,
}

impl S3Client {
    /// Create a new S3 client from resolved storage settings
    ///
    /// Building the client does not contact the service.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            config.credentials.access_key.clone(),
            config.credentials.secret_key.clone(),
            None, // session token
            None, // expiry
            "ncs-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        tracing::debug!(
            endpoint = %config.endpoint,
            region = %config.region,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            config: config.clone(),
            upload: UploadConfig::default(),
        })
    }

    /// Replace the upload configuration
    pub fn with_upload_config(mut self, upload: UploadConfig) -> Self {
        self.upload = upload;
        self
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// URL of an object on the configured endpoint
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<String> {
        object_url(&self.config.endpoint, self.config.force_path_style, bucket, key)
    }

    async fn put_single(&self, data: Vec<u8>, request: &UploadRequest) -> Result<UploadOutput> {
        let path = &request.path;
        let size = data.len() as u64;

        let response = self
            .inner
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .body(ByteStream::from(data))
            .set_acl(request.acl.map(|acl| ObjectCannedAcl::from(acl.as_str())))
            .set_content_type(request.content_type.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("object {path}")))?;

        Ok(UploadOutput {
            bucket: path.bucket.clone(),
            key: path.key.clone(),
            location: self.object_url(&path.bucket, &path.key)?,
            etag: response.e_tag().map(trim_etag),
            size_bytes: size,
            upload_id: None,
            parts: 1,
        })
    }

    async fn put_multipart(&self, data: Vec<u8>, request: &UploadRequest) -> Result<UploadOutput> {
        let path = &request.path;
        let resource = format!("object {path}");

        let created = self
            .inner
            .create_multipart_upload()
            .bucket(&path.bucket)
            .key(&path.key)
            .set_acl(request.acl.map(|acl| ObjectCannedAcl::from(acl.as_str())))
            .set_content_type(request.content_type.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &resource))?;

        let upload_id = created
            .upload_id()
            .ok_or_else(|| Error::General(format!("{resource}: service returned no upload ID")))?
            .to_string();

        tracing::debug!(%upload_id, size = data.len(), "started multipart upload");

        let parts = match self.upload_parts(&data, request, &upload_id).await {
            Ok(parts) => parts,
            Err(e) => {
                self.abort(request, &upload_id).await;
                return Err(e);
            }
        };
        let part_count = parts.len();

        let completed = self
            .inner
            .complete_multipart_upload()
            .bucket(&path.bucket)
            .key(&path.key)
            .upload_id(&upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build(),
            )
            .send()
            .await;

        let completed = match completed {
            Ok(c) => c,
            Err(e) => {
                self.abort(request, &upload_id).await;
                return Err(map_sdk_error(e, &resource));
            }
        };

        let location = match completed.location() {
            Some(location) => location.to_string(),
            None => self.object_url(&path.bucket, &path.key)?,
        };

        Ok(UploadOutput {
            bucket: path.bucket.clone(),
            key: path.key.clone(),
            location,
            etag: completed.e_tag().map(trim_etag),
            size_bytes: data.len() as u64,
            upload_id: Some(upload_id),
            parts: part_count,
        })
    }

    async fn upload_parts(
        &self,
        data: &[u8],
        request: &UploadRequest,
        upload_id: &str,
    ) -> Result<Vec<CompletedPart>> {
        let path = &request.path;
        let ranges = self.upload.part_ranges(data.len() as u64);
        let mut parts = Vec::with_capacity(ranges.len());

        for (index, range) in ranges.into_iter().enumerate() {
            let part_number = (index + 1) as i32;
            let response = self
                .inner
                .upload_part()
                .bucket(&path.bucket)
                .key(&path.key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(data[range].to_vec()))
                .send()
                .await
                .map_err(|e| map_sdk_error(e, &format!("object {path} part {part_number}")))?;

            tracing::trace!(part_number, "uploaded part");
            parts.push(
                CompletedPart::builder()
                    .part_number(part_number)
                    .set_e_tag(response.e_tag().map(str::to_string))
                    .build(),
            );
        }

        Ok(parts)
    }

    async fn abort(&self, request: &UploadRequest, upload_id: &str) {
        let path = &request.path;
        if let Err(e) = self
            .inner
            .abort_multipart_upload()
            .bucket(&path.bucket)
            .key(&path.key)
            .upload_id(upload_id)
            .send()
            .await
        {
            let error = map_sdk_error(e, &format!("object {path}"));
            tracing::warn!(%upload_id, %error, "failed to abort multipart upload");
        }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<ObjectInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "bucket list"))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| {
                let mut info = ObjectInfo::bucket(b.name().unwrap_or_default());
                if let Some(creation_date) = b.creation_date() {
                    info.last_modified = jiff::Timestamp::from_second(creation_date.secs()).ok();
                }
                info
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult> {
        validate_bucket_name(bucket)?;

        let response = self
            .inner
            .list_objects()
            .bucket(bucket)
            .set_prefix(options.prefix)
            .set_marker(options.marker)
            .set_max_keys(options.max_keys)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("bucket {bucket}")))?;

        let mut items = Vec::new();
        for object in response.contents() {
            let key = object.key().unwrap_or_default().to_string();
            let size = object.size().unwrap_or(0);
            let mut info = ObjectInfo::file(&key, size);

            if let Some(modified) = object.last_modified() {
                info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
            }

            if let Some(etag) = object.e_tag() {
                info.etag = Some(trim_etag(etag));
            }

            if let Some(sc) = object.storage_class() {
                info.storage_class = Some(sc.as_str().to_string());
            }

            items.push(info);
        }

        let truncated = response.is_truncated().unwrap_or(false);
        // Without a delimiter the service may omit NextMarker; the last key continues the page
        let next_marker = if truncated {
            response
                .next_marker()
                .map(str::to_string)
                .or_else(|| items.last().map(|i| i.key.clone()))
        } else {
            None
        };

        Ok(ListResult {
            items,
            truncated,
            next_marker,
        })
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        validate_bucket_name(bucket)?;

        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("bucket {bucket}")))?;

        Ok(())
    }

    async fn upload_object(&self, data: Vec<u8>, request: &UploadRequest) -> Result<UploadOutput> {
        let size = data.len() as u64;

        if self.upload.is_multipart(size) {
            tracing::debug!(size, part_size = self.upload.part_size, "using multipart upload");
            self.put_multipart(data, request).await
        } else {
            self.put_single(data, request).await
        }
    }
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

/// Characters left as-is in a path segment; everything else is percent-encoded
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the URL of an object for path-style or virtual-hosted addressing
///
/// The path is assembled by hand because `Url` resolves `.` and `..` segments,
/// and keys such as `./test.mp4` must appear exactly as stored.
fn object_url(endpoint: &str, path_style: bool, bucket: &str, key: &str) -> Result<String> {
    let mut url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "Endpoint cannot be a base URL: {endpoint}"
        )));
    }

    if !path_style {
        let host = url
            .host_str()
            .ok_or_else(|| Error::Config(format!("Endpoint has no host: {endpoint}")))?;
        let host = format!("{bucket}.{host}");
        url.set_host(Some(&host))?;
    }

    let mut location = url[..Position::BeforePath].to_string();
    location.push_str(url.path().trim_end_matches('/'));
    if path_style {
        location.push('/');
        location.extend(utf8_percent_encode(bucket, SEGMENT_ENCODE_SET));
    }
    for segment in key.split('/') {
        location.push('/');
        location.extend(utf8_percent_encode(segment, SEGMENT_ENCODE_SET));
    }

    Ok(location)
}
