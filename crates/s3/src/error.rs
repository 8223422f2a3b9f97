//! SDK error classification
//!
//! Maps `aws-sdk-s3` failures onto the `ncs_core::Error` taxonomy using the service
//! error code rather than matching on rendered messages.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;
use ncs_core::Error;

/// Convert an SDK error into a core error, naming the resource it concerned
pub(crate) fn map_sdk_error<E, R>(err: SdkError<E, R>, resource: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            tracing::debug!(%resource, %detail, "request did not reach the service");
            Error::Network(detail)
        }
        _ => {
            let code = err.as_service_error().and_then(|e| e.code());
            tracing::debug!(%resource, code = code.unwrap_or("<none>"), "service error");
            classify(code, resource, detail)
        }
    }
}

/// Classify a service error code
pub(crate) fn classify(code: Option<&str>, resource: &str, detail: String) -> Error {
    let Some(code) = code else {
        return Error::Network(detail);
    };

    match code {
        "NoSuchBucket" | "NoSuchKey" | "NoSuchUpload" | "NotFound" => {
            Error::NotFound(format!("{resource} ({code})"))
        }
        "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "AllAccessDisabled"
        | "ExpiredToken" | "InvalidToken" => Error::Auth(format!("{resource}: {detail}")),
        "BucketNotEmpty" | "BucketAlreadyExists" | "BucketAlreadyOwnedByYou"
        | "OperationAborted" => Error::Conflict(format!("{resource} ({code})")),
        "SlowDown" | "Throttling" | "RequestTimeout" | "ServiceUnavailable" | "InternalError" => {
            Error::Network(detail)
        }
        "InvalidBucketName" | "InvalidArgument" | "InvalidRequest" | "MalformedACLError" => {
            Error::InvalidArgument(format!("{resource}: {detail}"))
        }
        _ => Error::General(detail),
    }
}
