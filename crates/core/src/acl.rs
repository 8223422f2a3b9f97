//! Canned access control lists
//!
//! Uploads may carry one of the S3 canned ACLs. An empty string means "not specified":
//! the ACL header is left off the request and the service applies its default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A canned ACL accepted by S3-compatible services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    AwsExecRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
}

impl CannedAcl {
    /// All canned ACLs, in the order the service documents them
    pub const ALL: [CannedAcl; 7] = [
        CannedAcl::Private,
        CannedAcl::PublicRead,
        CannedAcl::PublicReadWrite,
        CannedAcl::AuthenticatedRead,
        CannedAcl::AwsExecRead,
        CannedAcl::BucketOwnerRead,
        CannedAcl::BucketOwnerFullControl,
    ];

    /// Wire value of the ACL header
    pub const fn as_str(self) -> &'static str {
        match self {
            CannedAcl::Private => "private",
            CannedAcl::PublicRead => "public-read",
            CannedAcl::PublicReadWrite => "public-read-write",
            CannedAcl::AuthenticatedRead => "authenticated-read",
            CannedAcl::AwsExecRead => "aws-exec-read",
            CannedAcl::BucketOwnerRead => "bucket-owner-read",
            CannedAcl::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }

    /// Parse an optional ACL argument
    ///
    /// Blank input yields `None`; anything else must name a canned ACL.
    pub fn parse_optional(value: &str) -> Result<Option<Self>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for CannedAcl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CannedAcl::ALL
            .into_iter()
            .find(|acl| acl.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = CannedAcl::ALL.iter().map(|a| a.as_str()).collect();
                Error::InvalidArgument(format!(
                    "unknown ACL '{s}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_acl_is_unspecified() {
        assert_eq!(CannedAcl::parse_optional("").unwrap(), None);
        assert_eq!(CannedAcl::parse_optional("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_known_acls() {
        for acl in CannedAcl::ALL {
            assert_eq!(acl.as_str().parse::<CannedAcl>().unwrap(), acl);
        }
        assert_eq!(
            CannedAcl::parse_optional("Public-Read").unwrap(),
            Some(CannedAcl::PublicRead)
        );
    }

    #[test]
    fn test_unknown_acl_is_rejected() {
        let err = CannedAcl::parse_optional("everyone").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("bucket-owner-full-control"));
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(CannedAcl::BucketOwnerRead.to_string(), "bucket-owner-read");
    }
}
