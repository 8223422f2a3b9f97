//! Storage connection settings
//!
//! `StorageConfig` is the immutable, fully-resolved description of how to reach the
//! object storage service. It is built once at startup from the config file profile,
//! command-line overrides, and the credential environment variables, then handed to
//! the client factory.

use std::fmt;

use url::Url;

use crate::config::StorageProfile;
use crate::error::{Error, Result};

/// Default signing region
pub const DEFAULT_REGION: &str = "kr-standard";

/// Default service endpoint
pub const DEFAULT_ENDPOINT: &str = "https://kr.object.ncloudstorage.com";

/// Default environment variable holding the access key
pub const DEFAULT_ACCESS_KEY_ENV: &str = "NCP_ACCESS_KEY";

/// Default environment variable holding the secret key
pub const DEFAULT_SECRET_KEY_ENV: &str = "NCP_SECURITY_KEY";

/// Static access key / secret key pair used for request signing
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials through `lookup`, using the variable names from `profile`
    ///
    /// Missing variables become empty strings; the service rejects them later with an
    /// authorization error.
    pub fn from_lookup<F>(profile: &StorageProfile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(&profile.access_key_env).unwrap_or_default();
        let secret_key = lookup(&profile.secret_key_env).unwrap_or_default();

        if access_key.is_empty() || secret_key.is_empty() {
            tracing::warn!(
                access_key_env = %profile.access_key_env,
                secret_key_env = %profile.secret_key_env,
                "storage credentials are not set; requests will be rejected"
            );
        }

        Self {
            access_key,
            secret_key,
        }
    }

    /// Whether both halves of the pair are present
    pub fn is_complete(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Values supplied on the command line (or their env fallbacks) that win over the profile
#[derive(Debug, Clone, Default)]
pub struct StorageOverrides {
    pub endpoint: Option<String>,
    pub region: Option<String>,
}

/// Resolved connection settings for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Service endpoint, validated and without a trailing slash
    pub endpoint: String,

    /// Signing region
    pub region: String,

    /// Path-style bucket addressing
    pub force_path_style: bool,

    pub credentials: Credentials,
}

impl StorageConfig {
    /// Build a config directly, validating the endpoint
    pub fn new(
        endpoint: &str,
        region: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self> {
        let region = region.into();
        if region.trim().is_empty() {
            return Err(Error::Config("Region cannot be empty".into()));
        }

        Ok(Self {
            endpoint: normalize_endpoint(endpoint)?,
            region,
            force_path_style: true,
            credentials,
        })
    }

    /// Resolve settings from the config profile, overrides and the credential lookup
    pub fn resolve<F>(
        profile: &StorageProfile,
        overrides: &StorageOverrides,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = overrides.endpoint.as_deref().unwrap_or(&profile.endpoint);
        let region = overrides.region.as_deref().unwrap_or(&profile.region);
        let credentials = Credentials::from_lookup(profile, lookup);

        let mut config = Self::new(endpoint, region, credentials)?;
        config.force_path_style = profile.force_path_style;

        tracing::debug!(
            endpoint = %config.endpoint,
            region = %config.region,
            path_style = config.force_path_style,
            "resolved storage config"
        );
        Ok(config)
    }

    /// Resolve settings reading credentials from the process environment
    pub fn from_env(profile: &StorageProfile, overrides: &StorageOverrides) -> Result<Self> {
        Self::resolve(profile, overrides, |name| std::env::var(name).ok())
    }
}

/// Validate an endpoint URL and strip any trailing slash
fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint.trim())?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::Config(format!(
            "Endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::Config(format!("Endpoint has no host: {endpoint}")));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_defaults() {
        let profile = StorageProfile::default();
        let lookup = env(&[("NCP_ACCESS_KEY", "ak"), ("NCP_SECURITY_KEY", "sk")]);

        let config = StorageConfig::resolve(&profile, &StorageOverrides::default(), lookup).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.force_path_style);
        assert_eq!(config.credentials, Credentials::new("ak", "sk"));
    }

    #[test]
    fn test_missing_credentials_are_empty() {
        let profile = StorageProfile::default();
        let config =
            StorageConfig::resolve(&profile, &StorageOverrides::default(), env(&[])).unwrap();
        assert_eq!(config.credentials.access_key, "");
        assert_eq!(config.credentials.secret_key, "");
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_overrides_win_over_profile() {
        let profile = StorageProfile {
            endpoint: "https://profile.example.com".into(),
            region: "profile-region".into(),
            ..Default::default()
        };
        let overrides = StorageOverrides {
            endpoint: Some("http://localhost:9000/".into()),
            region: Some("us-east-1".into()),
        };

        let config = StorageConfig::resolve(&profile, &overrides, env(&[])).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_profile_env_names_are_used() {
        let profile = StorageProfile {
            access_key_env: "MY_AK".into(),
            secret_key_env: "MY_SK".into(),
            ..Default::default()
        };
        let lookup = env(&[
            ("MY_AK", "custom-ak"),
            ("MY_SK", "custom-sk"),
            ("NCP_ACCESS_KEY", "ignored"),
        ]);

        let config = StorageConfig::resolve(&profile, &StorageOverrides::default(), lookup).unwrap();
        assert_eq!(config.credentials, Credentials::new("custom-ak", "custom-sk"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let creds = Credentials::new("ak", "sk");
        assert!(matches!(
            StorageConfig::new("kr.object.ncloudstorage.com", "kr-standard", creds.clone()),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            StorageConfig::new("ftp://example.com", "kr-standard", creds.clone()),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            StorageConfig::new(DEFAULT_ENDPOINT, "  ", creds),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_with_path_keeps_path() {
        let config = StorageConfig::new(
            "https://gateway.example.com/storage/",
            "kr-standard",
            Credentials::new("ak", "sk"),
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://gateway.example.com/storage");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("AKIDEXAMPLE", "super-secret-value");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("super-secret-value"));

        let config = StorageConfig::new(DEFAULT_ENDPOINT, DEFAULT_REGION, creds).unwrap();
        assert!(!format!("{config:?}").contains("super-secret-value"));
    }
}
