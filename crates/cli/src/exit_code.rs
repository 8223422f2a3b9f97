//! Process exit codes
//!
//! Scripts depend on these values; changing one is a breaking change.

use ncs_core::Error;

/// Exit status of an `ncs` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Local file error, or a service error with no known code
    GeneralError = 1,

    /// Bad flag, ACL, key, endpoint, or config file; nothing was sent
    UsageError = 2,

    /// The service could not be reached, or asked the client to back off
    NetworkError = 3,

    /// Rejected credentials or missing permission
    AuthError = 4,

    /// Bucket or multipart upload does not exist
    NotFound = 5,

    /// Bucket still holds objects, or the name is already taken
    Conflict = 6,
}

impl ExitCode {
    const ALL: [Self; 7] = [
        Self::Success,
        Self::GeneralError,
        Self::UsageError,
        Self::NetworkError,
        Self::AuthError,
        Self::NotFound,
        Self::Conflict,
    ];

    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::GeneralError => "general error",
            Self::UsageError => "invalid arguments or configuration",
            Self::NetworkError => "network error, safe to retry",
            Self::AuthError => "access denied",
            Self::NotFound => "bucket or object not found",
            Self::Conflict => "bucket not empty or already exists",
        }
    }
}

impl TryFrom<i32> for ExitCode {
    type Error = i32;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_i32() == code)
            .ok_or(code)
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::try_from(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_i32(), self.description())
    }
}
