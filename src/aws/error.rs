//! AWS error classification
//!
//! Maps Resource Groups Tagging API failures onto a small set of categories
//! using the SDK error code, so the collector can decide whether a page
//! fetch is worth retrying.

use aws_sdk_resourcegroupstagging::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// AWS error categories for retry decisions
#[derive(Debug, Clone, Error)]
pub enum AwsError {
    /// Rate limit exceeded (retryable with backoff)
    #[error("Rate limit exceeded: {0}")]
    Throttled(String),

    /// Service-side failure (retryable)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Connection, DNS or timeout failure before a response arrived (retryable)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The request was never sent: no usable credentials, no auth scheme,
    /// or an invalid client setup
    #[error("Request not sent: {0}")]
    NotSent(String),

    /// Credentials missing, expired or lacking permission
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Request rejected as invalid
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The pagination token is older than the API allows
    #[error("Pagination token expired: {0}")]
    PaginationTokenExpired(String),

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AwsError::Throttled(_) | AwsError::ServiceUnavailable(_) | AwsError::Transport(_)
        )
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AwsError::AccessDenied(_) => Some(
                "Check your AWS credentials and that they allow tag:GetResources in this region.",
            ),
            AwsError::Throttled(_) => Some("AWS API rate limit hit. Try again later."),
            AwsError::Transport(_) => Some("Check your network connection and endpoint URL."),
            AwsError::NotSent(_) => {
                Some("Check that AWS credentials are configured for the selected profile.")
            }
            AwsError::PaginationTokenExpired(_) => Some("Re-run the inventory from the start."),
            _ => None,
        }
    }
}

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Known AWS error codes for transient service failures
const UNAVAILABLE_CODES: &[&str] = &[
    "InternalServiceException",
    "InternalFailure",
    "ServiceUnavailable",
    "ServiceUnavailableException",
];

/// Known AWS error codes for credential and permission problems
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
    "AuthFailure",
];

/// Known AWS error codes for invalid requests
const INVALID_PARAMETER_CODES: &[&str] = &["InvalidParameterException", "ValidationException"];

/// Classify an AWS error from its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled(message),
        Some(c) if UNAVAILABLE_CODES.contains(&c) => AwsError::ServiceUnavailable(message),
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied(message),
        Some(c) if INVALID_PARAMETER_CODES.contains(&c) => AwsError::InvalidParameter(message),
        Some("PaginationTokenExpiredException") => AwsError::PaginationTokenExpired(message),
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK error returned by an operation.
///
/// Dispatch failures are transport errors only when the connector reports an
/// I/O or timeout problem. Missing credentials and auth-scheme selection also
/// surface as dispatch failures; those are terminal. Responses that could not
/// be parsed are treated as service-side failures, and everything else is
/// classified by the error code in its metadata.
pub fn classify_sdk_error<E, R>(error: &SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    let context = || DisplayErrorContext(error).to_string();

    match error {
        SdkError::DispatchFailure(failure) if failure.is_io() || failure.is_timeout() => {
            AwsError::Transport(context())
        }
        SdkError::DispatchFailure(_) => AwsError::NotSent(context()),
        SdkError::TimeoutError(_) => AwsError::Transport(context()),
        SdkError::ResponseError(_) => AwsError::ServiceUnavailable(context()),
        _ => {
            let message = error
                .message()
                .map(str::to_string)
                .unwrap_or_else(context);
            classify_aws_error(error.code(), Some(&message))
        }
    }
}

/// Format an AWS error for the end-of-run summary
pub fn format_aws_error(error: &AwsError) -> String {
    let base = match error {
        AwsError::Throttled(_) => "Rate limit exceeded".to_string(),
        AwsError::ServiceUnavailable(_) => "Service temporarily unavailable".to_string(),
        AwsError::Transport(_) => "Could not reach the tagging API".to_string(),
        AwsError::NotSent(_) => "Request could not be signed or sent".to_string(),
        AwsError::AccessDenied(_) => "Access denied".to_string(),
        AwsError::InvalidParameter(msg) => format!("Invalid request: {}", msg),
        AwsError::PaginationTokenExpired(_) => "Pagination token expired".to_string(),
        AwsError::Sdk { code: Some(code), .. } => format!("AWS error {}", code),
        AwsError::Sdk { code: None, message } => {
            let truncated: String = message.chars().take(80).collect();
            if truncated.len() < message.len() {
                format!("{}...", truncated)
            } else {
                truncated
            }
        }
    };

    match error.suggestion() {
        Some(hint) => format!("{}. {}", base, hint),
        None => base,
    }
}
