//! ARN decomposition
//!
//! Splits `arn:<partition>:<service>:<region>:<account>:<resource...>` into
//! its fields. Everything after the account field may itself contain colons
//! (e.g. `log-group:/aws/lambda/foo`); those segments are kept as-is and
//! rejoined with `/` to form the short ARN.

use std::fmt;
use thiserror::Error;

/// Number of colon-delimited fields before the resource part
const RESOURCE_INDEX: usize = 5;

/// Errors produced while decomposing or classifying an ARN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    /// Fewer than six colon-delimited segments
    #[error("malformed ARN '{arn}': expected at least 6 ':'-separated fields, found {found}")]
    TooFewSegments { arn: String, found: usize },

    /// First segment is not the literal `arn`
    #[error("malformed ARN '{arn}': must start with 'arn:'")]
    MissingPrefix { arn: String },

    /// Service field is empty
    #[error("malformed ARN '{arn}': empty service field")]
    EmptyService { arn: String },

    /// A service family that encodes `type/id` got a short ARN without `/`
    #[error("{service} resource '{short_arn}' has no 'type/id' segment")]
    MissingResourceType { service: String, short_arn: String },
}

/// A decomposed ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    segments: Vec<String>,
}

impl Arn {
    /// Parse a full ARN string
    pub fn parse(arn: &str) -> Result<Self, ArnError> {
        let segments: Vec<String> = arn.split(':').map(str::to_string).collect();

        if segments.len() <= RESOURCE_INDEX {
            return Err(ArnError::TooFewSegments {
                arn: arn.to_string(),
                found: segments.len(),
            });
        }
        if segments[0] != "arn" {
            return Err(ArnError::MissingPrefix {
                arn: arn.to_string(),
            });
        }
        if segments[2].is_empty() {
            return Err(ArnError::EmptyService {
                arn: arn.to_string(),
            });
        }

        Ok(Self { segments })
    }

    /// Service name, taken by position so non-`aws` partitions work too
    pub fn service(&self) -> &str {
        &self.segments[2]
    }

    /// Resource part with inner `:` separators rejoined as `/`
    ///
    /// `arn:aws:ec2:us-east-1:123456789012:instance/i-0123` -> `instance/i-0123`
    /// `arn:aws:sns:us-east-1:123456789012:topic:sub` -> `topic/sub`
    pub fn short_arn(&self) -> String {
        self.segments[RESOURCE_INDEX..].join("/")
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl std::str::FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
