//! Resource classification
//!
//! Turns a short ARN into a [`SingleResource`], with parsing rules chosen
//! by service family.

use crate::aws::arn::{Arn, ArnError};

/// A tagged resource, normalized for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleResource {
    pub region: String,
    pub service: String,
    /// Resource type (`instance`, `cluster`...), only for `type/id` layouts
    pub product: Option<String>,
    pub id: String,
    /// Short ARN the record was built from
    pub arn: String,
}

/// Service families with their own short-ARN layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFamily {
    /// `instance/i-0123`, `volume/vol-0abc`, ...
    Ec2,
    /// `cluster/prod`, `service/prod/web`, ...
    Ecs,
    /// Everything else; the short ARN is the identifier
    Generic(String),
}

impl ServiceFamily {
    pub fn from_service(service: &str) -> Self {
        match service {
            "ec2" => ServiceFamily::Ec2,
            "ecs" => ServiceFamily::Ecs,
            other => ServiceFamily::Generic(other.to_string()),
        }
    }

    pub fn service_name(&self) -> &str {
        match self {
            ServiceFamily::Ec2 => "ec2",
            ServiceFamily::Ecs => "ecs",
            ServiceFamily::Generic(name) => name,
        }
    }

    /// Split a short ARN into `(product, id)` according to this family
    fn parse_short_arn(&self, short_arn: &str) -> Result<(Option<String>, String), ArnError> {
        match self {
            ServiceFamily::Ec2 | ServiceFamily::Ecs => {
                let mut parts = short_arn.split('/');
                let product = parts.next().unwrap_or_default();
                let Some(id) = parts.next() else {
                    return Err(ArnError::MissingResourceType {
                        service: self.service_name().to_string(),
                        short_arn: short_arn.to_string(),
                    });
                };
                Ok((Some(product.to_string()), id.to_string()))
            }
            ServiceFamily::Generic(_) => Ok((None, short_arn.to_string())),
        }
    }
}

/// Build a resource record from a short ARN
pub fn classify(short_arn: &str, service: &str, region: &str) -> Result<SingleResource, ArnError> {
    let family = ServiceFamily::from_service(service);
    let (product, id) = family.parse_short_arn(short_arn)?;

    Ok(SingleResource {
        region: region.to_string(),
        service: service.to_string(),
        product,
        id,
        arn: short_arn.to_string(),
    })
}

/// Decompose a full ARN and classify it for `region`
pub fn convert_arn(arn: &str, region: &str) -> Result<SingleResource, ArnError> {
    let parsed = Arn::parse(arn)?;
    classify(&parsed.short_arn(), parsed.service(), region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ec2_splits_type_and_id() {
        let r = classify("instance/i-0123", "ec2", "us-east-1").unwrap();
        assert_eq!(r.product.as_deref(), Some("instance"));
        assert_eq!(r.id, "i-0123");
        assert_eq!(r.region, "us-east-1");
        assert_eq!(r.service, "ec2");
        assert_eq!(r.arn, "instance/i-0123");
    }

    #[test]
    fn test_ecs_splits_type_and_id() {
        let r = classify("instance/i-0123", "ecs", "eu-west-1").unwrap();
        assert_eq!(r.product.as_deref(), Some("instance"));
        assert_eq!(r.id, "i-0123");
    }

    #[test]
    fn test_ecs_nested_path_takes_second_segment() {
        let r = classify("service/prod/web", "ecs", "eu-west-1").unwrap();
        assert_eq!(r.product.as_deref(), Some("service"));
        assert_eq!(r.id, "prod");
    }

    #[test]
    fn test_generic_keeps_short_arn() {
        let r = classify("my-bucket", "s3", "us-west-2").unwrap();
        assert_eq!(r.product, None);
        assert_eq!(r.id, "my-bucket");
        assert_eq!(r.arn, "my-bucket");
    }

    #[test]
    fn test_generic_with_slashes_is_not_split() {
        let r = classify("function/my-fn", "lambda", "us-east-1").unwrap();
        assert_eq!(r.product, None);
        assert_eq!(r.id, "function/my-fn");
    }

    #[test]
    fn test_ec2_without_type_segment_is_an_error() {
        let err = classify("i-0123", "ec2", "us-east-1").unwrap_err();
        assert_eq!(
            err,
            ArnError::MissingResourceType {
                service: "ec2".to_string(),
                short_arn: "i-0123".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_full_arn() {
        let r = convert_arn(
            "arn:aws:ec2:us-east-1:123456789012:volume/vol-0abc",
            "us-east-1",
        )
        .unwrap();
        assert_eq!(r.service, "ec2");
        assert_eq!(r.product.as_deref(), Some("volume"));
        assert_eq!(r.id, "vol-0abc");
    }

    #[test]
    fn test_convert_uses_collecting_region() {
        // Global resources report the region they were listed from
        let r = convert_arn("arn:aws:iam::123456789012:role/admin", "eu-north-1").unwrap();
        assert_eq!(r.region, "eu-north-1");
        assert_eq!(r.service, "iam");
        assert_eq!(r.id, "role/admin");
    }

    #[test]
    fn test_convert_malformed() {
        assert!(matches!(
            convert_arn("not-an-arn", "us-east-1"),
            Err(ArnError::TooFewSegments { .. })
        ));
    }

    #[test]
    fn test_family_dispatch() {
        assert_eq!(ServiceFamily::from_service("ec2"), ServiceFamily::Ec2);
        assert_eq!(ServiceFamily::from_service("ecs"), ServiceFamily::Ecs);
        assert_eq!(
            ServiceFamily::from_service("rds"),
            ServiceFamily::Generic("rds".to_string())
        );
        assert_eq!(ServiceFamily::from_service("rds").service_name(), "rds");
    }
}
