use guardrail_core::model::ResourceView;
use guardrail_core::resolve::{ResolveError, resolve_bool, resolve_if_primitive};
use guardrail_core::rules::{RuleLevel, RuleOutcome};

use crate::engine::ComplianceRule;

const BUCKET_TYPE: &str = "AWS::S3::Bucket";

pub struct S3BucketServerSideEncryption;

impl ComplianceRule for S3BucketServerSideEncryption {
    fn suffix(&self) -> &'static str {
        "S1"
    }

    fn info(&self) -> &'static str {
        "The S3 bucket does not have default server-side encryption enabled."
    }

    fn explanation(&self) -> &'static str {
        "Default encryption ensures every object is encrypted at rest without relying on \
         callers to set request headers. Configure a server-side encryption rule on the \
         bucket's BucketEncryption property."
    }

    fn level(&self) -> RuleLevel {
        RuleLevel::Error
    }

    fn check(&self, resource: &ResourceView<'_>) -> Result<RuleOutcome, ResolveError> {
        if resource.cfn_type() != BUCKET_TYPE {
            return Ok(RuleOutcome::not_applicable());
        }
        let Some(encryption) = resource.property("BucketEncryption") else {
            return Ok(RuleOutcome::non_compliant());
        };
        let encryption = resolve_if_primitive(encryption)?;
        let rules = encryption
            .get("ServerSideEncryptionConfiguration")
            .and_then(|value| value.as_list())
            .unwrap_or_default();
        if rules.is_empty() {
            return Ok(RuleOutcome::non_compliant());
        }
        Ok(RuleOutcome::compliant())
    }
}

pub struct S3BucketPublicAccessBlock;

const ACCESS_BLOCK_FLAGS: [&str; 4] = [
    "BlockPublicAcls",
    "BlockPublicPolicy",
    "IgnorePublicAcls",
    "RestrictPublicBuckets",
];

impl ComplianceRule for S3BucketPublicAccessBlock {
    fn suffix(&self) -> &'static str {
        "S2"
    }

    fn info(&self) -> &'static str {
        "The S3 bucket does not block public access."
    }

    fn explanation(&self) -> &'static str {
        "The bucket-level public access block should set BlockPublicAcls, \
         BlockPublicPolicy, IgnorePublicAcls and RestrictPublicBuckets so that neither \
         ACLs nor bucket policies can open the bucket to the public."
    }

    fn level(&self) -> RuleLevel {
        RuleLevel::Error
    }

    fn check(&self, resource: &ResourceView<'_>) -> Result<RuleOutcome, ResolveError> {
        if resource.cfn_type() != BUCKET_TYPE {
            return Ok(RuleOutcome::not_applicable());
        }
        let Some(config) = resource.property("PublicAccessBlockConfiguration") else {
            return Ok(RuleOutcome::non_compliant());
        };
        let config = resolve_if_primitive(config)?;
        for flag in ACCESS_BLOCK_FLAGS {
            let enabled = match config.get(flag) {
                Some(value) => resolve_bool(value)?,
                None => None,
            };
            if enabled != Some(true) {
                return Ok(RuleOutcome::non_compliant());
            }
        }
        Ok(RuleOutcome::compliant())
    }
}
