//! The built-in `AwsSolutions` pack.

pub mod iam;
pub mod s3;

use guardrail_core::config::PackProps;

use self::iam::{IamNoAdminManagedPolicy, IamNoWildcardPermissions};
use self::s3::{S3BucketPublicAccessBlock, S3BucketServerSideEncryption};
use crate::engine::RulePack;
use crate::engine::registry::RuleRegistration;

pub const PACK_NAME: &str = "AwsSolutions";

pub fn full_registry() -> Vec<RuleRegistration> {
    vec![
        RuleRegistration::new(Box::new(S3BucketServerSideEncryption)),
        RuleRegistration::new(Box::new(S3BucketPublicAccessBlock)),
        RuleRegistration::new(Box::new(IamNoAdminManagedPolicy)),
        RuleRegistration::new(Box::new(IamNoWildcardPermissions)),
    ]
}

pub fn aws_solutions_pack(props: PackProps) -> RulePack {
    RulePack::new(PACK_NAME, full_registry(), props)
}
