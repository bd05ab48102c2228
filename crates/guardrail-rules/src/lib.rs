#![forbid(unsafe_code)]

//! Rule packs and the evaluation engine for the guardrail compliance
//! toolkit.

pub mod aws;
pub mod engine;

pub use engine::registry::RuleRegistration;
pub use engine::{ComplianceRule, RulePack};

pub fn core_version() -> &'static str {
    guardrail_core::VERSION
}
