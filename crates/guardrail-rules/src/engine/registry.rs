use std::collections::BTreeSet;

use crate::engine::ComplianceRule;

/// A rule plus its pack-level registration data.
pub struct RuleRegistration {
    pub rule: Box<dyn ComplianceRule>,
    /// Replaces the rule's own suffix in the externally visible id.
    pub suffix_override: Option<&'static str>,
}

impl RuleRegistration {
    pub fn new(rule: Box<dyn ComplianceRule>) -> Self {
        Self {
            rule,
            suffix_override: None,
        }
    }

    pub fn with_suffix(rule: Box<dyn ComplianceRule>, suffix: &'static str) -> Self {
        Self {
            rule,
            suffix_override: Some(suffix),
        }
    }

    /// Effective id suffix after applying any override.
    pub fn suffix(&self) -> &'static str {
        self.suffix_override.unwrap_or_else(|| self.rule.suffix())
    }
}

pub(crate) fn validate_registry(registry: &[RuleRegistration]) {
    let mut seen = BTreeSet::<&'static str>::new();
    for registration in registry {
        let suffix = registration.suffix();
        assert!(
            !suffix.trim().is_empty(),
            "rule suffix cannot be empty or blank"
        );
        assert!(
            seen.insert(suffix),
            "duplicate rule suffix '{suffix}' in pack registry"
        );
    }
}
