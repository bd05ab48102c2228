//! Verdict types shared between rule callbacks and the engine.

use serde::{Deserialize, Serialize};

/// A rule callback's compliance verdict for one resource.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCompliance {
    Compliant,
    NonCompliant,
    NotApplicable,
}

/// Severity a pack assigns to a rule's violations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Warn,
    Error,
}

impl RuleLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warn => "Warning",
            Self::Error => "Error",
        }
    }
}

/// What a rule callback returns: a bare verdict, or an ordered list of
/// finding qualifiers each implying non-compliance unless suppressed
/// individually. An empty list is equivalent to [`RuleCompliance::Compliant`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleOutcome {
    Compliance(RuleCompliance),
    Findings(Vec<String>),
}

impl RuleOutcome {
    pub const fn compliant() -> Self {
        Self::Compliance(RuleCompliance::Compliant)
    }

    pub const fn non_compliant() -> Self {
        Self::Compliance(RuleCompliance::NonCompliant)
    }

    pub const fn not_applicable() -> Self {
        Self::Compliance(RuleCompliance::NotApplicable)
    }

    pub fn findings(qualifiers: impl IntoIterator<Item = String>) -> Self {
        Self::Findings(qualifiers.into_iter().collect())
    }
}

impl From<RuleCompliance> for RuleOutcome {
    fn from(compliance: RuleCompliance) -> Self {
        Self::Compliance(compliance)
    }
}

#[cfg(test)]
mod tests {
    use super::{RuleLevel, RuleOutcome};

    #[test]
    fn level_labels_match_report_columns() {
        assert_eq!(RuleLevel::Warn.as_str(), "Warning");
        assert_eq!(RuleLevel::Error.as_str(), "Error");
    }

    #[test]
    fn finding_order_is_preserved() {
        let outcome = RuleOutcome::findings(["Action::s3:*".to_string(), "Resource::*".to_string()]);
        assert_eq!(
            outcome,
            RuleOutcome::Findings(vec!["Action::s3:*".to_string(), "Resource::*".to_string()])
        );
    }
}
