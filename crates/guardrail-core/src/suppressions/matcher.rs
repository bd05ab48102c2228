//! Decides whether a rule violation is silenced by a set of suppression
//! entries.

use regex::Regex;
use tracing::warn;

use crate::suppressions::{AppliesTo, Suppression};

impl AppliesTo {
    /// Full-string, case-sensitive test of one finding qualifier. Patterns
    /// are anchored at compile time so a partial overlap never matches.
    pub fn matches(&self, qualifier: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == qualifier,
            Self::Pattern { regex } => match compile_anchored(regex) {
                Ok(compiled) => compiled.is_match(qualifier),
                Err(error) => {
                    // Entries attached through the registration API are
                    // validated up front; this path only fires for raw
                    // metadata (e.g. a template import).
                    warn!(pattern = %regex, %error, "ignoring uncompilable appliesTo pattern");
                    false
                }
            },
        }
    }
}

pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// First-match suppression lookup.
///
/// Entries are consulted in attachment order. An entry applies when its rule
/// id matches and either it carries no `applies_to` (whole-rule suppression)
/// or the finding qualifier matches one of its `applies_to` matchers. A
/// whole-resource violation (no qualifier) is never silenced by a granular
/// entry.
pub fn suppression_reason<'a>(
    entries: impl IntoIterator<Item = &'a Suppression>,
    rule_id: &str,
    qualifier: Option<&str>,
) -> Option<&'a str> {
    entries
        .into_iter()
        .find(|entry| entry.rule_id == rule_id && entry_applies(entry, qualifier))
        .map(|entry| entry.reason.as_str())
}

fn entry_applies(entry: &Suppression, qualifier: Option<&str>) -> bool {
    if entry.applies_to.is_empty() {
        return true;
    }
    match qualifier {
        Some(qualifier) => entry
            .applies_to
            .iter()
            .any(|applies_to| applies_to.matches(qualifier)),
        None => false,
    }
}
