//! Suppression entries and the registration API that attaches them to nodes.
//!
//! Registration is the hard-failure side of the engine: a too-short reason or
//! an uncompilable pattern indicates a caller mistake and surfaces
//! immediately, before anything is attached. Matching (the soft side) lives
//! in [`matcher`].

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::ConstructNode;

pub mod matcher;

pub use matcher::suppression_reason;

/// Suppression reasons shorter than this are rejected at registration.
pub const MIN_REASON_LENGTH: usize = 10;

/// A user-authored justification silencing one rule on one node, optionally
/// scoped to specific finding qualifiers through `applies_to`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Suppression {
    #[serde(rename = "id")]
    pub rule_id: String,
    pub reason: String,
    #[serde(
        default,
        rename = "appliesTo",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub applies_to: Vec<AppliesTo>,
}

impl Suppression {
    pub fn new(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            reason: reason.into(),
            applies_to: Vec::new(),
        }
    }

    pub fn applies_to(mut self, qualifier: impl Into<String>) -> Self {
        self.applies_to.push(AppliesTo::Literal(qualifier.into()));
        self
    }

    pub fn applies_to_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.applies_to.push(AppliesTo::Pattern {
            regex: pattern.into(),
        });
        self
    }
}

/// Granular finding matcher: an exact qualifier string, or a regex applied as
/// a full-string, case-sensitive test.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppliesTo {
    Literal(String),
    Pattern { regex: String },
}

#[derive(Debug)]
pub enum SuppressionError {
    ReasonTooShort {
        rule_id: String,
        reason: String,
    },
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    PathNotFound {
        path: String,
    },
    NotAStack {
        id: String,
    },
}

impl Display for SuppressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReasonTooShort { rule_id, reason } => write!(
                f,
                "suppression reason for rule '{rule_id}' must be at least \
                 {MIN_REASON_LENGTH} characters, got '{reason}'"
            ),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid appliesTo pattern '{pattern}': {source}")
            }
            Self::PathNotFound { path } => {
                write!(f, "no construct found at path '{path}'")
            }
            Self::NotAStack { id } => {
                write!(f, "construct '{id}' is not a stack")
            }
        }
    }
}

impl Error for SuppressionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Attaches `entries` to `node`, and to every descendant when
/// `apply_to_children` is set. Validation runs before anything is attached,
/// so a failed call leaves the tree untouched.
pub fn add_resource_suppressions(
    node: &mut ConstructNode,
    entries: &[Suppression],
    apply_to_children: bool,
) -> Result<(), SuppressionError> {
    validate_entries(entries)?;
    attach_recursive(node, entries, apply_to_children);
    Ok(())
}

/// Resolves `path` against the tree rooted at `root`, then behaves like
/// [`add_resource_suppressions`].
pub fn add_resource_suppressions_by_path(
    root: &mut ConstructNode,
    path: &str,
    entries: &[Suppression],
    apply_to_children: bool,
) -> Result<(), SuppressionError> {
    validate_entries(entries)?;
    let node = root
        .find_node_mut(path)
        .ok_or_else(|| SuppressionError::PathNotFound {
            path: path.to_string(),
        })?;
    attach_recursive(node, entries, apply_to_children);
    Ok(())
}

/// Attaches `entries` to a stack node; stack-level entries are evaluated
/// against every resource in that stack during traversal. With
/// `apply_to_nested_stacks` the entries are copied onto nested stack nodes
/// as well.
pub fn add_stack_suppressions(
    stack: &mut ConstructNode,
    entries: &[Suppression],
    apply_to_nested_stacks: bool,
) -> Result<(), SuppressionError> {
    if !stack.is_stack() {
        return Err(SuppressionError::NotAStack {
            id: stack.id().to_string(),
        });
    }
    validate_entries(entries)?;
    stack.attach_suppressions(entries.iter().cloned());
    if apply_to_nested_stacks {
        attach_to_nested_stacks(stack, entries);
    }
    Ok(())
}

fn attach_recursive(node: &mut ConstructNode, entries: &[Suppression], recurse: bool) {
    node.attach_suppressions(entries.iter().cloned());
    if recurse {
        for child in node.children_mut() {
            attach_recursive(child, entries, true);
        }
    }
}

fn attach_to_nested_stacks(node: &mut ConstructNode, entries: &[Suppression]) {
    for child in node.children_mut() {
        if child.is_stack() {
            child.attach_suppressions(entries.iter().cloned());
        }
        attach_to_nested_stacks(child, entries);
    }
}

fn validate_entries(entries: &[Suppression]) -> Result<(), SuppressionError> {
    for entry in entries {
        if entry.reason.chars().count() < MIN_REASON_LENGTH {
            return Err(SuppressionError::ReasonTooShort {
                rule_id: entry.rule_id.clone(),
                reason: entry.reason.clone(),
            });
        }
        for applies_to in &entry.applies_to {
            if let AppliesTo::Pattern { regex } = applies_to {
                matcher::compile_anchored(regex).map_err(|source| {
                    SuppressionError::InvalidPattern {
                        pattern: regex.clone(),
                        source,
                    }
                })?;
            }
        }
    }
    Ok(())
}
