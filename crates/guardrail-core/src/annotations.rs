//! Console annotations emitted during traversal.

use serde::{Deserialize, Serialize};

use crate::rules::RuleLevel;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Info,
    Warning,
    Error,
}

impl AnnotationLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl From<RuleLevel> for AnnotationLevel {
    fn from(level: RuleLevel) -> Self {
        match level {
            RuleLevel::Warn => Self::Warning,
            RuleLevel::Error => Self::Error,
        }
    }
}

/// One console message tied to a resource path. Emission order is traversal
/// order and is part of the engine's determinism contract.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub level: AnnotationLevel,
    pub resource_path: String,
    pub message: String,
}

impl Annotation {
    pub fn new(
        level: AnnotationLevel,
        resource_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            resource_path: resource_path.into(),
            message: message.into(),
        }
    }
}
