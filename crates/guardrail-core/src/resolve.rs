//! Value resolution used inside rule callbacks.
//!
//! Rules must not silently pass when a property cannot be inspected at
//! evaluation time, so every helper surfaces deferred tokens as a
//! [`ResolveError`] instead of returning a default.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::PropertyValue;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolveError {
    UnresolvedToken { token: String },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedToken { token } => {
                write!(
                    f,
                    "value '{token}' cannot be determined at evaluation time"
                )
            }
        }
    }
}

impl Error for ResolveError {}

/// Returns the value unchanged unless it is a deferred token.
pub fn resolve_if_primitive(value: &PropertyValue) -> Result<&PropertyValue, ResolveError> {
    match value {
        PropertyValue::Token(token) => Err(ResolveError::UnresolvedToken {
            token: token.clone(),
        }),
        other => Ok(other),
    }
}

/// Concrete boolean, `Ok(None)` for a concrete non-boolean value.
pub fn resolve_bool(value: &PropertyValue) -> Result<Option<bool>, ResolveError> {
    Ok(resolve_if_primitive(value)?.as_bool())
}

/// Concrete string, `Ok(None)` for a concrete non-string value.
pub fn resolve_str(value: &PropertyValue) -> Result<Option<&str>, ResolveError> {
    Ok(resolve_if_primitive(value)?.as_str())
}

/// Concrete number, `Ok(None)` for a concrete non-numeric value.
pub fn resolve_num(value: &PropertyValue) -> Result<Option<f64>, ResolveError> {
    Ok(resolve_if_primitive(value)?.as_num())
}

/// The logical id a reference-shaped value points at. Plain strings pass
/// through so rules can treat literal ids and intrinsic references alike.
pub fn resolve_resource_from_intrinsic(value: &PropertyValue) -> Option<&str> {
    match value {
        PropertyValue::Ref { logical_id } => Some(logical_id),
        PropertyValue::GetAtt { logical_id, .. } => Some(logical_id),
        PropertyValue::Str(value) => Some(value),
        _ => None,
    }
}
