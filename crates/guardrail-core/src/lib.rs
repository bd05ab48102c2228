#![forbid(unsafe_code)]

//! Core types for the suppression-aware compliance engine: the construct
//! tree model, suppression entries and matching, value resolution, report
//! buffers and output rendering.

pub mod annotations;
pub mod config;
pub mod model;
pub mod output;
pub mod report;
pub mod resolve;
pub mod rules;
pub mod suppressions;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
