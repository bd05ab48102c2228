//! Per-stack compliance report buffers and the end-of-run flush.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::output;
use crate::rules::RuleLevel;

pub mod fingerprint;

pub use fingerprint::finding_fingerprint;

/// Exception-reason column value for lines that are not suppressed.
pub const NO_EXCEPTION: &str = "N/A";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum ReportCompliance {
    #[serde(rename = "Compliant")]
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    #[serde(rename = "Suppressed")]
    Suppressed,
}

impl ReportCompliance {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::Suppressed => "Suppressed",
        }
    }
}

/// One (resource, rule) evaluation outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub rule_id: String,
    pub resource_id: String,
    pub compliance: ReportCompliance,
    pub exception_reason: String,
    pub rule_level: RuleLevel,
    pub rule_info: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Accumulates report lines per stack, in visitation order, and flushes one
/// artifact per stack per format at end of run. Re-running overwrites prior
/// artifacts; nothing is appended across runs.
#[derive(Clone, Debug, Default)]
pub struct ComplianceReportStore {
    stacks: BTreeMap<String, Vec<ReportLine>>,
}

impl ComplianceReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn append(&mut self, stack_name: &str, line: ReportLine) {
        self.stacks
            .entry(stack_name.to_string())
            .or_default()
            .push(line);
    }

    pub fn lines(&self, stack_name: &str) -> &[ReportLine] {
        self.stacks
            .get(stack_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn stacks(&self) -> impl Iterator<Item = (&str, &[ReportLine])> {
        self.stacks
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    /// Writes `<Pack>-<Stack>-ComplianceReport.<ext>` per stack per format,
    /// returning the written paths in deterministic order.
    pub fn write_to_dir(
        &self,
        out_dir: &Path,
        pack_name: &str,
        formats: &[ReportFormat],
    ) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;
        let mut written = Vec::new();
        for (stack_name, lines) in self.stacks() {
            for format in formats {
                let file_name = format!(
                    "{pack_name}-{stack_name}-ComplianceReport.{}",
                    format.extension()
                );
                let content = match format {
                    ReportFormat::Csv => output::csv::render_report(lines),
                    ReportFormat::Json => {
                        output::json::render_report(pack_name, stack_name, lines)
                            .map_err(io::Error::other)?
                    }
                };
                let path = out_dir.join(file_name);
                fs::write(&path, content)?;
                debug!(path = %path.display(), "wrote compliance report");
                written.push(path);
            }
        }
        Ok(written)
    }
}
