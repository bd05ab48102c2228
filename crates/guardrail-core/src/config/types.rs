use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::report::ReportFormat;

/// Evaluation options recognized by a rule pack.
#[derive(Clone, Debug, PartialEq)]
pub struct PackProps {
    /// Include rule explanations in violation messages.
    pub verbose: bool,
    /// Emit informational annotations for suppressed findings.
    pub log_ignores: bool,
    /// Whether compliance report artifacts are written at all.
    pub reports: bool,
    pub report_formats: Vec<ReportFormat>,
}

impl Default for PackProps {
    fn default() -> Self {
        Self {
            verbose: false,
            log_ignores: false,
            reports: true,
            report_formats: vec![ReportFormat::Csv],
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub pack: RawPack,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawPack {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub log_ignores: bool,
    #[serde(default = "default_reports")]
    pub reports: bool,
    #[serde(default = "default_report_formats")]
    pub report_formats: Vec<String>,
}

impl Default for RawPack {
    fn default() -> Self {
        Self {
            verbose: false,
            log_ignores: false,
            reports: default_reports(),
            report_formats: default_report_formats(),
        }
    }
}

fn default_reports() -> bool {
    true
}

fn default_report_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub pack: PackProps,
}

impl Config {
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let report_formats = raw
            .pack
            .report_formats
            .iter()
            .map(|format| match format.as_str() {
                "csv" => Ok(ReportFormat::Csv),
                "json" => Ok(ReportFormat::Json),
                other => Err(ConfigError::UnknownReportFormat {
                    format: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            pack: PackProps {
                verbose: raw.pack.verbose,
                log_ignores: raw.pack.log_ignores,
                reports: raw.pack.reports,
                report_formats,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pack: PackProps::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, RawConfig};
    use crate::config::ConfigError;
    use crate::report::ReportFormat;

    #[test]
    fn defaults_match_engine_defaults() {
        let config = Config::from_raw(RawConfig::default()).expect("defaults are valid");
        assert!(!config.pack.verbose);
        assert!(!config.pack.log_ignores);
        assert!(config.pack.reports);
        assert_eq!(config.pack.report_formats, vec![ReportFormat::Csv]);
    }

    #[test]
    fn unknown_report_formats_are_rejected() {
        let raw: RawConfig =
            toml::from_str("[pack]\nreport_formats = [\"xml\"]\n").expect("toml parses");
        let err = Config::from_raw(raw).expect_err("xml is not a report format");
        assert!(matches!(err, ConfigError::UnknownReportFormat { format } if format == "xml"));
    }
}
