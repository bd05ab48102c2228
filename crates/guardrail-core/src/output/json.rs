use serde::Serialize;

use crate::report::fingerprint::line_fingerprint;
use crate::report::ReportLine;

#[derive(Serialize)]
struct JsonReport<'a> {
    pack: &'a str,
    stack: &'a str,
    lines: Vec<JsonReportLine<'a>>,
}

#[derive(Serialize)]
struct JsonReportLine<'a> {
    rule_id: &'a str,
    resource_id: &'a str,
    compliance: &'a str,
    exception_reason: &'a str,
    rule_level: &'a str,
    rule_info: &'a str,
    fingerprint: String,
}

/// JSON rendering of one stack's report, line order preserved. Each line
/// carries a stable fingerprint for cross-run tracking.
pub fn render_report(
    pack_name: &str,
    stack_name: &str,
    lines: &[ReportLine],
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        pack: pack_name,
        stack: stack_name,
        lines: lines
            .iter()
            .map(|line| JsonReportLine {
                rule_id: &line.rule_id,
                resource_id: &line.resource_id,
                compliance: line.compliance.as_str(),
                exception_reason: &line.exception_reason,
                rule_level: line.rule_level.as_str(),
                rule_info: &line.rule_info,
                fingerprint: line_fingerprint(pack_name, line),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::render_report;
    use crate::report::{NO_EXCEPTION, ReportCompliance, ReportLine};
    use crate::rules::RuleLevel;

    #[test]
    fn lines_serialize_with_fingerprints() {
        let lines = vec![ReportLine {
            rule_id: "Pack-S1".to_string(),
            resource_id: "/App/Bucket/Resource".to_string(),
            compliance: ReportCompliance::Compliant,
            exception_reason: NO_EXCEPTION.to_string(),
            rule_level: RuleLevel::Error,
            rule_info: "The S3 bucket does not have server-side encryption enabled.".to_string(),
        }];
        let rendered = render_report("Pack", "App", &lines).expect("report serializes");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(parsed["pack"], "Pack");
        assert_eq!(parsed["stack"], "App");
        assert_eq!(parsed["lines"][0]["compliance"], "Compliant");
        assert_eq!(
            parsed["lines"][0]["fingerprint"]
                .as_str()
                .expect("fingerprint is a string")
                .len(),
            64
        );
    }
}
