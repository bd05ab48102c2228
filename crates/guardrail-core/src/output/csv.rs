use std::fmt::Write;

use crate::report::ReportLine;

const REPORT_HEADER: &str =
    "Rule ID,Resource ID,Compliance,Exception Reason,Rule Level,Rule Info";

/// Renders one stack's report lines as CSV with the stable column order
/// `Rule ID, Resource ID, Compliance, Exception Reason, Rule Level, Rule
/// Info`. Lines appear in the order they were recorded.
pub fn render_report(lines: &[ReportLine]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{REPORT_HEADER}");
    for line in lines {
        let fields = [
            line.rule_id.as_str(),
            line.resource_id.as_str(),
            line.compliance.as_str(),
            line.exception_reason.as_str(),
            line.rule_level.as_str(),
            line.rule_info.as_str(),
        ];
        let row = fields.map(escape_field).join(",");
        let _ = writeln!(output, "{row}");
    }
    output
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{REPORT_HEADER, escape_field, render_report};
    use crate::report::{NO_EXCEPTION, ReportCompliance, ReportLine};
    use crate::rules::RuleLevel;

    #[test]
    fn header_precedes_lines_in_recorded_order() {
        let lines = vec![
            ReportLine {
                rule_id: "Pack-S1".to_string(),
                resource_id: "/App/Bucket/Resource".to_string(),
                compliance: ReportCompliance::NonCompliant,
                exception_reason: NO_EXCEPTION.to_string(),
                rule_level: RuleLevel::Error,
                rule_info: "The S3 bucket does not have server-side encryption enabled."
                    .to_string(),
            },
            ReportLine {
                rule_id: "Pack-IAM4".to_string(),
                resource_id: "/App/Role/Resource".to_string(),
                compliance: ReportCompliance::Suppressed,
                exception_reason: "approved by security team".to_string(),
                rule_level: RuleLevel::Warn,
                rule_info: "The IAM entity attaches an administrator policy.".to_string(),
            },
        ];
        let rendered = render_report(&lines);
        let mut rows = rendered.lines();
        assert_eq!(rows.next(), Some(REPORT_HEADER));
        assert_eq!(
            rows.next(),
            Some(
                "Pack-S1,/App/Bucket/Resource,Non-Compliant,N/A,Error,\
                 The S3 bucket does not have server-side encryption enabled."
            )
        );
        assert_eq!(
            rows.next(),
            Some(
                "Pack-IAM4,/App/Role/Resource,Suppressed,approved by security team,\
                 Warning,The IAM entity attaches an administrator policy."
            )
        );
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a, b"), "\"a, b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
