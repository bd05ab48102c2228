use crate::report::ReportLine;

const FINGERPRINT_VERSION: &str = "v1";

/// Stable identity of one (pack, rule, resource) evaluation across runs.
/// Carried in the JSON report so downstream tooling can track a finding even
/// when line order shifts.
pub fn finding_fingerprint(pack_name: &str, rule_id: &str, resource_id: &str) -> String {
    let payload = format!("{FINGERPRINT_VERSION}|{pack_name}|{rule_id}|{resource_id}");
    blake3::hash(payload.as_bytes()).to_hex().to_string()
}

pub fn line_fingerprint(pack_name: &str, line: &ReportLine) -> String {
    finding_fingerprint(pack_name, &line.rule_id, &line.resource_id)
}
