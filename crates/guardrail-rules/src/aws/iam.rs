use guardrail_core::model::{PropertyValue, ResourceView};
use guardrail_core::resolve::{ResolveError, resolve_if_primitive, resolve_str};
use guardrail_core::rules::{RuleLevel, RuleOutcome};

use crate::engine::ComplianceRule;

const POLICY_TYPES: [&str; 2] = ["AWS::IAM::Policy", "AWS::IAM::ManagedPolicy"];
const PRINCIPAL_TYPES: [&str; 3] = ["AWS::IAM::Role", "AWS::IAM::User", "AWS::IAM::Group"];

pub struct IamNoWildcardPermissions;

impl ComplianceRule for IamNoWildcardPermissions {
    fn suffix(&self) -> &'static str {
        "IAM5"
    }

    fn info(&self) -> &'static str {
        "The IAM policy grants wildcard permissions."
    }

    fn explanation(&self) -> &'static str {
        "Wildcard actions or resources grant more access than the workload needs. Scope \
         each allow statement to the specific actions and resource ARNs it requires, and \
         add a suppression per remaining wildcard with evidence that it is intentional."
    }

    fn level(&self) -> RuleLevel {
        RuleLevel::Error
    }

    /// Emits one finding qualifier per wildcard entry, `Action::<action>` and
    /// `Resource::<arn>`, in statement order.
    fn check(&self, resource: &ResourceView<'_>) -> Result<RuleOutcome, ResolveError> {
        if !POLICY_TYPES.contains(&resource.cfn_type()) {
            return Ok(RuleOutcome::not_applicable());
        }
        let Some(document) = resource.property("PolicyDocument") else {
            return Ok(RuleOutcome::not_applicable());
        };
        let document = resolve_if_primitive(document)?;
        let statements = document
            .get("Statement")
            .and_then(|value| value.as_list())
            .unwrap_or_default();

        let mut findings = Vec::new();
        for statement in statements {
            let effect = match statement.get("Effect") {
                Some(value) => resolve_str(value)?,
                None => None,
            };
            if effect != Some("Allow") {
                continue;
            }
            collect_wildcards(statement, "Action", "Action::", &mut findings)?;
            collect_wildcards(statement, "Resource", "Resource::", &mut findings)?;
        }
        Ok(RuleOutcome::findings(findings))
    }
}

fn collect_wildcards(
    statement: &PropertyValue,
    key: &str,
    prefix: &str,
    findings: &mut Vec<String>,
) -> Result<(), ResolveError> {
    let Some(value) = statement.get(key) else {
        return Ok(());
    };
    let entries: Vec<&PropertyValue> = match value {
        PropertyValue::List(items) => items.iter().collect(),
        single => vec![single],
    };
    for entry in entries {
        if let Some(text) = resolve_str(entry)? {
            if text.contains('*') {
                findings.push(format!("{prefix}{text}"));
            }
        }
    }
    Ok(())
}

pub struct IamNoAdminManagedPolicy;

impl ComplianceRule for IamNoAdminManagedPolicy {
    fn suffix(&self) -> &'static str {
        "IAM4"
    }

    fn info(&self) -> &'static str {
        "The IAM entity attaches an administrator managed policy."
    }

    fn explanation(&self) -> &'static str {
        "AWS managed administrator policies grant full account access. Replace them with \
         a customer managed policy scoped to the entity's actual duties."
    }

    fn level(&self) -> RuleLevel {
        RuleLevel::Warn
    }

    fn check(&self, resource: &ResourceView<'_>) -> Result<RuleOutcome, ResolveError> {
        if !PRINCIPAL_TYPES.contains(&resource.cfn_type()) {
            return Ok(RuleOutcome::not_applicable());
        }
        let Some(arns) = resource.property("ManagedPolicyArns") else {
            return Ok(RuleOutcome::compliant());
        };
        let arns = resolve_if_primitive(arns)?.as_list().unwrap_or_default();

        let mut findings = Vec::new();
        for arn in arns {
            if let Some(text) = resolve_str(arn)? {
                if text.ends_with("policy/AdministratorAccess") {
                    findings.push(format!("Policy::{text}"));
                }
            }
        }
        Ok(RuleOutcome::findings(findings))
    }
}
