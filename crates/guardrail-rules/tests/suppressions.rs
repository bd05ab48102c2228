use guardrail_core::annotations::AnnotationLevel;
use guardrail_core::config::PackProps;
use guardrail_core::model::{ConstructNode, PropertyValue};
use guardrail_core::report::ReportCompliance;
use guardrail_core::suppressions::{
    Suppression, add_resource_suppressions, add_stack_suppressions,
};
use guardrail_rules::aws::aws_solutions_pack;

fn wildcard_policy(id: &str) -> ConstructNode {
    ConstructNode::resource(id, "AWS::IAM::Policy").with_property(
        "PolicyDocument",
        PropertyValue::map([(
            "Statement",
            PropertyValue::list([PropertyValue::map([
                ("Effect", PropertyValue::from("Allow")),
                ("Action", PropertyValue::list([PropertyValue::from("s3:*")])),
                ("Resource", PropertyValue::list([PropertyValue::from("*")])),
            ])]),
        )]),
    )
}

#[test]
fn granular_suppression_silences_only_the_named_finding() {
    let mut policy = wildcard_policy("Policy");
    add_resource_suppressions(
        &mut policy,
        &[Suppression::new("AwsSolutions-IAM5", "bucket listing is intentional")
            .applies_to("Action::s3:*")],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App").with_child(policy);

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    let annotations = pack.annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(
        annotations[0].message,
        "AwsSolutions-IAM5[Resource::*]: The IAM policy grants wildcard permissions."
    );

    // One finding survived, so the line stays Non-Compliant.
    let lines = pack.report_store().lines("App");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].compliance, ReportCompliance::NonCompliant);
}

#[test]
fn whole_rule_suppression_covers_every_finding() {
    let mut policy = wildcard_policy("Policy");
    add_resource_suppressions(
        &mut policy,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "wildcard reviewed in threat model",
        )],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App").with_child(policy);

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    assert!(pack.annotations().is_empty());
    let lines = pack.report_store().lines("App");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].compliance, ReportCompliance::Suppressed);
    assert_eq!(lines[0].exception_reason, "wildcard reviewed in threat model");
}

#[test]
fn regex_patterns_match_the_full_qualifier() {
    let mut policy = wildcard_policy("Policy");
    add_resource_suppressions(
        &mut policy,
        &[Suppression::new("AwsSolutions-IAM5", "s3 actions are scoped by bucket policy")
            .applies_to_pattern("Action::s3:.*")],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App").with_child(policy);

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    let annotations = pack.annotations();
    assert_eq!(annotations.len(), 1);
    assert!(annotations[0].message.starts_with("AwsSolutions-IAM5[Resource::*]"));
}

#[test]
fn partial_regex_matches_do_not_suppress() {
    let mut policy = wildcard_policy("Policy");
    // "Action::s3" matches only a prefix of "Action::s3:*", and patterns are
    // applied as full-string tests.
    add_resource_suppressions(
        &mut policy,
        &[Suppression::new("AwsSolutions-IAM5", "s3 actions are scoped by bucket policy")
            .applies_to_pattern("Action::s3")],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App").with_child(policy);

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    assert_eq!(pack.annotations().len(), 2);
}

#[test]
fn stack_suppressions_cover_direct_resources() {
    let mut tree = ConstructNode::stack("App").with_child(wildcard_policy("Policy"));
    add_stack_suppressions(
        &mut tree,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "stack-wide waiver from the platform team",
        )],
        false,
    )
    .expect("valid suppression");

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    assert!(pack.annotations().is_empty());
    assert_eq!(
        pack.report_store().lines("App")[0].compliance,
        ReportCompliance::Suppressed
    );
}

#[test]
fn stack_suppressions_stop_at_nested_stack_boundaries() {
    let mut tree = ConstructNode::stack("App")
        .with_child(ConstructNode::nested_stack("Child").with_child(wildcard_policy("Policy")));
    add_stack_suppressions(
        &mut tree,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "stack-wide waiver from the platform team",
        )],
        false,
    )
    .expect("valid suppression");

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    // The nested stack opens its own scope; without the nested-stack copy
    // the violation stays visible.
    assert_eq!(pack.annotations().len(), 2);
    assert_eq!(
        pack.report_store().lines("Child")[0].compliance,
        ReportCompliance::NonCompliant
    );
}

#[test]
fn nested_stack_copy_extends_the_waiver() {
    let mut tree = ConstructNode::stack("App")
        .with_child(ConstructNode::nested_stack("Child").with_child(wildcard_policy("Policy")));
    add_stack_suppressions(
        &mut tree,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "stack-wide waiver from the platform team",
        )],
        true,
    )
    .expect("valid suppression");

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    assert!(pack.annotations().is_empty());
    assert_eq!(
        pack.report_store().lines("Child")[0].compliance,
        ReportCompliance::Suppressed
    );
}

#[test]
fn log_ignores_surfaces_suppressions_as_info() {
    let mut policy = wildcard_policy("Policy");
    add_resource_suppressions(
        &mut policy,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "wildcard reviewed in threat model",
        )],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App").with_child(policy);

    let props = PackProps {
        log_ignores: true,
        ..PackProps::default()
    };
    let mut pack = aws_solutions_pack(props);
    pack.visit_tree(&tree);

    let annotations = pack.annotations();
    assert_eq!(annotations.len(), 2);
    assert!(annotations.iter().all(|a| a.level == AnnotationLevel::Info));
    assert_eq!(
        annotations[0].message,
        "Suppressed AwsSolutions-IAM5[Action::s3:*]: wildcard reviewed in threat model"
    );
}

#[test]
fn suppressions_do_not_leak_across_resources() {
    let mut covered = wildcard_policy("Covered");
    add_resource_suppressions(
        &mut covered,
        &[Suppression::new(
            "AwsSolutions-IAM5",
            "wildcard reviewed in threat model",
        )],
        false,
    )
    .expect("valid suppression");
    let tree = ConstructNode::stack("App")
        .with_child(covered)
        .with_child(wildcard_policy("Bare"));

    let mut pack = aws_solutions_pack(PackProps::default());
    pack.visit_tree(&tree);

    let annotations = pack.annotations();
    assert_eq!(annotations.len(), 2);
    assert!(annotations.iter().all(|a| a.resource_path == "/App/Bare"));

    let lines = pack.report_store().lines("App");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].compliance, ReportCompliance::Suppressed);
    assert_eq!(lines[1].compliance, ReportCompliance::NonCompliant);
}
