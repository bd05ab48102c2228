//! The tree visitor: runs every registered rule against every resource node,
//! consults suppressions and routes outcomes to annotations and the
//! compliance report.

pub mod registry;

use std::io;
use std::path::{Path, PathBuf};

use guardrail_core::annotations::{Annotation, AnnotationLevel};
use guardrail_core::config::PackProps;
use guardrail_core::model::{ConstructNode, NodeKind, ResourceView};
use guardrail_core::output::ansi::{Colorizer, Stream};
use guardrail_core::output::text::{AnnotationTextReport, render_annotations};
use guardrail_core::report::{
    ComplianceReportStore, NO_EXCEPTION, ReportCompliance, ReportLine,
};
use guardrail_core::resolve::ResolveError;
use guardrail_core::rules::{RuleCompliance, RuleLevel, RuleOutcome};
use guardrail_core::suppressions::{Suppression, suppression_reason};
use tracing::{debug, warn};

use self::registry::{RuleRegistration, validate_registry};

/// One named compliance check. Implementations are pure: the verdict depends
/// only on the resource handed in.
pub trait ComplianceRule {
    /// Rule id suffix within the pack, e.g. `"S1"`.
    fn suffix(&self) -> &'static str;
    /// Short violation message.
    fn info(&self) -> &'static str;
    /// Extended explanation, appended in verbose mode.
    fn explanation(&self) -> &'static str;
    fn level(&self) -> RuleLevel;
    fn check(&self, resource: &ResourceView<'_>) -> Result<RuleOutcome, ResolveError>;
}

/// A named collection of rules evaluated in one traversal pass.
///
/// `visit_tree` resets all per-run state first, so evaluating the same tree
/// twice produces identical annotations and report content.
pub struct RulePack {
    name: String,
    registry: Vec<RuleRegistration>,
    props: PackProps,
    annotations: Vec<Annotation>,
    reports: ComplianceReportStore,
}

/// Stack context carried down the traversal: the name of the nearest
/// enclosing stack and the suppression entries attached to it.
#[derive(Clone, Debug, Default)]
struct StackScope {
    stack_name: Option<String>,
    suppressions: Vec<Suppression>,
}

impl RulePack {
    /// Panics when the registry carries duplicate or empty rule suffixes;
    /// a malformed pack is a programming error, not a runtime condition.
    pub fn new(name: impl Into<String>, registry: Vec<RuleRegistration>, props: PackProps) -> Self {
        validate_registry(&registry);
        Self {
            name: name.into(),
            registry,
            props,
            annotations: Vec::new(),
            reports: ComplianceReportStore::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &PackProps {
        &self.props
    }

    /// Console annotations from the last `visit_tree` run, in emission order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn report_store(&self) -> &ComplianceReportStore {
        &self.reports
    }

    /// Depth-first, parent-before-children evaluation of the whole tree.
    pub fn visit_tree(&mut self, root: &ConstructNode) {
        self.annotations.clear();
        self.reports.clear();
        self.visit_node(root, "", &StackScope::default());
    }

    pub fn render_annotations(&self) -> String {
        render_annotations(AnnotationTextReport {
            pack_name: &self.name,
            show_summary: true,
            annotations: &self.annotations,
            colors: Colorizer::for_stream(Stream::Stdout),
        })
    }

    /// Flushes the per-stack compliance reports, honoring the `reports`
    /// option. Returns the written paths.
    pub fn write_reports(&self, out_dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.props.reports {
            return Ok(Vec::new());
        }
        self.reports
            .write_to_dir(out_dir, &self.name, &self.props.report_formats)
    }

    fn visit_node(&mut self, node: &ConstructNode, parent_path: &str, scope: &StackScope) {
        let path = format!("{parent_path}/{}", node.id());

        // A stack node opens a fresh scope: its resources see that stack's
        // entries only. Crossing into a nested stack therefore requires the
        // structural copy performed by `add_stack_suppressions` with
        // `apply_to_nested_stacks`.
        let entered;
        let scope = if let NodeKind::Stack { stack_name, .. } = node.kind() {
            debug!(stack = %stack_name, path = %path, "entering stack scope");
            entered = StackScope {
                stack_name: Some(stack_name.clone()),
                suppressions: node.suppressions().to_vec(),
            };
            &entered
        } else {
            scope
        };

        if node.is_resource() {
            self.run_rules(node, &path, scope);
        }

        for child in node.children() {
            self.visit_node(child, &path, scope);
        }
    }

    fn run_rules(&mut self, node: &ConstructNode, path: &str, scope: &StackScope) {
        let view = ResourceView::new(path, node);
        let evaluations: Vec<RuleEvaluation> = self
            .registry
            .iter()
            .map(|registration| evaluate_rule(&self.name, registration, &view))
            .collect();
        for evaluation in evaluations {
            self.route(evaluation, &view, node.suppressions(), scope);
        }
    }

    fn route(
        &mut self,
        evaluation: RuleEvaluation,
        view: &ResourceView<'_>,
        own_suppressions: &[Suppression],
        scope: &StackScope,
    ) {
        match &evaluation.disposition {
            Disposition::Skipped => {}
            Disposition::Compliant => {
                self.record(
                    scope,
                    view,
                    &evaluation,
                    ReportCompliance::Compliant,
                    NO_EXCEPTION.to_string(),
                );
            }
            Disposition::Violated { qualifiers } => {
                let mut unsuppressed = 0usize;
                let mut first_reason: Option<String> = None;

                for qualifier in qualifiers {
                    let matched = suppression_reason(
                        own_suppressions.iter().chain(scope.suppressions.iter()),
                        &evaluation.rule_id,
                        qualifier.as_deref(),
                    );
                    match matched {
                        Some(reason) => {
                            if first_reason.is_none() {
                                first_reason = Some(reason.to_string());
                            }
                            if self.props.log_ignores {
                                self.annotations.push(Annotation::new(
                                    AnnotationLevel::Info,
                                    view.path(),
                                    format!(
                                        "Suppressed {}: {reason}",
                                        violation_id(&evaluation, qualifier.as_deref())
                                    ),
                                ));
                            }
                        }
                        None => {
                            unsuppressed += 1;
                            self.annotations.push(Annotation::new(
                                AnnotationLevel::from(evaluation.level),
                                view.path(),
                                violation_message(
                                    &evaluation,
                                    qualifier.as_deref(),
                                    self.props.verbose,
                                ),
                            ));
                        }
                    }
                }

                if unsuppressed == 0 {
                    let reason = first_reason.unwrap_or_else(|| NO_EXCEPTION.to_string());
                    self.record(scope, view, &evaluation, ReportCompliance::Suppressed, reason);
                } else {
                    self.record(
                        scope,
                        view,
                        &evaluation,
                        ReportCompliance::NonCompliant,
                        NO_EXCEPTION.to_string(),
                    );
                }
            }
        }
    }

    fn record(
        &mut self,
        scope: &StackScope,
        view: &ResourceView<'_>,
        evaluation: &RuleEvaluation,
        compliance: ReportCompliance,
        exception_reason: String,
    ) {
        let Some(stack_name) = scope.stack_name.as_deref() else {
            warn!(
                resource = %view.path(),
                rule = %evaluation.rule_id,
                "resource does not belong to a stack, dropping report line"
            );
            return;
        };
        self.reports.append(
            stack_name,
            ReportLine {
                rule_id: evaluation.rule_id.clone(),
                resource_id: view.path().to_string(),
                compliance,
                exception_reason,
                rule_level: evaluation.level,
                rule_info: evaluation.info.clone(),
            },
        );
    }
}

struct RuleEvaluation {
    rule_id: String,
    level: RuleLevel,
    info: String,
    explanation: &'static str,
    disposition: Disposition,
}

enum Disposition {
    Skipped,
    Compliant,
    /// One entry per finding qualifier; `None` is the whole-resource case.
    Violated { qualifiers: Vec<Option<String>> },
}

fn evaluate_rule(
    pack_name: &str,
    registration: &RuleRegistration,
    view: &ResourceView<'_>,
) -> RuleEvaluation {
    let rule = registration.rule.as_ref();
    let rule_id = format!("{pack_name}-{}", registration.suffix());
    let mut info = rule.info().to_string();

    let disposition = match rule.check(view) {
        Ok(RuleOutcome::Compliance(RuleCompliance::Compliant)) => Disposition::Compliant,
        Ok(RuleOutcome::Compliance(RuleCompliance::NotApplicable)) => Disposition::Skipped,
        Ok(RuleOutcome::Compliance(RuleCompliance::NonCompliant)) => Disposition::Violated {
            qualifiers: vec![None],
        },
        Ok(RuleOutcome::Findings(findings)) => {
            if findings.is_empty() {
                Disposition::Compliant
            } else {
                Disposition::Violated {
                    qualifiers: findings.into_iter().map(Some).collect(),
                }
            }
        }
        Err(error) => {
            // The property could not be verified safe, so the finding is
            // indeterminate and reported as a violation.
            info = format!("{info} ({error})");
            Disposition::Violated {
                qualifiers: vec![None],
            }
        }
    };

    RuleEvaluation {
        rule_id,
        level: rule.level(),
        info,
        explanation: rule.explanation(),
        disposition,
    }
}

fn violation_id(evaluation: &RuleEvaluation, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(qualifier) => format!("{}[{qualifier}]", evaluation.rule_id),
        None => evaluation.rule_id.clone(),
    }
}

fn violation_message(
    evaluation: &RuleEvaluation,
    qualifier: Option<&str>,
    verbose: bool,
) -> String {
    let mut message = format!("{}: {}", violation_id(evaluation, qualifier), evaluation.info);
    if verbose {
        message.push('\n');
        message.push_str(evaluation.explanation);
    }
    message
}
