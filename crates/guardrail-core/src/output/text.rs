use std::fmt::Write;

use crate::annotations::{Annotation, AnnotationLevel};
use crate::output::ansi::Colorizer;

/// Inputs for rendering one pack's console annotations.
pub struct AnnotationTextReport<'a> {
    pub pack_name: &'a str,
    pub show_summary: bool,
    pub annotations: &'a [Annotation],
    pub colors: Colorizer,
}

/// Renders annotations in emission order as
/// `"<Level> at <resourcePath>: <message>"`, one block per annotation.
pub fn render_annotations(report: AnnotationTextReport<'_>) -> String {
    let mut output = String::new();

    if report.annotations.is_empty() {
        let _ = writeln!(output, "[{}] No violations.", report.pack_name);
        return output;
    }

    for annotation in report.annotations {
        let label = annotation.level.as_str();
        let label = match annotation.level {
            AnnotationLevel::Info => report.colors.info(label),
            AnnotationLevel::Warning => report.colors.warning(label),
            AnnotationLevel::Error => report.colors.error(label),
        };
        let _ = writeln!(
            output,
            "{label} at {}: {}",
            annotation.resource_path, annotation.message
        );
    }

    if report.show_summary {
        let errors = report
            .annotations
            .iter()
            .filter(|annotation| annotation.level == AnnotationLevel::Error)
            .count();
        let warnings = report
            .annotations
            .iter()
            .filter(|annotation| annotation.level == AnnotationLevel::Warning)
            .count();
        let _ = writeln!(
            output,
            "[{}] annotations={} errors={errors} warnings={warnings}",
            report.pack_name,
            report.annotations.len()
        );
    }

    output
}
