use colored::Colorize;
use onc_value::{ObjectExt, Value};

use crate::diagnostics::{Issue, Severity};
use crate::import::ImportOutcome;
use crate::names::network;
use crate::validator::{Validation, Verdict};

/// Render an import outcome for terminal output.
pub fn render_import_text(outcome: &ImportOutcome, profile_source: Option<&str>) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "import source={} verdict={} success={}",
        outcome.source,
        render_verdict(outcome.verdict),
        render_success(outcome.success)
    ));
    if let Some(source) = profile_source {
        out.push(format!("Using profile: {source}"));
    }
    out.push(format!(
        "result networks={} certificates={} dropped={}",
        outcome.network_configs.len(),
        outcome.certificates.len(),
        outcome.dropped_networks.len()
    ));

    out.push("networks".to_string());
    if outcome.network_configs.is_empty() {
        out.push("- none".to_string());
    }
    for entry in &outcome.network_configs {
        out.push(render_network_line(entry));
    }

    if !outcome.dropped_networks.is_empty() {
        out.push("dropped".to_string());
        for guid in &outcome.dropped_networks {
            out.push(format!("- {}", guid.red()));
        }
    }

    out.push("issues".to_string());
    append_issues(&mut out, &outcome.issues);
    out.join("\n")
}

/// Render a validation run for terminal output.
pub fn render_validation_text(validation: &Validation) -> String {
    let errors = count(&validation.issues, Severity::Error);
    let warnings = count(&validation.issues, Severity::Warning);
    let mut out = vec![
        format!("validate verdict={}", render_verdict(validation.verdict)),
        format!("result errors={errors} warnings={warnings}"),
        "issues".to_string(),
    ];
    append_issues(&mut out, &validation.issues);
    out.join("\n")
}

fn render_network_line(entry: &Value) -> String {
    let Some(object) = entry.as_object() else {
        return "- ?".to_string();
    };
    let guid = object.get_str(network::GUID).unwrap_or("?");
    let kind = object.get_str(network::TYPE).unwrap_or("?");
    match object.get_str(network::NAME) {
        Some(name) => format!("- {} [{kind}] {name}", guid.bold()),
        None => format!("- {} [{kind}]", guid.bold()),
    }
}

fn append_issues(out: &mut Vec<String>, issues: &[Issue]) {
    if issues.is_empty() {
        out.push("- none".to_string());
        return;
    }
    for issue in issues {
        let severity = match issue.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
        };
        if issue.path.is_empty() {
            out.push(format!("- [{severity}] {}: {}", issue.code, issue.message));
        } else {
            out.push(format!(
                "- [{severity}] {} at {}: {}",
                issue.code, issue.path, issue.message
            ));
        }
    }
}

fn count(issues: &[Issue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

fn render_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Valid => "valid".green().to_string(),
        Verdict::ValidWithWarnings => "valid_with_warnings".yellow().to_string(),
        Verdict::Invalid => "invalid".red().to_string(),
    }
}

fn render_success(success: bool) -> String {
    if success {
        "true".green().to_string()
    } else {
        "false".yellow().to_string()
    }
}
