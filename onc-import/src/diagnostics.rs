//! Diagnostic records produced while importing a document.
//!
//! Every problem the pipeline finds is both emitted as a `tracing` event and
//! kept as an [`Issue`], so callers can log, render or assert on them.

use serde::Serialize;

use crate::source::OncSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: String,
    /// Dotted location in the document, e.g. `NetworkConfigurations[0].WiFi`.
    pub path: String,
    pub source: OncSource,
    pub message: String,
}

/// Collector for issues raised against one document.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    source: OncSource,
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new(source: OncSource) -> Self {
        Self {
            source,
            issues: Vec::new(),
        }
    }

    pub fn source(&self) -> OncSource {
        self.source
    }

    pub fn error(&mut self, code: &str, path: impl Into<String>, message: impl Into<String>) {
        let issue = self.issue(Severity::Error, code, path.into(), message.into());
        tracing::error!(
            source = %issue.source,
            code = %issue.code,
            path = %issue.path,
            "{}",
            issue.message
        );
        self.issues.push(issue);
    }

    pub fn warning(&mut self, code: &str, path: impl Into<String>, message: impl Into<String>) {
        let issue = self.issue(Severity::Warning, code, path.into(), message.into());
        tracing::warn!(
            source = %issue.source,
            code = %issue.code,
            path = %issue.path,
            "{}",
            issue.message
        );
        self.issues.push(issue);
    }

    fn issue(&self, severity: Severity, code: &str, path: String, message: String) -> Issue {
        Issue {
            severity,
            code: code.to_string(),
            path,
            source: self.source,
            message,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of issues carrying `code`.
    pub fn count_code(&self, code: &str) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Append issues gathered by another stage without logging them again.
    pub fn absorb(&mut self, issues: Vec<Issue>) {
        self.issues.extend(issues);
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }
}

/// Join a parent path and a field name.
pub(crate) fn child_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Path of the `index`-th entry of the list at `parent`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
