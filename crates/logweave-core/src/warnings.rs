//! Operation-scoped warning collection.
//!
//! Every planner call owns one [`WarningSink`]. Sinks are plain values,
//! never process-global state, so concurrent operations cannot observe
//! each other's warnings; whoever drives the operation reads and clears
//! the sink afterwards.

use miette::Diagnostic;

/// A non-fatal problem noticed during an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Human-readable description; may be empty.
    pub message: String,
    /// Resource the warning refers to, usually a compilation-unit id.
    pub resource: Option<String>,
    /// 1-indexed source line, when known.
    pub line: Option<usize>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.resource, self.line) {
            (Some(resource), Some(line)) => write!(f, "{} ({resource}:{line})", self.message),
            (Some(resource), None) => write!(f, "{} ({resource})", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl Warning {
    /// Renders the warning as a diagnostic for terminal reporting.
    #[must_use]
    pub fn to_diagnostic(&self) -> WarningDiagnostic {
        let location = match (&self.resource, self.line) {
            (Some(resource), Some(line)) => Some(format!("at {resource}:{line}")),
            (Some(resource), None) => Some(format!("at {resource}")),
            _ => None,
        };
        WarningDiagnostic {
            message: self.message.clone(),
            location,
        }
    }
}

/// miette-compatible rendering of a [`Warning`].
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(severity(Warning))]
pub struct WarningDiagnostic {
    message: String,
    #[help]
    location: Option<String>,
}

/// Append-only warning accumulator for one operation.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    warnings: Vec<Warning>,
}

impl WarningSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning without location information.
    pub fn push(&mut self, message: &str) {
        self.warnings.push(Warning {
            message: message.to_string(),
            resource: None,
            line: None,
        });
    }

    /// Records a warning against a resource.
    pub fn push_for(&mut self, message: &str, resource: &str) {
        self.warnings.push(Warning {
            message: message.to_string(),
            resource: Some(resource.to_string()),
            line: None,
        });
    }

    /// Records a warning against a resource and 1-indexed line.
    pub fn push_at(&mut self, message: &str, resource: &str, line: usize) {
        self.warnings.push(Warning {
            message: message.to_string(),
            resource: Some(resource.to_string()),
            line: Some(line),
        });
    }

    /// The collected warnings, in record order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns true once anything has been recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drops all recorded warnings.
    pub fn clear(&mut self) {
        self.warnings.clear();
    }

    /// Removes and returns the recorded warnings, leaving the sink empty.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
