// Diagnostic message - What went wrong, and what the user can do about it

use std::error::Error;

/// Startup failure description shown on the error screens
///
/// The summary is a short technical description shown on the top screen;
/// the remediation tells the user how to fix the problem and is shown on
/// the bottom screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{summary}")]
pub struct DiagnosticMessage {
    summary: String,
    remediation: String,
}

impl DiagnosticMessage {
    /// Create a diagnostic message
    ///
    /// # Arguments
    /// * `summary` - Short technical description of the failure
    /// * `remediation` - User-facing instructions for fixing it
    pub fn new(summary: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            remediation: remediation.into(),
        }
    }

    /// Build a message from an error and its chain of sources
    ///
    /// The summary lists the error followed by each of its sources,
    /// separated by ": ".
    pub fn from_error(error: &dyn Error, remediation: impl Into<String>) -> Self {
        let mut summary = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            summary.push_str(": ");
            summary.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::new(summary, remediation)
    }

    /// Short technical description
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// User-facing instructions
    pub fn remediation(&self) -> &str {
        &self.remediation
    }
}
