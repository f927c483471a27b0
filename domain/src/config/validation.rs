//! Structured configuration issues.
//!
//! Produced by the infrastructure config validator and rendered by the CLI.
//! `Error` issues abort startup, `Warning` issues are printed and ignored.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// The configuration works but a value was replaced or ignored.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field that must name something is empty.
    EmptyValue { field: String },
    /// A character or result budget is zero.
    ZeroBudget { field: String },
    /// A URL field does not start with `http://` or `https://`.
    InvalidUrl { field: String, value: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err = ConfigIssue::error(
            ConfigIssueCode::EmptyValue {
                field: "model.name".to_string(),
            },
            "model.name is empty",
        );
        assert!(err.is_error());

        let warn = ConfigIssue::warning(
            ConfigIssueCode::ZeroBudget {
                field: "agent.preview_chars".to_string(),
            },
            "agent.preview_chars is 0",
        );
        assert!(!warn.is_error());
        assert_eq!(warn.severity, Severity::Warning);
    }
}
