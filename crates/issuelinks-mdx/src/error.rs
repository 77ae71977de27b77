//! Errors reported while rewriting markdown
//!
//! Carries the file, line and column of the failing role along with a hint
//! for the document author or the host.

use issuelinks::ReferenceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Link rewriting error with source context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkError {
    /// The error message
    pub message: String,
    /// Optional file path where the error occurred
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Helpful suggestion to fix the error
    pub suggestion: Option<String>,
}

impl LinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            line: None,
            column: None,
            suggestion: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Markdown could not be parsed at all
    pub fn parse_error(message: impl fmt::Display) -> Self {
        Self::new(format!("Failed to parse markdown: {}", message))
    }

    /// A role's text could not be resolved
    pub fn role_error(role: &str, text: &str, err: &ReferenceError) -> Self {
        let error = Self::new(format!("Failed to resolve {{{}}}`{}`: {}", role, text, err));
        match err {
            ReferenceError::Syntax(_) => error.with_suggestion(
                "Write references as `42`, `Title <42>` or `group/project#42`, separated by commas.",
            ),
            ReferenceError::Config(_) => error.with_suggestion(
                "Set `default_scope` in the reference configuration or give the scope explicitly.",
            ),
            ReferenceError::Template(_) => error.with_suggestion(
                "Fix the URL template in the reference configuration; placeholders are {group}, {project} and the role's identifier.",
            ),
            ReferenceError::UnknownRole(_) => error,
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference Error: {}", self.message)?;

        if let Some(ref file) = self.file {
            write!(f, "\n  in {}", file)?;
        }

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  at line {}, column {}", line, col)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\nSuggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for LinkError {}

impl From<anyhow::Error> for LinkError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<LinkError>() {
            Ok(link_error) => link_error,
            Err(other) => Self::new(format!("{:#}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuelinks::{MalformedReference, ReferenceConfig, ReferenceKind, resolve_token};

    #[test]
    fn test_error_display() {
        let err = LinkError::new("Broken")
            .with_file("CHANGELOG.md")
            .with_location(5, 10)
            .with_suggestion("Fix it");

        let display = format!("{}", err);
        assert!(display.contains("Reference Error: Broken"));
        assert!(display.contains("in CHANGELOG.md"));
        assert!(display.contains("at line 5, column 10"));
        assert!(display.contains("Suggestion: Fix it"));
    }

    #[test]
    fn test_role_error_for_syntax() {
        let source: ReferenceError = MalformedReference::UnbalancedBrackets {
            token: "Title <42".to_string(),
        }
        .into();
        let err = LinkError::role_error("issue", "Title <42", &source);
        assert!(err.message.contains("{issue}`Title <42`"));
        assert!(err.suggestion.unwrap().contains("Title <42>"));
    }

    #[test]
    fn test_role_error_for_missing_scope() {
        let source = resolve_token(ReferenceKind::Issue, "42", &ReferenceConfig::new()).unwrap_err();
        let err = LinkError::role_error("issue", "42", &source);
        assert!(err.suggestion.unwrap().contains("default_scope"));
    }

    #[test]
    fn test_from_anyhow_keeps_structured_error() {
        let original = LinkError::new("inner").with_location(3, 4);
        let wrapped = anyhow::Error::new(original);
        let err = LinkError::from(wrapped);
        assert_eq!(err.line, Some(3));
        assert_eq!(err.message, "inner");
    }

    #[test]
    fn test_from_anyhow_plain_message() {
        let err = LinkError::from(anyhow::anyhow!("plain"));
        assert_eq!(err.message, "plain");
        assert!(err.line.is_none());
    }
}
