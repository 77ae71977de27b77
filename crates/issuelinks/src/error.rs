//! Error types for reference parsing, configuration and URL templates.

use thiserror::Error;

use crate::kind::ReferenceKind;

pub type Result<T> = std::result::Result<T, ReferenceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error(transparent)]
    Syntax(#[from] MalformedReference),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl ReferenceError {
    /// True for errors the document author fixes in the source text.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ReferenceError::Syntax(_))
    }

    /// True for errors the host fixes in its configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ReferenceError::Config(_) | ReferenceError::Template(_)
        )
    }
}

/// The reference text itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReference {
    #[error("unbalanced `<...>` in reference `{token}`")]
    UnbalancedBrackets { token: String },

    #[error("empty identifier in reference `{token}`")]
    EmptyIdentifier { token: String },

    /// A blank entry in a comma-separated list, e.g. `42,` or `42,,43`.
    #[error("empty reference at position {position} in `{text}`")]
    EmptyToken { text: String, position: usize },

    #[error("invalid scope `{scope}` in reference `{token}`: expected `group/project`")]
    InvalidScope { token: String, scope: String },
}

/// Required configuration is missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "no scope for {kind} reference `{token}`: set `default_scope` or write it as `group/project{separator}{token}`"
    )]
    MissingScope {
        kind: ReferenceKind,
        token: String,
        separator: &'static str,
    },

    #[error("invalid default scope `{0}`: expected `group/project`")]
    InvalidScope(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// A URL template cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder in template `{template}` at byte {offset}")]
    Unterminated { template: String, offset: usize },

    #[error("unknown placeholder `{{{name}}}` in {kind} template `{template}`")]
    UnknownPlaceholder {
        kind: ReferenceKind,
        name: String,
        template: String,
    },

    #[error("{kind} template `{template}` does not contain `{{{placeholder}}}`")]
    MissingIdentifier {
        kind: ReferenceKind,
        template: String,
        placeholder: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_and_config_are_distinct() {
        let syntax: ReferenceError = MalformedReference::EmptyIdentifier {
            token: "".to_string(),
        }
        .into();
        let config: ReferenceError = ConfigError::MissingScope {
            kind: ReferenceKind::Issue,
            token: "42".to_string(),
            separator: "#",
        }
        .into();

        assert!(syntax.is_syntax());
        assert!(!syntax.is_config());
        assert!(config.is_config());
        assert!(!config.is_syntax());
    }

    #[test]
    fn template_error_display_keeps_braces() {
        let err = TemplateError::UnknownPlaceholder {
            kind: ReferenceKind::PullRequest,
            name: "issue".to_string(),
            template: "https://x/{issue}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown placeholder `{issue}` in pr template `https://x/{issue}`"
        );
    }

    #[test]
    fn missing_scope_message_suggests_explicit_form() {
        let err = ConfigError::MissingScope {
            kind: ReferenceKind::Issue,
            token: "42".to_string(),
            separator: "#",
        };
        assert!(err.to_string().contains("group/project#42"));
    }
}
