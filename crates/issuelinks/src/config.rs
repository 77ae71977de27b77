//! Host-supplied reference configuration.
//!
//! The host owns where these values come from. This module only describes
//! them: the recognized options and their defaults ([`CONFIG_OPTIONS`]), the
//! [`ReferenceConfig`] they deserialize into, and the `group/project`
//! [`Scope`] type shared with the token parser.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use bon::Builder;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};
use crate::kind::ReferenceKind;
use crate::template::UriTemplate;

static SCOPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<group>[A-Za-z0-9_.-]+)/(?P<project>[A-Za-z0-9_.-]+(?:/[A-Za-z0-9_.-]+)*)$")
        .expect("scope pattern is valid")
});

/// External namespace an identifier belongs to (`group/project`, `owner/repo`).
///
/// Subgroups are kept in the project part: `a/b/c` is group `a`, project `b/c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope {
    pub group: String,
    pub project: String,
}

impl Scope {
    pub fn new(group: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            project: project.into(),
        }
    }

    /// Parse `group/project`, returning `None` when the shape does not match.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = SCOPE_RE.captures(s)?;
        Some(Self::new(&caps["group"], &caps["project"]))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.project)
    }
}

impl FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Scope::parse(s.trim()).ok_or_else(|| ConfigError::InvalidScope(s.to_string()))
    }
}

impl TryFrom<String> for Scope {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.to_string()
    }
}

/// A recognized configuration option, as declared to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigOption {
    pub name: &'static str,
    /// `None` means "unset"; the resolver then falls back to built-in behavior.
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// Options the host registers, in declaration order.
pub const CONFIG_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "default_scope",
        default: None,
        description: "group/project used when a reference names no scope",
    },
    ConfigOption {
        name: "issue_uri",
        default: None,
        description: "issue URL template ({group}, {project}, {issue})",
    },
    ConfigOption {
        name: "pr_uri",
        default: None,
        description: "pull request URL template ({group}, {project}, {pr})",
    },
    ConfigOption {
        name: "commit_uri",
        default: None,
        description: "commit URL template ({group}, {project}, {commit})",
    },
    ConfigOption {
        name: "user_uri",
        default: Some("https://github.com/{user}"),
        description: "user profile URL template ({user})",
    },
    ConfigOption {
        name: "cve_uri",
        default: Some("https://cve.mitre.org/cgi-bin/cvename.cgi?name={cve}"),
        description: "CVE lookup URL template ({cve})",
    },
    ConfigOption {
        name: "cwe_uri",
        default: Some("https://cwe.mitre.org/data/definitions/{cwe}.html"),
        description: "CWE lookup URL template ({cwe}, numeric part only)",
    },
    ConfigOption {
        name: "issue_prefix",
        default: Some("#"),
        description: "display prefix for issues",
    },
    ConfigOption {
        name: "pr_prefix",
        default: Some("#"),
        description: "display prefix for pull requests",
    },
    ConfigOption {
        name: "commit_prefix",
        default: Some("@"),
        description: "display prefix for commits",
    },
    ConfigOption {
        name: "user_prefix",
        default: Some("@"),
        description: "display prefix for users",
    },
];

/// URL templates, display prefixes and the default scope.
///
/// Every field is optional; unset fields fall back to the GitHub-shaped
/// defaults of [`ReferenceKind`]. Host-style option names
/// (`issues_default_group_project`, `issues_pr_uri`, ...) are accepted as
/// aliases when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    #[serde(
        alias = "issues_default_group_project",
        alias = "issues_github_path",
        deserialize_with = "deserialize_scope",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_scope: Option<Scope>,

    #[builder(into)]
    #[serde(alias = "issues_uri", skip_serializing_if = "Option::is_none")]
    pub issue_uri: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_pr_uri", skip_serializing_if = "Option::is_none")]
    pub pr_uri: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_commit_uri", skip_serializing_if = "Option::is_none")]
    pub commit_uri: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_user_uri", skip_serializing_if = "Option::is_none")]
    pub user_uri: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve_uri: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe_uri: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_prefix", skip_serializing_if = "Option::is_none")]
    pub issue_prefix: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_pr_prefix", skip_serializing_if = "Option::is_none")]
    pub pr_prefix: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_commit_prefix", skip_serializing_if = "Option::is_none")]
    pub commit_prefix: Option<String>,

    #[builder(into)]
    #[serde(alias = "issues_user_prefix", skip_serializing_if = "Option::is_none")]
    pub user_prefix: Option<String>,
}

/// Empty strings are how hosts spell "unset".
fn deserialize_scope<'de, D>(deserializer: D) -> std::result::Result<Option<Scope>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl ReferenceConfig {
    /// Configuration with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// GitHub defaults for one repository (`owner/repo`).
    ///
    /// # Example
    ///
    /// ```
    /// use issuelinks::ReferenceConfig;
    ///
    /// let config = ReferenceConfig::github("marshmallow-code/marshmallow").unwrap();
    /// assert_eq!(config.default_scope.unwrap().project, "marshmallow");
    /// ```
    pub fn github(scope: &str) -> Result<Self> {
        Ok(Self {
            default_scope: Some(scope.parse()?),
            ..Self::default()
        })
    }

    /// Build from a JSON value handed over by the host, then [`validate`](Self::validate).
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from an in-memory TOML table (e.g. a preprocessor section).
    pub fn from_toml(table: &toml::Table) -> Result<Self> {
        let config: Self = toml::Value::Table(table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::InvalidValue(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every configured template against its kind's placeholders.
    pub fn validate(&self) -> Result<()> {
        for kind in ReferenceKind::ALL {
            if let Some(template) = self.configured_template(kind) {
                UriTemplate::parse(template)?.check(kind)?;
            }
        }
        Ok(())
    }

    /// The host-configured template for `kind`, if any.
    pub fn configured_template(&self, kind: ReferenceKind) -> Option<&str> {
        let template = match kind {
            ReferenceKind::Issue => &self.issue_uri,
            ReferenceKind::PullRequest => &self.pr_uri,
            ReferenceKind::Commit => &self.commit_uri,
            ReferenceKind::User => &self.user_uri,
            ReferenceKind::Cve => &self.cve_uri,
            ReferenceKind::Cwe => &self.cwe_uri,
        };
        template.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Display prefix for `kind`, configured or default.
    ///
    /// An empty configured prefix counts as unset, like an empty template.
    ///
    /// CVE and CWE codes carry their own prefix and never get one.
    pub fn prefix(&self, kind: ReferenceKind) -> &str {
        let configured = match kind {
            ReferenceKind::Issue => &self.issue_prefix,
            ReferenceKind::PullRequest => &self.pr_prefix,
            ReferenceKind::Commit => &self.commit_prefix,
            ReferenceKind::User => &self.user_prefix,
            ReferenceKind::Cve | ReferenceKind::Cwe => return "",
        };
        configured
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| kind.default_prefix())
    }
}
