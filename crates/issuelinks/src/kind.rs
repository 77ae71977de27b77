//! Reference kinds and their built-in defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Issue,
    PullRequest,
    Commit,
    User,
    Cve,
    Cwe,
}

impl ReferenceKind {
    /// All kinds, in registration order.
    pub const ALL: [ReferenceKind; 6] = [
        ReferenceKind::Issue,
        ReferenceKind::PullRequest,
        ReferenceKind::Commit,
        ReferenceKind::User,
        ReferenceKind::Cve,
        ReferenceKind::Cwe,
    ];

    /// Role name as written in source text (`issue`, `pr`, ...).
    pub fn role_name(self) -> &'static str {
        match self {
            ReferenceKind::Issue => "issue",
            ReferenceKind::PullRequest => "pr",
            ReferenceKind::Commit => "commit",
            ReferenceKind::User => "user",
            ReferenceKind::Cve => "cve",
            ReferenceKind::Cwe => "cwe",
        }
    }

    /// Name of the placeholder that receives the identifier.
    pub fn placeholder(self) -> &'static str {
        match self {
            ReferenceKind::Issue => "issue",
            ReferenceKind::PullRequest => "pr",
            ReferenceKind::Commit => "commit",
            ReferenceKind::User => "user",
            ReferenceKind::Cve => "cve",
            ReferenceKind::Cwe => "cwe",
        }
    }

    /// Whether identifiers of this kind live inside a `group/project` scope.
    pub fn is_scoped(self) -> bool {
        matches!(
            self,
            ReferenceKind::Issue | ReferenceKind::PullRequest | ReferenceKind::Commit
        )
    }

    /// Placeholders a template for this kind may use.
    pub fn allowed_placeholders(self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Issue => &["group", "project", "issue"],
            ReferenceKind::PullRequest => &["group", "project", "pr"],
            ReferenceKind::Commit => &["group", "project", "commit"],
            ReferenceKind::User => &["user"],
            ReferenceKind::Cve => &["cve"],
            ReferenceKind::Cwe => &["cwe"],
        }
    }

    /// Display prefix used when the host does not configure one.
    pub fn default_prefix(self) -> &'static str {
        match self {
            ReferenceKind::Issue | ReferenceKind::PullRequest => "#",
            ReferenceKind::Commit | ReferenceKind::User => "@",
            ReferenceKind::Cve | ReferenceKind::Cwe => "",
        }
    }

    /// GitHub-shaped (or MITRE, for CVE/CWE) URL template.
    pub fn default_template(self) -> &'static str {
        match self {
            ReferenceKind::Issue => "https://github.com/{group}/{project}/issues/{issue}",
            ReferenceKind::PullRequest => "https://github.com/{group}/{project}/pull/{pr}",
            ReferenceKind::Commit => "https://github.com/{group}/{project}/commit/{commit}",
            ReferenceKind::User => "https://github.com/{user}",
            ReferenceKind::Cve => "https://cve.mitre.org/cgi-bin/cvename.cgi?name={cve}",
            ReferenceKind::Cwe => "https://cwe.mitre.org/data/definitions/{cwe}.html",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role_name())
    }
}

impl FromStr for ReferenceKind {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue" => Ok(ReferenceKind::Issue),
            "pr" | "pull" | "pull-request" => Ok(ReferenceKind::PullRequest),
            "commit" => Ok(ReferenceKind::Commit),
            "user" => Ok(ReferenceKind::User),
            "cve" => Ok(ReferenceKind::Cve),
            "cwe" => Ok(ReferenceKind::Cwe),
            other => Err(ReferenceError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for kind in ReferenceKind::ALL {
            assert_eq!(kind.role_name().parse::<ReferenceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn pull_request_aliases() {
        assert_eq!(
            "pull-request".parse::<ReferenceKind>().unwrap(),
            ReferenceKind::PullRequest
        );
        assert_eq!(
            "pull".parse::<ReferenceKind>().unwrap(),
            ReferenceKind::PullRequest
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "ticket".parse::<ReferenceKind>().unwrap_err();
        assert!(matches!(err, ReferenceError::UnknownRole(name) if name == "ticket"));
    }

    #[test]
    fn default_templates_use_only_allowed_placeholders() {
        for kind in ReferenceKind::ALL {
            let template = kind.default_template();
            assert!(template.contains(&format!("{{{}}}", kind.placeholder())));
        }
    }

    #[test]
    fn only_tracker_kinds_are_scoped() {
        assert!(ReferenceKind::Issue.is_scoped());
        assert!(ReferenceKind::Commit.is_scoped());
        assert!(!ReferenceKind::User.is_scoped());
        assert!(!ReferenceKind::Cve.is_scoped());
    }
}
