//! Role registration for documentation hosts.
//!
//! A host calls [`setup`] once and gets back everything it needs: a map from
//! role name to resolver function, and the configuration options to declare.
//! The active configuration is never stored here; the host passes it to every
//! call.

use std::collections::HashMap;

use crate::config::{CONFIG_OPTIONS, ConfigOption, ReferenceConfig};
use crate::error::{ReferenceError, Result};
use crate::kind::ReferenceKind;
use crate::resolve::{ResolvedLink, resolve_all};

/// Resolver for one role: configuration and raw role text in, links out.
pub type RoleFn = fn(&ReferenceConfig, &str) -> Result<Vec<ResolvedLink>>;

pub fn issue_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::Issue, text, config)
}

pub fn pr_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::PullRequest, text, config)
}

pub fn commit_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::Commit, text, config)
}

pub fn user_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::User, text, config)
}

pub fn cve_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::Cve, text, config)
}

pub fn cwe_role(config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
    resolve_all(ReferenceKind::Cwe, text, config)
}

/// Role name -> resolver function.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleFn>,
}

impl RoleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Registry with the built-in roles (`issue`, `pr`, `commit`, `user`, `cve`, `cwe`).
    pub fn with_builtin_roles() -> Self {
        let mut registry = Self::new();
        for kind in ReferenceKind::ALL {
            registry.register(kind.role_name(), builtin_role(kind));
        }
        registry
    }

    /// Register a role. A role with the same name is replaced.
    pub fn register(&mut self, name: impl Into<String>, role: RoleFn) {
        self.roles.insert(name.into(), role);
    }

    pub fn get(&self, name: &str) -> Option<RoleFn> {
        self.roles.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Registered role names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the role registered under `name`.
    pub fn resolve(
        &self,
        name: &str,
        config: &ReferenceConfig,
        text: &str,
    ) -> Result<Vec<ResolvedLink>> {
        let role = self
            .get(name)
            .ok_or_else(|| ReferenceError::UnknownRole(name.to_string()))?;
        role(config, text)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::with_builtin_roles()
    }
}

fn builtin_role(kind: ReferenceKind) -> RoleFn {
    match kind {
        ReferenceKind::Issue => issue_role,
        ReferenceKind::PullRequest => pr_role,
        ReferenceKind::Commit => commit_role,
        ReferenceKind::User => user_role,
        ReferenceKind::Cve => cve_role,
        ReferenceKind::Cwe => cwe_role,
    }
}

/// What [`setup`] hands to the host.
#[derive(Debug, Clone)]
pub struct Extension {
    pub roles: RoleRegistry,
    pub options: &'static [ConfigOption],
}

/// Register the extension: built-in roles plus the option declarations.
///
/// # Example
///
/// ```
/// use issuelinks::{ReferenceConfig, setup};
///
/// let extension = setup();
/// let config = ReferenceConfig::github("sloria/webargs").unwrap();
/// let links = extension.roles.resolve("pr", &config, "42").unwrap();
/// assert_eq!(links[0].url, "https://github.com/sloria/webargs/pull/42");
/// ```
pub fn setup() -> Extension {
    tracing::debug!(options = CONFIG_OPTIONS.len(), "registering reference roles");
    Extension {
        roles: RoleRegistry::with_builtin_roles(),
        options: CONFIG_OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout_role(_config: &ReferenceConfig, text: &str) -> Result<Vec<ResolvedLink>> {
        Ok(vec![ResolvedLink {
            text: text.to_uppercase(),
            url: format!("https://example.com/{text}"),
        }])
    }

    #[test]
    fn setup_registers_builtin_roles() {
        let extension = setup();
        assert_eq!(
            extension.roles.names(),
            vec!["commit", "cve", "cwe", "issue", "pr", "user"]
        );
        assert_eq!(extension.options.len(), CONFIG_OPTIONS.len());
    }

    #[test]
    fn register_and_get() {
        let mut registry = RoleRegistry::new();
        registry.register("shout", shout_role);

        assert!(registry.has("shout"));
        assert!(!registry.has("issue"));
        let links = registry
            .resolve("shout", &ReferenceConfig::new(), "hi")
            .unwrap();
        assert_eq!(links[0].text, "HI");
    }

    #[test]
    fn register_replaces_existing_role() {
        let mut registry = RoleRegistry::with_builtin_roles();
        registry.register("issue", shout_role);
        let links = registry
            .resolve("issue", &ReferenceConfig::new(), "x")
            .unwrap();
        assert_eq!(links[0].url, "https://example.com/x");
    }

    #[test]
    fn unknown_role() {
        let registry = RoleRegistry::default();
        let err = registry
            .resolve("ticket", &ReferenceConfig::new(), "1")
            .unwrap_err();
        assert_eq!(err, ReferenceError::UnknownRole("ticket".to_string()));
    }
}
