//! Turning parsed references into display text and URLs.

use serde::{Deserialize, Serialize};

use crate::config::{ReferenceConfig, Scope};
use crate::error::{ConfigError, MalformedReference, Result};
use crate::kind::ReferenceKind;
use crate::parse::{ParsedReference, parse_token, split_tokens};
use crate::template::UriTemplate;

/// Text hosts put between consecutive links of one role.
pub const LINK_SEPARATOR: &str = ", ";

/// Commit hashes are shortened to this many characters in display text.
pub const SHORT_COMMIT_LEN: usize = 7;

/// Display text and absolute URL for one reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub text: String,
    pub url: String,
}

/// Resolve every comma-separated token in `text`, in input order.
///
/// The first failing token aborts the whole call.
///
/// # Example
///
/// ```
/// use issuelinks::{ReferenceConfig, ReferenceKind, resolve_all};
///
/// let config = ReferenceConfig::github("marshmallow-code/marshmallow").unwrap();
/// let links = resolve_all(ReferenceKind::Issue, "42,sloria/konch#43", &config).unwrap();
///
/// assert_eq!(links[0].text, "#42");
/// assert_eq!(links[0].url, "https://github.com/marshmallow-code/marshmallow/issues/42");
/// assert_eq!(links[1].text, "sloria/konch#43");
/// assert_eq!(links[1].url, "https://github.com/sloria/konch/issues/43");
/// ```
pub fn resolve_all(
    kind: ReferenceKind,
    text: &str,
    config: &ReferenceConfig,
) -> Result<Vec<ResolvedLink>> {
    split_tokens(text)
        .enumerate()
        .map(|(index, token)| {
            if token.is_empty() {
                return Err(MalformedReference::EmptyToken {
                    text: text.to_string(),
                    position: index + 1,
                }
                .into());
            }
            resolve_token(kind, token, config)
        })
        .collect()
}

/// Parse and resolve a single token.
pub fn resolve_token(
    kind: ReferenceKind,
    token: &str,
    config: &ReferenceConfig,
) -> Result<ResolvedLink> {
    let parsed = parse_token(kind, token)?;
    resolve(kind, &parsed, config)
}

/// Resolve an already parsed reference against `config`.
pub fn resolve(
    kind: ReferenceKind,
    parsed: &ParsedReference,
    config: &ReferenceConfig,
) -> Result<ResolvedLink> {
    let template = select_template(kind, parsed.scope.is_some(), config)?;

    let scope = parsed.scope.as_ref().or(config.default_scope.as_ref());
    let mut values: Vec<(&str, &str)> = Vec::with_capacity(3);
    if template.uses_scope() {
        let Some(Scope { group, project }) = scope else {
            return Err(ConfigError::MissingScope {
                kind,
                token: parsed.target.clone(),
                separator: scope_separator(kind),
            }
            .into());
        };
        values.push(("group", group.as_str()));
        values.push(("project", project.as_str()));
    }
    values.push((kind.placeholder(), url_identifier(kind, &parsed.target)));

    let url = template.render(kind, &values)?;
    let text = display_text(kind, parsed, config);

    tracing::debug!(%kind, text = %text, url = %url, "resolved reference");
    Ok(ResolvedLink { text, url })
}

/// Pick the template for a reference.
///
/// An explicit scope needs a template that interpolates it; a configured
/// template pinned to one repository falls back to the GitHub default.
fn select_template(
    kind: ReferenceKind,
    explicit_scope: bool,
    config: &ReferenceConfig,
) -> Result<UriTemplate<'_>> {
    let configured = match config.configured_template(kind) {
        Some(source) => {
            let template = UriTemplate::parse(source)?;
            template.check(kind)?;
            Some(template)
        }
        None => None,
    };

    match configured {
        Some(template) if !explicit_scope || template.uses_scope() => {
            tracing::trace!(%kind, template = template.source(), "using configured template");
            Ok(template)
        }
        _ => {
            tracing::trace!(%kind, "using default template");
            UriTemplate::parse(kind.default_template())
        }
    }
}

fn display_text(kind: ReferenceKind, parsed: &ParsedReference, config: &ReferenceConfig) -> String {
    if let Some(title) = &parsed.title {
        return title.clone();
    }
    let id = match kind {
        ReferenceKind::Commit => short_commit(&parsed.target),
        _ => parsed.target.as_str(),
    };
    let label = format!("{}{}", config.prefix(kind), id);
    match &parsed.scope {
        Some(scope) => format!("{scope}{label}"),
        None => label,
    }
}

/// CWE templates take the number only (`CWE-787` -> `787`).
fn url_identifier(kind: ReferenceKind, target: &str) -> &str {
    match kind {
        ReferenceKind::Cwe => target
            .get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("CWE-"))
            .map_or(target, |_| &target[4..]),
        _ => target,
    }
}

fn short_commit(hash: &str) -> &str {
    hash.char_indices()
        .nth(SHORT_COMMIT_LEN)
        .map_or(hash, |(end, _)| &hash[..end])
}

fn scope_separator(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Commit => "@",
        _ => "#",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReferenceError, TemplateError};

    fn github() -> ReferenceConfig {
        ReferenceConfig::github("marshmallow-code/marshmallow").unwrap()
    }

    #[test]
    fn short_commit_truncates_by_chars() {
        assert_eq!(short_commit("123abc456def"), "123abc4");
        assert_eq!(short_commit("abc"), "abc");
        assert_eq!(short_commit("1234567"), "1234567");
    }

    #[test]
    fn cwe_identifier_drops_prefix() {
        assert_eq!(url_identifier(ReferenceKind::Cwe, "CWE-787"), "787");
        assert_eq!(url_identifier(ReferenceKind::Cwe, "cwe-79"), "79");
        assert_eq!(url_identifier(ReferenceKind::Cwe, "787"), "787");
        assert_eq!(url_identifier(ReferenceKind::Cve, "CVE-2018-17175"), "CVE-2018-17175");
    }

    #[test]
    fn issue_with_default_scope() {
        let link = resolve_token(ReferenceKind::Issue, "42", &github()).unwrap();
        assert_eq!(link.text, "#42");
        assert_eq!(
            link.url,
            "https://github.com/marshmallow-code/marshmallow/issues/42"
        );
    }

    #[test]
    fn missing_scope_is_a_config_error() {
        let err = resolve_token(ReferenceKind::Issue, "42", &ReferenceConfig::new()).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(
            err,
            ReferenceError::Config(ConfigError::MissingScope { kind: ReferenceKind::Issue, .. })
        ));
    }

    #[test]
    fn explicit_scope_needs_no_default() {
        let link = resolve_token(ReferenceKind::Issue, "sloria/webargs#42", &ReferenceConfig::new())
            .unwrap();
        assert_eq!(link.text, "sloria/webargs#42");
        assert_eq!(link.url, "https://github.com/sloria/webargs/issues/42");
    }

    #[test]
    fn unscoped_kinds_need_no_scope() {
        let config = ReferenceConfig::new();
        let user = resolve_token(ReferenceKind::User, "sloria", &config).unwrap();
        assert_eq!(user.url, "https://github.com/sloria");
        let cve = resolve_token(ReferenceKind::Cve, "CVE-2018-17175", &config).unwrap();
        assert_eq!(cve.text, "CVE-2018-17175");
    }

    #[test]
    fn pinned_template_falls_back_for_explicit_scope() {
        let config = ReferenceConfig::builder()
            .issue_uri("https://github.com/marshmallow-code/marshmallow/issues/{issue}")
            .build();
        let own = resolve_token(ReferenceKind::Issue, "42", &config).unwrap();
        assert_eq!(own.url, "https://github.com/marshmallow-code/marshmallow/issues/42");
        let other = resolve_token(ReferenceKind::Issue, "foo/bar#42", &config).unwrap();
        assert_eq!(other.url, "https://github.com/foo/bar/issues/42");
    }

    #[test]
    fn bad_configured_template_is_reported() {
        let config = ReferenceConfig::builder()
            .default_scope(Scope::new("a", "b"))
            .commit_uri("https://x/{group}/{project}/-/commit/{sha}")
            .build();
        let err = resolve_token(ReferenceKind::Commit, "abc", &config).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::Template(TemplateError::UnknownPlaceholder { ref name, .. }) if name == "sha"
        ));
    }

    #[test]
    fn resolve_all_is_fail_fast() {
        let err = resolve_all(ReferenceKind::Issue, "42, bad<, 43", &github()).unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("bad<"));
    }

    #[test]
    fn blank_list_entry_names_its_position() {
        let err = resolve_all(ReferenceKind::Issue, "42,", &github()).unwrap_err();
        assert_eq!(
            err,
            ReferenceError::Syntax(MalformedReference::EmptyToken {
                text: "42,".to_string(),
                position: 2,
            })
        );
        assert_eq!(err.to_string(), "empty reference at position 2 in `42,`");

        let err = resolve_all(ReferenceKind::PullRequest, "1, ,3", &github()).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::Syntax(MalformedReference::EmptyToken { position: 2, .. })
        ));
    }
}
