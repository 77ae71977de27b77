//! Reference token parsing.
//!
//! A role's text is a comma-separated list of tokens. Each token is one of
//!
//! ```text
//! 42                      bare identifier, default scope
//! Hard Issue <42>         explicit display title
//! sloria/webargs#42       explicit scope (issue, pr)
//! sloria/webargs@abc123   explicit scope (commit)
//! Not mine <foo/bar#42>   both
//! ```

use crate::config::Scope;
use crate::error::{MalformedReference, Result};
use crate::kind::ReferenceKind;

/// Characters that separate a scope from the identifier.
const SCOPE_SEPARATORS: [char; 2] = ['#', '@'];

/// One parsed reference token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// Explicit display title (`Title <target>`), trimmed.
    pub title: Option<String>,
    /// Explicit scope (`group/project#id`), overriding the default scope.
    pub scope: Option<Scope>,
    /// Bare identifier: issue number, user name, commit hash, CVE/CWE code.
    pub target: String,
}

/// Split role text into trimmed tokens.
pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim)
}

/// Parse a single token for `kind`.
pub fn parse_token(kind: ReferenceKind, token: &str) -> Result<ParsedReference> {
    let token = token.trim();
    let (title, target) = split_explicit_title(token)?;

    let (scope, target) = match target.rfind(SCOPE_SEPARATORS) {
        Some(pos) if kind.is_scoped() => {
            let raw_scope = &target[..pos];
            let scope = Scope::parse(raw_scope).ok_or_else(|| MalformedReference::InvalidScope {
                token: token.to_string(),
                scope: raw_scope.to_string(),
            })?;
            (Some(scope), &target[pos + 1..])
        }
        _ => (None, target),
    };

    if target.is_empty() {
        return Err(MalformedReference::EmptyIdentifier {
            token: token.to_string(),
        }
        .into());
    }

    Ok(ParsedReference {
        title: title.map(str::to_string),
        scope,
        target: target.to_string(),
    })
}

/// `Title <target>` -> (`Some("Title")`, `"target"`); anything else passes through.
fn split_explicit_title(token: &str) -> Result<(Option<&str>, &str)> {
    let unbalanced = || MalformedReference::UnbalancedBrackets {
        token: token.to_string(),
    };

    let Some(body) = token.strip_suffix('>') else {
        if token.contains(['<', '>']) {
            return Err(unbalanced().into());
        }
        return Ok((None, token));
    };

    let open = body.rfind('<').ok_or_else(unbalanced)?;
    let target = body[open + 1..].trim();
    if target.contains('>') {
        return Err(unbalanced().into());
    }
    let title = body[..open].trim();
    Ok(((!title.is_empty()).then_some(title), target))
}
