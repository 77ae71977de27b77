//! Reference role plugin
//!
//! Rewrites MyST-style roles into links:
//!
//! ```markdown
//! Fixed in {pr}`sloria/webargs#42`, see {issue}`Hard Issue <41>, 43`.
//! ```
//!
//! In the AST a role is a text node ending in `{name}` directly followed by an
//! inline code node. The `{name}` suffix is removed and the inline code node
//! is replaced by one link per reference, separated by `", "` text nodes.
//! Unknown role names, fenced code and existing links are left alone.
//!
//! A document is rewritten as a whole or not at all: when any role fails, the
//! AST and the collected links are unchanged.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use issuelinks::{LINK_SEPARATOR, ReferenceConfig, ResolvedLink, RoleRegistry};
use markdown::mdast::{InlineCode, Link, Node, Text};

use super::MarkdownPlugin;
use crate::error::LinkError;

/// Plugin that resolves reference roles against a [`ReferenceConfig`].
///
/// Every resolved link is recorded; read them back with [`links`](Self::links).
///
/// # Usage
///
/// ```rust
/// use issuelinks::ReferenceConfig;
/// use issuelinks_mdx::plugins::{IssueLinksPlugin, MarkdownPlugin};
///
/// let config = ReferenceConfig::github("sloria/webargs").unwrap();
/// let plugin = IssueLinksPlugin::new(config);
///
/// let mut ast = markdown::to_mdast("See {issue}`42`.", &Default::default()).unwrap();
/// plugin.transform_ast(&mut ast).unwrap();
/// assert_eq!(plugin.links()[0].url, "https://github.com/sloria/webargs/issues/42");
/// ```
#[derive(Clone)]
pub struct IssueLinksPlugin {
    config: ReferenceConfig,
    roles: RoleRegistry,
    links: Arc<Mutex<Vec<ResolvedLink>>>,
}

impl IssueLinksPlugin {
    /// Plugin with the built-in roles.
    pub fn new(config: ReferenceConfig) -> Self {
        Self::with_roles(config, RoleRegistry::with_builtin_roles())
    }

    /// Plugin with a custom role registry.
    pub fn with_roles(config: ReferenceConfig, roles: RoleRegistry) -> Self {
        Self {
            config,
            roles,
            links: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// Snapshot of all links resolved so far, in document order.
    pub fn links(&self) -> Vec<ResolvedLink> {
        self.links
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Forget collected links between documents.
    pub fn clear(&self) {
        self.links
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Role name at the end of `text`, with the byte offset of its `{`.
    fn trailing_role<'t>(&self, text: &'t str) -> Option<(usize, &'t str)> {
        let body = text.strip_suffix('}')?;
        let open = body.rfind('{')?;
        let name = &body[open + 1..];
        self.roles.has(name).then_some((open, name))
    }

    fn rewrite(&self, node: &mut Node, found: &mut Vec<ResolvedLink>) -> Result<()> {
        match node {
            Node::Link(_) | Node::LinkReference(_) | Node::Code(_) | Node::Html(_) => Ok(()),
            _ => match node.children_mut() {
                Some(children) => self.rewrite_children(children, found),
                None => Ok(()),
            },
        }
    }

    fn rewrite_children(
        &self,
        children: &mut Vec<Node>,
        found: &mut Vec<ResolvedLink>,
    ) -> Result<()> {
        let mut out = Vec::with_capacity(children.len());
        let mut iter = std::mem::take(children).into_iter().peekable();

        while let Some(mut node) = iter.next() {
            if let Node::Text(text) = &mut node {
                if let Some((open, role)) = self.trailing_role(&text.value) {
                    let role = role.to_string();
                    if let Some(Node::InlineCode(code)) =
                        iter.next_if(|next| matches!(next, Node::InlineCode(_)))
                    {
                        text.value.truncate(open);
                        if !text.value.is_empty() {
                            out.push(node);
                        }
                        out.extend(self.resolve_role(&role, &code, found)?);
                        continue;
                    }
                    tracing::trace!(role, "role name without inline code, leaving as text");
                }
            } else {
                self.rewrite(&mut node, found)?;
            }
            out.push(node);
        }

        *children = out;
        Ok(())
    }

    fn resolve_role(
        &self,
        role: &str,
        code: &InlineCode,
        found: &mut Vec<ResolvedLink>,
    ) -> Result<Vec<Node>> {
        let resolved = self
            .roles
            .resolve(role, &self.config, &code.value)
            .map_err(|err| {
                let mut error = LinkError::role_error(role, &code.value, &err);
                if let Some(position) = &code.position {
                    error = error.with_location(position.start.line, position.start.column);
                }
                tracing::warn!(role, text = code.value, error = %err, "failed to resolve reference role");
                error
            })?;

        let mut nodes = Vec::with_capacity(resolved.len() * 2);
        for (i, link) in resolved.iter().enumerate() {
            if i > 0 {
                nodes.push(Node::Text(Text {
                    value: LINK_SEPARATOR.to_string(),
                    position: None,
                }));
            }
            nodes.push(Node::Link(Link {
                children: vec![Node::Text(Text {
                    value: link.text.clone(),
                    position: None,
                })],
                position: code.position.clone(),
                url: link.url.clone(),
                title: None,
            }));
        }

        found.extend(resolved);
        Ok(nodes)
    }
}

impl MarkdownPlugin for IssueLinksPlugin {
    fn name(&self) -> &'static str {
        "issue-links"
    }

    fn transform_ast(&self, ast: &mut Node) -> Result<()> {
        let mut staged = ast.clone();
        let mut found = Vec::new();
        self.rewrite(&mut staged, &mut found)?;

        *ast = staged;
        self.links
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(found);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
