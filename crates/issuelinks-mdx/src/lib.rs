//! # issuelinks-mdx
//!
//! Markdown integration for [`issuelinks`]: parse a document into an mdast
//! tree, rewrite `` {issue}`42` ``-style roles into links, and hand the tree
//! back to the host for rendering.

pub mod error;
pub mod plugins;

pub use error::LinkError;
pub use plugins::{IssueLinksPlugin, MarkdownPlugin};

use bon::Builder;
use issuelinks::{ReferenceConfig, ResolvedLink};
use markdown::mdast::Node;

/// Options for [`link_references`]
#[derive(Builder)]
pub struct LinkOptions {
    /// Reference configuration supplied by the host
    #[builder(default)]
    pub config: ReferenceConfig,

    /// Optional filepath for error messages
    #[builder(into)]
    pub filepath: Option<String>,

    /// Enable GitHub Flavored Markdown constructs.
    /// Enabled by default. Set to `false` for plain CommonMark.
    #[builder(default = true)]
    pub gfm: bool,

    /// Additional plugins, applied after reference rewriting.
    #[builder(default)]
    pub plugins: Vec<Box<dyn MarkdownPlugin>>,
}

impl std::fmt::Debug for LinkOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkOptions")
            .field("config", &self.config)
            .field("filepath", &self.filepath)
            .field("gfm", &self.gfm)
            .field("plugins_count", &self.plugins.len())
            .finish()
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LinkOptions {
    pub fn new(config: ReferenceConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn with_plugin(mut self, plugin: Box<dyn MarkdownPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }
}

/// Rewritten document and the links that were resolved in it
#[derive(Debug, Clone)]
pub struct LinkResult {
    pub ast: Node,
    pub links: Vec<ResolvedLink>,
}

/// Parse `source` and rewrite every reference role into links.
///
/// # Example
///
/// ```
/// use issuelinks::ReferenceConfig;
/// use issuelinks_mdx::{LinkOptions, link_references};
///
/// let config = ReferenceConfig::github("marshmallow-code/marshmallow").unwrap();
/// let result = link_references("Fixes {issue}`42,43`.", LinkOptions::new(config)).unwrap();
///
/// assert_eq!(result.links.len(), 2);
/// assert_eq!(result.links[1].text, "#43");
/// ```
pub fn link_references(source: &str, options: LinkOptions) -> Result<LinkResult, Box<LinkError>> {
    let with_file = |err: LinkError| match &options.filepath {
        Some(filepath) => Box::new(err.with_file(filepath.clone())),
        None => Box::new(err),
    };

    let parse_options = if options.gfm {
        markdown::ParseOptions::gfm()
    } else {
        markdown::ParseOptions::default()
    };

    let mut ast = markdown::to_mdast(source, &parse_options)
        .map_err(|e| with_file(LinkError::parse_error(e)))?;

    let links_plugin = IssueLinksPlugin::new(options.config.clone());
    run_plugin(&links_plugin, &mut ast).map_err(with_file)?;
    for plugin in &options.plugins {
        run_plugin(plugin.as_ref(), &mut ast).map_err(with_file)?;
    }

    let links = links_plugin.links();
    tracing::debug!(
        filepath = options.filepath.as_deref().unwrap_or("<memory>"),
        links = links.len(),
        "rewrote reference roles"
    );

    Ok(LinkResult { ast, links })
}

fn run_plugin(plugin: &dyn MarkdownPlugin, ast: &mut Node) -> Result<(), LinkError> {
    tracing::debug!(plugin = plugin.name(), "running markdown plugin");
    plugin.transform_ast(ast).map_err(LinkError::from)
}
