//! Plugin trait for transforming markdown ASTs
//!
//! Plugins run in registration order over the mdast produced by the
//! `markdown` crate. The reference rewriter is itself a plugin, so hosts can
//! add their own passes after links have been resolved.

use anyhow::Result;
use markdown::mdast::Node;
use std::any::Any;

/// Plugin for transforming a markdown AST in place
///
/// Implement this trait to add a pass over the document. The AST follows
/// the mdast structure from the `markdown` crate.
///
/// # Thread Safety
///
/// Plugins must be `Send + Sync` because documents may be processed in
/// parallel. If you need to accumulate state across documents, use
/// thread-safe primitives like `Arc<Mutex<T>>` or `Arc<RwLock<T>>`.
///
/// # Failure
///
/// Returning an error stops the pipeline for the current document. A plugin
/// that fails must leave the AST as it found it.
pub trait MarkdownPlugin: Send + Sync {
    /// Plugin name for debugging and logging
    ///
    /// Use a short, lowercase identifier like "issue-links".
    fn name(&self) -> &'static str;

    /// Transform the AST rooted at `ast`
    ///
    /// # Default Implementation
    ///
    /// The default implementation does nothing and returns `Ok(())`. Override
    /// this method to rewrite nodes.
    fn transform_ast(&self, ast: &mut Node) -> Result<()> {
        let _ = ast;
        Ok(())
    }

    /// Enable downcasting to concrete plugin types
    ///
    /// Hosts use this to read plugin-specific data after a run, such as the
    /// links collected by the reference rewriter.
    ///
    /// # Implementation
    ///
    /// Simply return `self`:
    ///
    /// ```rust,ignore
    /// fn as_any(&self) -> &dyn std::any::Any {
    ///     self
    /// }
    /// ```
    fn as_any(&self) -> &dyn Any;
}
