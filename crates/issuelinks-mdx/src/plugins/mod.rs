//! Plugin system for markdown AST transformations

mod issue_links;
mod trait_def;

pub use issue_links::IssueLinksPlugin;
pub use trait_def::MarkdownPlugin;
