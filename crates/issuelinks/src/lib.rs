//! # issuelinks
//!
//! Resolve short issue, pull request, commit, user, CVE and CWE references
//! found in documentation into links to an external tracker.
//!
//! ```text
//! 42                        -> #42                 https://github.com/{group}/{project}/issues/42
//! Hard Issue <42>           -> Hard Issue          .../issues/42
//! sloria/webargs#42         -> sloria/webargs#42   https://github.com/sloria/webargs/issues/42
//! sloria/webargs@abc123def  -> sloria/webargs@abc123d
//! ```
//!
//! Resolution is a pure function of the role text and a [`ReferenceConfig`]
//! supplied by the host. Hosts integrate through [`setup`], which returns the
//! role functions keyed by name plus the option declarations.
//!
//! ```
//! use issuelinks::{ReferenceConfig, ReferenceKind, resolve_all};
//!
//! let config = ReferenceConfig::github("marshmallow-code/marshmallow").unwrap();
//! let links = resolve_all(ReferenceKind::Commit, "sloria/webargs@abc123def456", &config).unwrap();
//! assert_eq!(links[0].text, "sloria/webargs@abc123d");
//! assert_eq!(links[0].url, "https://github.com/sloria/webargs/commit/abc123def456");
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod parse;
pub mod registry;
pub mod resolve;
pub mod template;

pub use config::{CONFIG_OPTIONS, ConfigOption, ReferenceConfig, Scope};
pub use error::{ConfigError, MalformedReference, ReferenceError, Result, TemplateError};
pub use kind::ReferenceKind;
pub use parse::{ParsedReference, parse_token, split_tokens};
pub use registry::{Extension, RoleFn, RoleRegistry, setup};
pub use resolve::{LINK_SEPARATOR, ResolvedLink, SHORT_COMMIT_LEN, resolve, resolve_all, resolve_token};
pub use template::UriTemplate;
