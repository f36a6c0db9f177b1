//! platform-cli-common - Shared types and ownership rules
//!
//! This crate holds the tagging convention used by platform-cli, without
//! any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Default configuration values
//! - [`operator`]: Local operator name resolution for the `Owner` tag
//! - [`resource_kind`]: Resource families managed by the tool
//! - [`tags`]: Tag schema, tag-set merging and the ownership predicate

pub mod defaults;
pub mod operator;
pub mod resource_kind;
pub mod tags;

// Re-export commonly used types
pub use operator::resolve_operator_identity;
pub use resource_kind::ResourceKind;
pub use tags::{OwnershipFilter, TagError, TagPolicy, TagSet};
