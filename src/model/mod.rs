//! The versioned in-memory document schemas.
//!
//! One set of structs covers all three spec revisions; revision
//! differences (field availability, checksum policy) live in data tables
//! keyed by [`SpecRevision`] rather than per-revision struct clones.
//! Identifier fields round-trip through the exact string forms of
//! [`crate::ident`], and compound scalar fields (creators, suppliers,
//! originators, annotators) serialize back to `"<Type>: <value>"`.

mod actor;
mod annotation;
mod checksum;
mod document;
mod file;
mod license;
mod package;
mod relationship;
mod revision;
mod snippet;

pub use actor::*;
pub use annotation::*;
pub use checksum::*;
pub use document::*;
pub use file::*;
pub use license::*;
pub use package::*;
pub use relationship::*;
pub use revision::*;
pub use snippet::*;
