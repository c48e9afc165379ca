//! Resolution core for stackflow: document merge and template rendering.
//!
//! Two independent pieces composed by callers: an order-sensitive deep merge
//! over nested mapping/sequence/scalar documents with optional per-path
//! provenance, and a renderer that replaces `${NAME}` references in raw text
//! with values from an environment lookup. Neither performs I/O or touches
//! process state.

mod document;
mod error;
mod merge;
mod render;

pub use document::{from_yaml_str, to_yaml_string, Document, Path, PathSegment};
pub use error::ResolveError;
pub use merge::{merge, merge_sourced, SourceMap};
pub use render::{render, EnvLookup, ProcessEnv};
