//! Source locations shared by every later stage of the egg pipeline.

mod location;
mod source_map;

pub use location::{Location, SourceName};
pub use source_map::{SourceMap, RESOURCE_PLACEHOLDER};
