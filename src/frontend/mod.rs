//! Source-level stages: loading, macro extraction, metadata and structure.
pub mod data;
pub mod lexer;
pub mod loader;
pub mod macros;
pub mod metadata;
pub mod scan;
pub mod structure;
pub mod vocabulary;

pub use data::{ProblemId, SetNumber};
pub use loader::SourceLoader;
pub use macros::{extract_macros, Extracted};
pub use metadata::{Epigraph, Metadata};
pub use structure::Block;
