//! Fragment-level conversion: LaTeX fragments to HTML nodes.
pub mod format;
pub mod inline;
pub mod lists;
pub mod math;
pub mod paragraphs;

pub use inline::{convert, render_inline};
pub use paragraphs::wrap_paragraphs;
