//! Output tree, inline styles and the document renderer.
pub mod document;
pub mod html;
pub mod style;

pub use document::Renderer;
pub use html::{Element, Node};
