//! Compiles homework-style LaTeX problem sets into one self-contained HTML
//! document, and optionally publishes it as an assignment description.
pub mod backend;
pub mod cli;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod frontend;
pub mod pipeline;
pub mod publish;

pub use compiler::{compile_file, compile_str, default_output_path};
pub use config::Config;
pub use error::{Error, Result};
pub use frontend::SetNumber;
