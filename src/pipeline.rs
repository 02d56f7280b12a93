//! The conversion pipeline over an already flattened source.
//!
//! Stages: macro extraction, metadata, body isolation, structuring, then
//! rendering. Every stage is total, so this never fails.
use log::debug;

use crate::codegen::Renderer;
use crate::config::Config;
use crate::frontend::{extract_macros, structure, Extracted, Metadata, SetNumber};

pub fn compile_flattened(flattened: &str, set: SetNumber, config: &Config) -> String {
    let Extracted {definitions, remainder} = extract_macros(flattened);
    let metadata = Metadata::extract(&remainder);
    let body = structure::strip_dropped_commands(structure::document_body(&remainder));
    let blocks = structure::parse_blocks(&body);
    let html = Renderer::new(config).render(&metadata, set, &definitions, &blocks);
    debug!("rendered {} bytes for set S{}", html.len(), set);
    html
}
