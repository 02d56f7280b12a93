//! Macro definition extraction.
//!
//! `\newcommand`, `\renewcommand`, `\DeclareMathOperator` and `\def` are cut
//! out of the source verbatim and later handed to the math renderer. This is a
//! greedy one-pass scan over the token stream, not a parser: a definition runs
//! through its first balanced brace group and any `{...}`/`[...]` arguments
//! that directly follow it on the same line. A definition with no braces at
//! all ends at the next line break.
use log::debug;

use crate::frontend::lexer::{Lexer, TokenKind};
use crate::frontend::scan;
use crate::frontend::vocabulary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Trimmed definitions in order of discovery.
    pub definitions: Vec<String>,
    /// The source with every definition removed.
    pub remainder: String,
}

pub fn extract_macros(source: &str) -> Extracted {
    let mut extracted = Extracted::default();
    let mut cursor = 0;
    let mut lexer = Lexer::new(source);
    while let Some(token) = lexer.next() {
        let is_definition = token
            .command_name()
            .map(vocabulary::is_macro_definition)
            .unwrap_or(false);
        if !is_definition {
            continue
        }
        extracted.remainder.push_str(&source[cursor..token.start]);
        let end = definition_end(source, token.end);
        let definition = source[token.start..end].trim();
        if !definition.is_empty() {
            extracted.definitions.push(definition.to_owned());
        }
        cursor = end;
        lexer = Lexer::at(source, cursor);
    }
    extracted.remainder.push_str(&source[cursor..]);
    debug!("extracted {} macro definition(s)", extracted.definitions.len());
    extracted
}

/// Where the definition whose keyword ends at `from` stops.
fn definition_end(source: &str, from: usize) -> usize {
    let mut lexer = Lexer::at(source, from);
    let first_group = loop {
        let token = match lexer.next() {
            Some(token) => token,
            None => return source.len(),
        };
        match token.kind {
            TokenKind::BeginGroup => break token.start,
            TokenKind::Text(text) => {
                if let Some(ix) = text.find('\n') {
                    return token.start + ix + 1
                }
            }
            _ => ()
        }
    };
    let mut end = match scan::matching_close(source, first_group) {
        Some(close) => close + 1,
        None => return source.len(),
    };
    while let Some(next) = following_argument(source, end) {
        end = next;
    }
    end
}

/// The end of a `{...}` or `[...]` argument that starts at `position`,
/// possibly after spaces or tabs.
fn following_argument(source: &str, position: usize) -> Option<usize> {
    let rest = &source[position..];
    let start = position + (rest.len() - rest.trim_start_matches(|c| c == ' ' || c == '\t').len());
    match source[start..].chars().next()? {
        '{' => scan::matching_close(source, start).map(|close| close + 1),
        '[' => source[start..].find(']').map(|close| start + close + 1),
        _ => None,
    }
}
