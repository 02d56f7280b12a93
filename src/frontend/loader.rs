//! Source loading: comment stripping and recursive `\input` inlining.
//!
//! Included files are flattened before they are spliced in, so a single pass
//! over each file leaves no directive unresolved. Every file is inlined at most
//! once; a repeated or cyclic inclusion and a missing target are replaced by a
//! `%` marker line naming the file.
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::frontend::lexer::{Lexer, TokenKind};
use crate::frontend::scan;
use crate::frontend::vocabulary::{self, INCLUDE};

///////////////////////////////////////////////////////////////////////////////
// COMMENTS
///////////////////////////////////////////////////////////////////////////////

/// Truncates every line at its first unescaped `%`.
pub fn strip_comments(source: &str) -> String {
    source.lines().map(strip_line_comment).join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    Lexer::new(line)
        .find(|token| token.kind == TokenKind::Percent)
        .map(|token| &line[..token.start])
        .unwrap_or(line)
}

///////////////////////////////////////////////////////////////////////////////
// INCLUSION DIRECTIVES
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive<'a> {
    name: &'a str,
    /// Position just past the directive.
    end: usize,
}

/// Parses the target of an `\input` whose command token ends at `position`.
///
/// Accepts `\input{name}` and `\input name`; the bare form ends at whitespace
/// or `%`.
fn parse_directive(source: &str, position: usize) -> Option<Directive<'_>> {
    let rest = &source[position..];
    let start = position + (rest.len() - rest.trim_start().len());
    if scan::opens_group(source, start) {
        let group = scan::group_at(source, start)?;
        return Some(Directive {
            name: group.body.trim(),
            end: group.end,
        })
    }
    let bare = &source[start..];
    let len = bare
        .find(|c: char| c.is_whitespace() || c == '%')
        .unwrap_or(bare.len());
    if len == 0 {
        return None
    }
    Some(Directive {
        name: &bare[..len],
        end: start + len,
    })
}

fn with_default_extension(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_owned()
    } else {
        format!("{}.tex", name)
    }
}

fn missing_marker(file_name: &str) -> String {
    format!("\n% (missing input file: {})\n", file_name)
}

fn repeated_marker(file_name: &str) -> String {
    format!("\n% (skipping recursive input: {})\n", file_name)
}

///////////////////////////////////////////////////////////////////////////////
// LOADER
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default)]
pub struct SourceLoader {
    /// Canonical paths of every file inlined so far, the root included.
    visited: HashSet<PathBuf>,
}

impl SourceLoader {
    pub fn new() -> Self {
        SourceLoader::default()
    }

    /// Reads the root document and returns its fully flattened,
    /// comment-stripped source. Only an unreadable root is an error.
    pub fn load_root(&mut self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        if let Ok(canonical) = fs::canonicalize(path) {
            self.visited.insert(canonical);
        }
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let flattened = self.flatten(&strip_comments(&source), base_dir);
        debug!(
            "loaded `{}`: {} file(s), {} bytes flattened",
            path.display(),
            self.visited.len(),
            flattened.len(),
        );
        Ok(flattened)
    }

    /// Replaces every inclusion directive in `source` (already comment-stripped)
    /// with the flattened contents of its target, resolved against `base_dir`.
    pub fn flatten(&mut self, source: &str, base_dir: &Path) -> String {
        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        let mut lexer = Lexer::new(source);
        while let Some(token) = lexer.next() {
            if !token.command_name().map(vocabulary::is_inclusion).unwrap_or(false) {
                continue
            }
            let directive = match parse_directive(source, token.end) {
                Some(directive) => directive,
                None => {
                    warn!("ignoring malformed \\{} directive", INCLUDE);
                    continue
                }
            };
            output.push_str(&source[cursor..token.start]);
            if !directive.name.is_empty() {
                output.push_str(&self.include(directive.name, base_dir));
            }
            cursor = directive.end;
            lexer = Lexer::at(source, cursor);
        }
        output.push_str(&source[cursor..]);
        output
    }

    fn include(&mut self, name: &str, base_dir: &Path) -> String {
        let file_name = with_default_extension(name);
        let path = base_dir.join(&file_name);
        let canonical = match fs::canonicalize(&path) {
            Ok(canonical) => canonical,
            Err(_) => {
                warn!("missing input file `{}`", path.display());
                return missing_marker(&file_name)
            }
        };
        if !self.visited.insert(canonical) {
            warn!("skipping repeated input `{}`", path.display());
            return repeated_marker(&file_name)
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!("could not read input file `{}`: {}", path.display(), err);
                return missing_marker(&file_name)
            }
        };
        let dir = path.parent().unwrap_or(base_dir).to_owned();
        let flattened = self.flatten(&strip_comments(&content), &dir);
        format!("\n{}\n", flattened)
    }
}

/// Loads `path` with a fresh loader.
pub fn load_document(path: &Path) -> Result<String> {
    SourceLoader::new().load_root(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unescaped_comments() {
        let source = "a % comment\nprice 5\\% off % gone\n%whole line\nkeep";
        assert_eq!(strip_comments(source), "a \nprice 5\\% off \n\nkeep");
    }

    #[test]
    fn parses_both_directive_forms() {
        let source = "\\input{ parts/a }rest";
        let directive = parse_directive(source, 6).unwrap();
        assert_eq!(directive.name, "parts/a");
        assert_eq!(&source[directive.end..], "rest");

        let source = "\\input b.tex\nrest";
        let directive = parse_directive(source, 6).unwrap();
        assert_eq!(directive.name, "b.tex");
        assert_eq!(&source[directive.end..], "\nrest");

        assert_eq!(parse_directive("\\input   ", 6), None);
        assert_eq!(parse_directive("\\input{oops", 6), None);
    }

    #[test]
    fn defaults_the_extension() {
        assert_eq!(with_default_extension("intro"), "intro.tex");
        assert_eq!(with_default_extension("intro.sty"), "intro.sty");
    }

    #[test]
    fn missing_target_leaves_a_marker() {
        let dir = std::env::temp_dir().join("problemset-compiler-loader-missing");
        let out = SourceLoader::new().flatten("before \\input{foo} after", &dir);
        assert!(out.starts_with("before "));
        assert!(out.contains("% (missing input file: foo.tex)"));
        assert!(out.ends_with(" after"));
    }

    #[test]
    fn other_commands_starting_with_input_are_untouched() {
        let dir = Path::new(".");
        let source = "\\inputencoding{utf8}";
        assert_eq!(SourceLoader::new().flatten(source, dir), source);
    }
}
