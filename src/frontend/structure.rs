//! Document structuring: the body between `\begin{document}` and
//! `\end{document}` becomes an ordered list of section and problem blocks.
//!
//! Anything between blocks is discarded. An unterminated section argument or
//! problem environment stops structuring there; blocks already found are kept.
use log::{debug, warn};
use std::borrow::Cow;

use crate::frontend::data::{ProblemId, SetNumber};
use crate::frontend::lexer::{Lexer, TokenKind};
use crate::frontend::scan::{self, Environment};
use crate::frontend::vocabulary::{self, SECTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    Section {
        title: &'a str,
    },
    Problem {
        starred: bool,
        content: &'a str,
    },
}

impl<'a> Block<'a> {
    pub fn is_problem(&self) -> bool {
        match self {
            Block::Problem {..} => true,
            _ => false,
        }
    }
}

/// The text strictly between the document markers, or the whole source when
/// either marker is missing or out of order.
pub fn document_body(source: &str) -> &str {
    let begin = scan::find_begin(source, 0, vocabulary::is_document);
    let end = Lexer::new(source)
        .filter(|token| token.is_command("end"))
        .filter_map(|token| scan::env_tag(source, &token))
        .find(|tag| vocabulary::is_document(tag.name));
    match (begin, end) {
        (Some(begin), Some(end)) if end.start >= begin.end => &source[begin.end..end.start],
        _ => source,
    }
}

/// Removes commands that carry no content for the output, e.g. `\maketitle`.
pub fn strip_dropped_commands(body: &str) -> Cow<'_, str> {
    let dropped = Lexer::new(body)
        .filter(|token| token.command_name().map(vocabulary::is_dropped).unwrap_or(false))
        .collect::<Vec<_>>();
    if dropped.is_empty() {
        return Cow::Borrowed(body)
    }
    let mut output = String::with_capacity(body.len());
    let mut cursor = 0;
    for token in dropped {
        output.push_str(&body[cursor..token.start]);
        cursor = token.end;
    }
    output.push_str(&body[cursor..]);
    Cow::Owned(output)
}

pub fn parse_blocks(body: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut lexer = Lexer::new(body);
    while let Some(token) = lexer.next() {
        match token.kind {
            TokenKind::Command(name) if vocabulary::is_section(name) && scan::opens_group(body, token.end) => {
                let group = match scan::group_at(body, token.end) {
                    Some(group) => group,
                    None => {
                        warn!("unterminated \\{} argument; ignoring the rest of the document", SECTION);
                        break
                    }
                };
                blocks.push(Block::Section {title: group.body.trim()});
                lexer = Lexer::at(body, group.end);
            }
            TokenKind::Command("begin") => {
                let begin = match scan::env_tag(body, &token) {
                    Some(begin) => begin,
                    None => continue,
                };
                let starred = match vocabulary::problem_kind(begin.name) {
                    Some(starred) => starred,
                    None => continue,
                };
                let env = match Environment::close(body, begin) {
                    Some(env) => env,
                    None => {
                        warn!("unterminated {} environment; ignoring the rest of the document", begin.name);
                        break
                    }
                };
                blocks.push(Block::Problem {starred, content: env.body.trim()});
                lexer = Lexer::at(body, env.end.end);
            }
            _ => ()
        }
    }
    debug!(
        "structured {} block(s), {} problem(s)",
        blocks.len(),
        blocks.iter().filter(|block| block.is_problem()).count(),
    );
    blocks
}

/// A block after numbering. Only problems carry an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbered<'a> {
    Section {
        title: &'a str,
    },
    Problem {
        id: ProblemId,
        starred: bool,
        content: &'a str,
    },
}

impl<'a> Numbered<'a> {
    pub fn id(&self) -> Option<ProblemId> {
        match self {
            Numbered::Problem {id, ..} => Some(*id),
            Numbered::Section {..} => None,
        }
    }
}

/// Numbers problems from 1 in document order; sections do not consume a
/// number.
pub fn number_problems<'b, 'a: 'b>(
    set: SetNumber,
    blocks: &'b [Block<'a>],
) -> impl Iterator<Item = Numbered<'a>> + 'b {
    blocks.iter().scan(0, move |counter, block| {
        let numbered = match *block {
            Block::Section {title} => Numbered::Section {title},
            Block::Problem {starred, content} => {
                *counter += 1;
                Numbered::Problem {id: ProblemId {set, index: *counter}, starred, content}
            }
        };
        Some(numbered)
    })
}
