//! Lazy tokenizer over LaTeX source.
//!
//! Every scanning routine in the compiler walks this token stream rather than
//! raw characters. An escaped character (`\{`, `\$`, `\%`, ...) comes out as a
//! single [`TokenKind::Symbol`], so it never changes brace depth, math state,
//! or comment detection.
//!
//! Tokens carry byte spans into the source; a [`Lexer`] can be restarted at
//! any token boundary with [`Lexer::at`].

///////////////////////////////////////////////////////////////////////////////
// TOKENS
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `\name`, where the name is a run of ASCII letters.
    Command(&'a str),
    /// `\` followed by one non-letter character, e.g. `\\`, `\{`, `\$`, `\(`.
    Symbol(char),
    BeginGroup,
    EndGroup,
    Dollar,
    Percent,
    /// A maximal run of characters without special meaning.
    Text(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_command(&self, name: &str) -> bool {
        match self.kind {
            TokenKind::Command(x) => x == name,
            _ => false,
        }
    }
    pub fn is_symbol(&self, ch: char) -> bool {
        self.kind == TokenKind::Symbol(ch)
    }
    pub fn command_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Command(x) => Some(x),
            _ => None,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// LEXER
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer::at(source, 0)
    }
    /// Start lexing at `position`, which must lie on a char boundary.
    pub fn at(source: &'a str, position: usize) -> Self {
        Lexer {source, position}
    }
}

fn is_special(ch: char) -> bool {
    matches!(ch, '\\' | '{' | '}' | '$' | '%')
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let start = self.position;
        let rest = self.source.get(start..)?;
        let mut chars = rest.chars();
        let first = chars.next()?;
        let (kind, len) = match first {
            '\\' => match chars.next() {
                Some(ch) if ch.is_ascii_alphabetic() => {
                    let name_len = rest[1..]
                        .find(|c: char| !c.is_ascii_alphabetic())
                        .unwrap_or(rest.len() - 1);
                    (TokenKind::Command(&rest[1..1 + name_len]), 1 + name_len)
                }
                Some(ch) => (TokenKind::Symbol(ch), 1 + ch.len_utf8()),
                // A trailing lone backslash.
                None => (TokenKind::Text(&rest[..1]), 1),
            },
            '{' => (TokenKind::BeginGroup, 1),
            '}' => (TokenKind::EndGroup, 1),
            '$' => (TokenKind::Dollar, 1),
            '%' => (TokenKind::Percent, 1),
            _ => {
                let len = rest.find(is_special).unwrap_or(rest.len());
                (TokenKind::Text(&rest[..len]), len)
            }
        };
        self.position = start + len;
        Some(Token {kind, start, end: start + len})
    }
}
