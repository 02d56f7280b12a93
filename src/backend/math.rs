//! Math handling: display-environment wrapping, dollar normalization and
//! math/text segmentation.
//!
//! After normalization, math is marked only by `\(...\)` (inline) and
//! `\[...\]` (display); the content between the brackets is never altered.
use log::warn;
use std::borrow::Cow;

use crate::frontend::lexer::{Lexer, TokenKind};
use crate::frontend::scan::{self, Environment};
use crate::frontend::vocabulary;

///////////////////////////////////////////////////////////////////////////////
// DISPLAY ENVIRONMENTS
///////////////////////////////////////////////////////////////////////////////

/// Encloses every math-block environment (`align`, `equation*`, ...) in
/// `\[...\]` unless it already sits inside open math.
pub fn wrap_math_environments(text: &str) -> Cow<'_, str> {
    let mut output = String::new();
    let mut cursor = 0;
    let mut from = 0;
    let mut state = MathState::default();
    while let Some(begin) = scan::find_begin(text, from, vocabulary::is_math_block) {
        let env = match Environment::close(text, begin) {
            Some(env) => env,
            None => {
                warn!("unterminated {} environment", begin.name);
                break
            }
        };
        state.advance(text, from, begin.start);
        if !state.is_open() {
            output.push_str(&text[cursor..begin.start]);
            output.push_str("\\[");
            output.push_str(&text[begin.start..env.end.end]);
            output.push_str("\\]");
            cursor = env.end.end;
        }
        from = env.end.end;
    }
    if cursor == 0 {
        return Cow::Borrowed(text)
    }
    output.push_str(&text[cursor..]);
    Cow::Owned(output)
}

/// Which math delimiters are open at some point of raw source. Environment
/// bodies are skipped, so only delimiters between environments count.
#[derive(Debug, Default, Clone, Copy)]
struct MathState {
    inline: bool,
    display: bool,
}

impl MathState {
    fn is_open(&self) -> bool {
        self.inline || self.display
    }

    /// Applies the delimiters in `text[from..to]`; both ends are token
    /// boundaries.
    fn advance(&mut self, text: &str, from: usize, to: usize) {
        let mut tokens = Lexer::at(text, from)
            .take_while(|token| token.start < to)
            .peekable();
        while let Some(token) = tokens.next() {
            match token.kind {
                TokenKind::Dollar => {
                    let double = tokens
                        .peek()
                        .map(|next| next.kind == TokenKind::Dollar)
                        .unwrap_or(false);
                    if double {
                        let _ = tokens.next();
                        self.display = !self.display;
                    } else if !self.display {
                        self.inline = !self.inline;
                    }
                }
                TokenKind::Symbol('[') => self.display = true,
                TokenKind::Symbol(']') => self.display = false,
                TokenKind::Symbol('(') => self.inline = true,
                TokenKind::Symbol(')') => self.inline = false,
                _ => (),
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// DOLLAR DELIMITERS
///////////////////////////////////////////////////////////////////////////////

/// Rewrites `$$...$$` to `\[...\]` and `$...$` to `\(...\)` in one scan.
///
/// * `\$` is copied literally and never toggles anything.
/// * A `$$` pair is tried before a single `$`.
/// * A single `$` inside display math is left as it is.
pub fn normalize_dollars(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 16);
    let mut inline = false;
    let mut display = false;
    let mut tokens = Lexer::new(text).peekable();
    while let Some(token) = tokens.next() {
        if token.kind != TokenKind::Dollar {
            output.push_str(&text[token.start..token.end]);
            continue
        }
        let double = tokens
            .peek()
            .map(|next| next.kind == TokenKind::Dollar)
            .unwrap_or(false);
        if double {
            let _ = tokens.next();
            output.push_str(if display {"\\]"} else {"\\["});
            display = !display;
        } else if !display {
            output.push_str(if inline {"\\)"} else {"\\("});
            inline = !inline;
        } else {
            output.push('$');
        }
    }
    if inline || display {
        warn!("unbalanced math delimiter");
    }
    output
}

///////////////////////////////////////////////////////////////////////////////
// SEGMENTATION
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Math including its bracket delimiters.
    Math(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    pub fn is_math(&self) -> bool {
        match self {
            Segment::Math(_) => true,
            Segment::Text(_) => false,
        }
    }
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Math(x) => x,
            Segment::Text(x) => x,
        }
    }
}

/// Splits normalized text into math and text spans. Concatenating the
/// segments gives back `text`. An opener with no closer turns the remainder
/// into text.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut lexer = Lexer::new(text);
    while let Some(token) = lexer.next() {
        let closer = match token.kind {
            TokenKind::Symbol('(') => ')',
            TokenKind::Symbol('[') => ']',
            _ => continue,
        };
        let close = match Lexer::at(text, token.end).find(|next| next.is_symbol(closer)) {
            Some(close) => close,
            None => {
                warn!("unterminated math starting with `\\{}`", &text[token.start + 1..token.end]);
                break
            }
        };
        if cursor < token.start {
            segments.push(Segment::Text(&text[cursor..token.start]));
        }
        segments.push(Segment::Math(&text[token.start..close.end]));
        cursor = close.end;
        lexer = Lexer::at(text, cursor);
    }
    if cursor < text.len() {
        segments.push(Segment::Text(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_bare_math_environments_once() {
        let text = "see \\begin{align}a&=b\\end{align} done";
        let wrapped = wrap_math_environments(text);
        assert_eq!(wrapped, "see \\[\\begin{align}a&=b\\end{align}\\] done");
        assert_eq!(wrap_math_environments(&wrapped), wrapped);
    }

    #[test]
    fn leaves_enclosed_and_other_environments() {
        let text = "\\[ \\begin{equation*}x\\end{equation*} \\] \\begin{center}c\\end{center}";
        assert_eq!(wrap_math_environments(text), text);
        let text = "$$\\begin{gather}y\\end{gather}$$";
        assert_eq!(wrap_math_environments(text), text);
    }

    #[test]
    fn closing_delimiter_before_environment_does_not_enclose_it() {
        let text = "$$a=b$$\n\\begin{align}x &= y \\\\ z &= w\\end{align}";
        assert_eq!(
            wrap_math_environments(text),
            "$$a=b$$\n\\[\\begin{align}x &= y \\\\ z &= w\\end{align}\\]",
        );
        let text = "\\[a\\] \\begin{equation}e\\end{equation}";
        assert_eq!(wrap_math_environments(text), "\\[a\\] \\[\\begin{equation}e\\end{equation}\\]");
    }

    #[test]
    fn line_break_before_bracket_does_not_enclose() {
        let text = "x \\\\[2pt] \\begin{gather}g\\end{gather}";
        assert_eq!(wrap_math_environments(text), "x \\\\[2pt] \\[\\begin{gather}g\\end{gather}\\]");
    }

    #[test]
    fn environment_inside_inline_math_is_left_alone() {
        let text = "$ \\begin{aligned}q\\end{aligned} \\begin{align}r\\end{align} $";
        assert_eq!(wrap_math_environments(text), text);
    }

    #[test]
    fn nested_same_name_environment_is_wrapped_whole() {
        let text = "\\begin{align}\\begin{align}x\\end{align}\\end{align}";
        assert_eq!(wrap_math_environments(text), format!("\\[{}\\]", text));
    }

    #[test]
    fn converts_single_and_double_dollars() {
        assert_eq!(normalize_dollars("a $x$ b $$y$$ c"), "a \\(x\\) b \\[y\\] c");
    }

    #[test]
    fn escaped_dollar_does_not_toggle() {
        assert_eq!(normalize_dollars("costs \\$5 and $x$"), "costs \\$5 and \\(x\\)");
    }

    #[test]
    fn single_dollar_inside_display_is_literal() {
        assert_eq!(normalize_dollars("$$a $ b$$"), "\\[a $ b\\]");
    }

    #[test]
    fn double_takes_precedence_over_single() {
        assert_eq!(normalize_dollars("$a$$b$"), "\\(a\\[b$");
    }

    #[test]
    fn segments_text_and_math() {
        let normalized = normalize_dollars("Before $x^2$ after.");
        assert_eq!(segment(&normalized), vec![
            Segment::Text("Before "),
            Segment::Math("\\(x^2\\)"),
            Segment::Text(" after."),
        ]);
    }

    #[test]
    fn escaped_brackets_inside_math_do_not_close() {
        let text = "\\(a \\\\) b\\) c";
        assert_eq!(segment(text), vec![Segment::Math("\\(a \\\\) b\\)"), Segment::Text(" c")]);
    }

    #[test]
    fn unterminated_math_becomes_text() {
        assert_eq!(segment("x \\[y\\] z \\(w"), vec![
            Segment::Text("x "),
            Segment::Math("\\[y\\]"),
            Segment::Text(" z \\(w"),
        ]);
    }

    #[test]
    fn line_break_before_paren_is_not_math() {
        assert_eq!(segment("a\\\\(b)"), vec![Segment::Text("a\\\\(b)")]);
    }
}
