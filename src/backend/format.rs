//! Text formatting outside math: emphasis commands, explicit line breaks and
//! whitespace cleanup around newlines.
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

use crate::backend::math::{self, Segment};
use crate::codegen::html::{Element, Node};
use crate::frontend::lexer::Lexer;
use crate::frontend::scan::{self, Group};
use crate::frontend::vocabulary::{self, Emphasis};

lazy_static! {
    static ref SPACE_BEFORE_NEWLINE: Regex = Regex::new(r"[ \t]+\n").unwrap();
    static ref SPACE_AFTER_NEWLINE: Regex = Regex::new(r"\n[ \t]+").unwrap();
}

/// Formats text whose math is already normalized to bracket delimiters.
///
/// Math spans pass through as [`Node::Math`]. An emphasis command found in a
/// text span takes its balanced argument even when that argument contains
/// math, and the argument is formatted recursively. An emphasis command whose
/// argument never closes is left as literal text.
pub fn format_normalized(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = text;
    'scan: loop {
        let mut offset = 0;
        for segment in math::segment(rest) {
            let len = segment.as_str().len();
            match segment {
                Segment::Math(tex) => nodes.push(Node::Math(tex.to_owned())),
                Segment::Text(plain) => {
                    if let Some((start, emphasis, group)) = find_emphasis(rest, offset, offset + len) {
                        nodes.extend(format_text(&rest[offset..start]));
                        nodes.push(Element::new(emphasis.html_tag())
                            .children(format_normalized(group.body))
                            .into());
                        rest = &rest[group.end..];
                        continue 'scan
                    }
                    nodes.extend(format_text(plain));
                }
            }
            offset += len;
        }
        break
    }
    nodes
}

/// The first emphasis command with a closed argument starting in `from..to`.
fn find_emphasis(text: &str, from: usize, to: usize) -> Option<(usize, Emphasis, Group<'_>)> {
    Lexer::at(text, from)
        .take_while(|token| token.start < to)
        .filter_map(|token| {
            let emphasis = vocabulary::emphasis(token.command_name()?)?;
            let group = scan::group_at(text, token.end)?;
            Some((token.start, emphasis, group))
        })
        .next()
}

/// Plain text: `\\` becomes `<br/>` and spaces hugging a newline are removed.
pub fn format_text(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut cursor = 0;
    for token in Lexer::new(text).filter(|token| token.is_symbol('\\')) {
        push_text(&mut nodes, &text[cursor..token.start]);
        nodes.push(Element::new("br").into());
        cursor = token.end;
    }
    push_text(&mut nodes, &text[cursor..]);
    nodes
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(tidy_whitespace(text).into_owned()));
    }
}

pub fn tidy_whitespace(text: &str) -> Cow<'_, str> {
    let text = SPACE_BEFORE_NEWLINE.replace_all(text, "\n");
    match SPACE_AFTER_NEWLINE.replace_all(&text, "\n") {
        Cow::Borrowed(_) => text,
        Cow::Owned(tidied) => Cow::Owned(tidied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::html::render_nodes;

    fn format(text: &str) -> String {
        render_nodes(&format_normalized(text))
    }

    #[test]
    fn nested_emphasis() {
        assert_eq!(
            format("\\textbf{bold \\emph{and italic}}"),
            "<strong>bold <em>and italic</em></strong>",
        );
        assert_eq!(format("\\textit{a} and \\emph{b}"), "<em>a</em> and <em>b</em>");
    }

    #[test]
    fn emphasis_argument_may_contain_math() {
        assert_eq!(
            format("\\emph{if \\(x<1\\)} then"),
            "<em>if \\(x&lt;1\\)</em> then",
        );
    }

    #[test]
    fn emphasis_inside_math_is_untouched() {
        assert_eq!(format("\\(\\textbf{v}\\)"), "\\(\\textbf{v}\\)");
    }

    #[test]
    fn unterminated_emphasis_is_literal() {
        assert_eq!(format("\\emph{open and <b>"), "\\emph{open and &lt;b&gt;");
        assert_eq!(format("\\emph x"), "\\emph x");
    }

    #[test]
    fn line_breaks_and_whitespace() {
        assert_eq!(format("one \\\\  \n   two"), "one <br/>\ntwo");
        assert_eq!(format("a \t\n\t b"), "a\nb");
    }

    #[test]
    fn text_is_escaped_but_braces_survive() {
        assert_eq!(format("A & B {x} <tag>"), "A &amp; B {x} &lt;tag&gt;");
    }
}
