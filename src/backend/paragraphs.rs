//! Paragraph wrapping for problem content.
//!
//! Converted nodes are split at blank lines. Runs of inline nodes become `<p>`
//! elements with newlines collapsed to a space; lists stand alone.
use lazy_static::lazy_static;
use regex::Regex;

use crate::codegen::html::{Element, Node};
use crate::codegen::style;

lazy_static! {
    static ref BLANK_LINE: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref NEWLINE_RUN: Regex = Regex::new(r"\s*\n\s*").unwrap();
}

pub fn wrap_paragraphs(nodes: Vec<Node>) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for node in merge_text(nodes) {
        match node {
            Node::Element(element) if element.has_name("ol") || element.has_name("ul") => {
                flush(&mut blocks, &mut current);
                blocks.push(element.into());
            }
            Node::Text(text) => {
                let mut parts = BLANK_LINE.split(&text);
                if let Some(first) = parts.next() {
                    current.push(Node::text(first));
                }
                for part in parts {
                    flush(&mut blocks, &mut current);
                    current.push(Node::text(part));
                }
            }
            node => current.push(node),
        }
    }
    flush(&mut blocks, &mut current);
    blocks
}

/// Joins adjacent text nodes so a blank line is never split across two.
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::Text(text) = &node {
            if let Some(previous) = merged.last_mut().and_then(Node::unwrap_text_mut) {
                previous.push_str(text);
                continue
            }
        }
        merged.push(node);
    }
    merged
}

fn flush(blocks: &mut Vec<Node>, current: &mut Vec<Node>) {
    let mut paragraph = std::mem::take(current);
    if let Some(first) = paragraph.first_mut().and_then(Node::unwrap_text_mut) {
        *first = first.trim_start().to_owned();
    }
    if let Some(last) = paragraph.last_mut().and_then(Node::unwrap_text_mut) {
        *last = last.trim_end().to_owned();
    }
    paragraph.retain(|node| match node {
        Node::Text(text) => !text.is_empty(),
        _ => true,
    });
    if paragraph.iter().all(Node::is_blank) {
        return
    }
    for node in paragraph.iter_mut() {
        if let Some(text) = node.unwrap_text_mut() {
            *text = NEWLINE_RUN.replace_all(text, " ").into_owned();
        }
    }
    blocks.push(Element::new("p")
        .style(style::PARAGRAPH)
        .children(paragraph)
        .into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::inline;
    use crate::codegen::html::render_nodes;

    fn wrap(fragment: &str) -> String {
        render_nodes(&wrap_paragraphs(inline::convert(fragment)))
    }

    fn p(content: &str) -> String {
        format!("<p style=\"{}\">{}</p>", style::PARAGRAPH, content)
    }

    #[test]
    fn splits_at_blank_lines_and_collapses_newlines() {
        assert_eq!(
            wrap("  First line\nstill first.\n \n\nSecond $x$\n"),
            format!("{}{}", p("First line still first."), p("Second \\(x\\)")),
        );
    }

    #[test]
    fn lists_stand_alone() {
        let html = wrap("Intro\n\\begin{enumerate}\\item a\\end{enumerate}\nOutro");
        assert!(html.starts_with(&p("Intro")));
        assert!(html.ends_with(&p("Outro")));
        assert!(html.contains("</p><ol "));
        assert!(html.contains("</ol><p "));
    }

    #[test]
    fn blank_content_yields_nothing() {
        assert!(wrap_paragraphs(inline::convert(" \n\n  ")).is_empty());
    }

    #[test]
    fn math_newlines_are_kept() {
        assert_eq!(wrap("$$a\n\nb$$"), p("\\[a\n\nb\\]"));
    }
}
