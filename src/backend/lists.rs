//! List environments (`enumerate`, `itemize`) to `<ol>`/`<ul>`.
//!
//! Lists are converted innermost first: a list's body is itself run through
//! [`convert_lists`] before it is split into items, so a nested list is
//! already an HTML node by the time its parent looks for `\item` markers.
//! Splitting is by marker occurrence in the remaining source; a marker inside
//! some other nested environment still starts a new item.
use log::warn;

use crate::backend::inline;
use crate::codegen::html::{Element, Node};
use crate::codegen::style;
use crate::frontend::lexer::{Lexer, Token};
use crate::frontend::scan::{self, Environment};
use crate::frontend::vocabulary::{self, ListKind};

/// A fragment after list conversion: untouched source interleaved with
/// finished list nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Source(&'a str),
    Html(Node),
}

impl<'a> Piece<'a> {
    fn is_empty_source(&self) -> bool {
        match self {
            Piece::Source(source) => source.is_empty(),
            Piece::Html(_) => false,
        }
    }
}

pub fn convert_lists(fragment: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut cursor = 0;
    let is_list = |name: &str| vocabulary::list_kind(name).is_some();
    while let Some(begin) = scan::find_begin(fragment, cursor, is_list) {
        let kind = match vocabulary::list_kind(begin.name) {
            Some(kind) => kind,
            None => break,
        };
        let env = match Environment::close(fragment, begin) {
            Some(env) => env,
            None => {
                warn!("unterminated {} environment; leaving it as text", begin.name);
                break
            }
        };
        if cursor < env.begin.start {
            pieces.push(Piece::Source(&fragment[cursor..env.begin.start]));
        }
        pieces.push(Piece::Html(render_list(kind, env.body)));
        cursor = env.end.end;
    }
    if cursor < fragment.len() {
        pieces.push(Piece::Source(&fragment[cursor..]));
    }
    pieces
}

fn render_list(kind: ListKind, body: &str) -> Node {
    let items = split_items(convert_lists(body))
        .into_iter()
        .map(|item| {
            Node::from(Element::new("li")
                .style(style::LIST_ITEM)
                .children(inline::render_pieces(item)))
        });
    Element::new(kind.html_tag())
        .style(style::LIST)
        .children(items)
        .into()
}

/// Splits a converted list body into items at each `\item`. Content before
/// the first marker is dropped. A body with no markers at all becomes a
/// single item, or no item if it is blank.
pub fn split_items(pieces: Vec<Piece<'_>>) -> Vec<Vec<Piece<'_>>> {
    let has_marker = pieces.iter().any(|piece| match piece {
        Piece::Source(source) => Lexer::new(source).any(|token| is_item_marker(&token)),
        Piece::Html(_) => false,
    });
    if !has_marker {
        let item = trim_item(pieces);
        return if item.is_empty() {Vec::new()} else {vec![item]}
    }
    let mut items = Vec::new();
    let mut current: Option<Vec<Piece>> = None;
    for piece in pieces {
        let source = match piece {
            Piece::Source(source) => source,
            html => {
                if let Some(item) = current.as_mut() {
                    item.push(html);
                }
                continue
            }
        };
        let mut cursor = 0;
        for marker in Lexer::new(source).filter(is_item_marker) {
            if let Some(mut item) = current.take() {
                item.push(Piece::Source(&source[cursor..marker.start]));
                items.push(trim_item(item));
            }
            current = Some(Vec::new());
            cursor = marker.end;
        }
        if let Some(item) = current.as_mut() {
            item.push(Piece::Source(&source[cursor..]));
        }
    }
    items.extend(current.map(trim_item));
    items
}

fn is_item_marker(token: &Token<'_>) -> bool {
    token.command_name().map(vocabulary::is_list_item).unwrap_or(false)
}

fn trim_item(mut pieces: Vec<Piece<'_>>) -> Vec<Piece<'_>> {
    pieces.retain(|piece| !piece.is_empty_source());
    if let Some(Piece::Source(first)) = pieces.first_mut() {
        *first = first.trim_start();
    }
    if let Some(Piece::Source(last)) = pieces.last_mut() {
        *last = last.trim_end();
    }
    pieces.retain(|piece| !piece.is_empty_source());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::html::render_nodes;

    fn render(fragment: &str) -> String {
        render_nodes(&inline::render_pieces(convert_lists(fragment)))
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn converts_flat_list() {
        let html = render("\\begin{enumerate}\\item One \\item Two\\end{enumerate}");
        assert_eq!(html, format!(
            "<ol style=\"{}\"><li style=\"{}\">One</li><li style=\"{}\">Two</li></ol>",
            style::LIST, style::LIST_ITEM, style::LIST_ITEM,
        ));
    }

    #[test]
    fn nested_list_is_converted_before_splitting() {
        let html = render(
            "\\begin{itemize}\n\\item a\n\\begin{enumerate}\\item x\\item y\\item z\\end{enumerate}\n\\item b\n\\end{itemize}"
        );
        assert_eq!(count(&html, "<ul "), 1);
        assert_eq!(count(&html, "<ol "), 1);
        assert_eq!(count(&html, "<li "), 5);
        assert!(html.contains("<li style=\"margin: 0.35em 0;\">a\n<ol "));
        assert!(!html.contains("\\item"));
    }

    #[test]
    fn keeps_empty_items_and_drops_preamble() {
        let pieces = convert_lists("\\begin{itemize} lead \\item \\item last\\end{itemize}");
        let list = match &pieces[..] {
            [Piece::Html(Node::Element(list))] => list,
            other => panic!("unexpected pieces: {:?}", other),
        };
        assert_eq!(list.children.len(), 2);
        assert!(!render_nodes(&list.children).contains("lead"));
    }

    #[test]
    fn body_without_markers_is_one_item() {
        let html = render("\\begin{itemize} just text \\end{itemize}");
        assert_eq!(count(&html, "<li "), 1);
        assert!(html.contains(">just text</li>"));
        let html = render("\\begin{itemize}  \\end{itemize}");
        assert_eq!(html, format!("<ul style=\"{}\"></ul>", style::LIST));
    }

    #[test]
    fn surrounding_source_is_preserved() {
        let pieces = convert_lists("before \\begin{itemize}\\item x\\end{itemize} after");
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0], Piece::Source("before "));
        assert_eq!(pieces[2], Piece::Source(" after"));
    }

    #[test]
    fn unterminated_list_stays_source() {
        let fragment = "\\begin{itemize}\\item x\\begin{enumerate}\\item y\\end{enumerate}";
        assert_eq!(convert_lists(fragment), vec![Piece::Source(fragment)]);
    }

    #[test]
    fn item_prefix_commands_are_not_markers() {
        let html = render("\\begin{itemize}\\item \\itemsep x\\end{itemize}");
        assert_eq!(count(&html, "<li "), 1);
        assert!(html.contains("\\itemsep x"));
    }
}
