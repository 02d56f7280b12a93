//! The inline converter: a LaTeX fragment to HTML nodes.
//!
//! Stages, in order: list conversion, math environment wrapping, dollar
//! normalization, then math/text segmentation with per-segment formatting.
//! Every stage is total; malformed input degrades to literal text.
use crate::backend::format;
use crate::backend::lists::{self, Piece};
use crate::backend::math;
use crate::codegen::html::{render_nodes, Node};

pub fn convert(fragment: &str) -> Vec<Node> {
    render_pieces(lists::convert_lists(fragment))
}

pub fn render_inline(fragment: &str) -> String {
    render_nodes(&convert(fragment))
}

pub fn render_pieces(pieces: Vec<Piece<'_>>) -> Vec<Node> {
    pieces
        .into_iter()
        .flat_map(|piece| match piece {
            Piece::Source(source) => convert_source(source),
            Piece::Html(node) => vec![node],
        })
        .collect()
}

/// Converts source that contains no list environments.
fn convert_source(source: &str) -> Vec<Node> {
    let wrapped = math::wrap_math_environments(source);
    let normalized = math::normalize_dollars(&wrapped);
    format::format_normalized(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::style;

    #[test]
    fn inline_math_is_passed_through() {
        assert_eq!(render_inline("Before $x^2$ after."), "Before \\(x^2\\) after.");
        assert_eq!(render_inline("$a<b$ & c"), "\\(a&lt;b\\) &amp; c");
    }

    #[test]
    fn display_math_environments_are_bracketed() {
        assert_eq!(
            render_inline("So \\begin{align*}x &= y\\end{align*}."),
            "So \\[\\begin{align*}x &amp;= y\\end{align*}\\].",
        );
    }

    #[test]
    fn environment_after_closed_display_math_is_bracketed() {
        let html = render_inline("$$a=b$$\n\\begin{align}x &= y \\\\ z &= w\\end{align}");
        assert!(html.starts_with("\\[a=b\\]"));
        assert!(html.ends_with("\\[\\begin{align}x &amp;= y \\\\ z &amp;= w\\end{align}\\]"));
        assert!(!html.contains("<br/>"));
    }

    #[test]
    fn escaped_dollar_stays_text() {
        assert_eq!(render_inline("pay \\$3 for $n$"), "pay \\$3 for \\(n\\)");
    }

    #[test]
    fn list_items_are_formatted() {
        let html = render_inline("Try:\n\\begin{itemize}\\item \\textbf{this} $x$\\end{itemize}");
        assert_eq!(html, format!(
            "Try:\n<ul style=\"{}\"><li style=\"{}\"><strong>this</strong> \\(x\\)</li></ul>",
            style::LIST, style::LIST_ITEM,
        ));
    }

    #[test]
    fn user_markup_is_never_unescaped() {
        assert_eq!(render_inline("<em>raw</em>"), "&lt;em&gt;raw&lt;/em&gt;");
    }
}
