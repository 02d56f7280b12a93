//! Document metadata: `\course`, `\author`, `\hwtitle` and the `inspiration`
//! epigraph. A missing field is an empty string, never an error.
use crate::frontend::lexer::Lexer;
use crate::frontend::scan::{self, Environment};
use crate::frontend::vocabulary::{self, MetadataField, AUTHOR, COURSE, EPIGRAPH, TITLE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub course: String,
    pub author: String,
    pub title: String,
    /// Raw LaTeX of the epigraph environment.
    pub epigraph: String,
}

impl Metadata {
    pub fn extract(source: &str) -> Metadata {
        Metadata {
            course: extract_braced_argument(source, COURSE),
            author: extract_braced_argument(source, AUTHOR),
            title: extract_braced_argument(source, TITLE),
            epigraph: extract_environment_body(source, EPIGRAPH),
        }
    }
}

/// The trimmed argument of the first `\command{...}`, or an empty string.
pub fn extract_braced_argument(source: &str, command: &str) -> String {
    scan::find_command_argument(source, 0, command)
        .map(|(_, group)| group.body.trim().to_owned())
        .unwrap_or_default()
}

/// The trimmed body of the first `env` environment, matched with nesting, or
/// an empty string.
pub fn extract_environment_body(source: &str, env: &str) -> String {
    scan::find_begin(source, 0, |name| name == env)
        .and_then(|begin| Environment::close(source, begin))
        .map(|env| env.body.trim().to_owned())
        .unwrap_or_default()
}

/// An epigraph split into its quote and the `\byline{...}` attribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Epigraph<'a> {
    pub quote: &'a str,
    pub attribution: &'a str,
}

impl<'a> Epigraph<'a> {
    pub fn parse(raw: &'a str) -> Epigraph<'a> {
        let raw = raw.trim();
        let byline = Lexer::new(raw).find(|token| {
            token.command_name().and_then(vocabulary::metadata_field) == Some(MetadataField::Byline)
                && scan::opens_group(raw, token.end)
        });
        match byline {
            Some(token) => Epigraph {
                quote: raw[..token.start].trim(),
                attribution: scan::group_at(raw, token.end)
                    .map(|group| group.body.trim())
                    .unwrap_or_default(),
            },
            None => Epigraph {quote: raw, attribution: ""},
        }
    }
    pub fn is_empty(&self) -> bool {
        self.quote.is_empty() && self.attribution.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = "\\documentclass{homework}\n\
        \\course{MATH 2568}\n\
        \\author{Jim {\\em Fowler}}\n\
        \\hwtitle{Linear \\{algebra\\}}\n\
        \\begin{inspiration}\n  Do or do not. \\byline{Yoda}\n\\end{inspiration}\n";

    #[test]
    fn extracts_all_fields() {
        let metadata = Metadata::extract(PREAMBLE);
        assert_eq!(metadata.course, "MATH 2568");
        assert_eq!(metadata.author, "Jim {\\em Fowler}");
        assert_eq!(metadata.title, "Linear \\{algebra\\}");
        assert_eq!(metadata.epigraph, "Do or do not. \\byline{Yoda}");
    }

    #[test]
    fn absent_fields_are_empty() {
        assert_eq!(Metadata::extract("\\begin{document}\\end{document}"), Metadata::default());
        assert_eq!(extract_braced_argument("\\course{unterminated", COURSE), "");
    }

    #[test]
    fn environment_body_uses_nesting() {
        let source = "\\begin{box}a\\begin{box}b\\end{box}c\\end{box}";
        assert_eq!(extract_environment_body(source, "box"), "a\\begin{box}b\\end{box}c");
    }

    #[test]
    fn splits_epigraph_attribution() {
        let epigraph = Epigraph::parse("Do or do not. \\byline{Yoda}");
        assert_eq!(epigraph.quote, "Do or do not.");
        assert_eq!(epigraph.attribution, "Yoda");

        let epigraph = Epigraph::parse("  Just a quote. ");
        assert_eq!(epigraph, Epigraph {quote: "Just a quote.", attribution: ""});
        assert!(Epigraph::parse("").is_empty());
    }
}
