//! Balanced scanning primitives shared by every stage.
//!
//! * Brace groups: `{...}` matched by depth, escape-aware.
//! * Environments: `\begin{name}...\end{name}` matched by depth, where only
//!   environments of the *same* name count toward nesting.
use crate::frontend::lexer::{Lexer, Token, TokenKind};

///////////////////////////////////////////////////////////////////////////////
// BRACE GROUPS
///////////////////////////////////////////////////////////////////////////////

/// A balanced `{...}` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<'a> {
    /// Text strictly between the braces.
    pub body: &'a str,
    /// Position of the opening brace.
    pub start: usize,
    /// Position just past the closing brace.
    pub end: usize,
}

/// Given the position of an opening `{`, returns the position of the matching
/// `}`; `None` if `open` is not a brace or the group never closes.
pub fn matching_close(source: &str, open: usize) -> Option<usize> {
    let mut lexer = Lexer::at(source, open);
    if lexer.next()?.kind != TokenKind::BeginGroup {
        return None
    }
    let mut depth: usize = 1;
    for token in lexer {
        match token.kind {
            TokenKind::BeginGroup => depth += 1,
            TokenKind::EndGroup => {
                depth -= 1;
                if depth == 0 {
                    return Some(token.start)
                }
            }
            _ => ()
        }
    }
    None
}

/// Reads the group that opens exactly at `position`.
pub fn group_at(source: &str, position: usize) -> Option<Group<'_>> {
    let close = matching_close(source, position)?;
    Some(Group {
        body: &source[position + 1..close],
        start: position,
        end: close + 1,
    })
}

pub fn opens_group(source: &str, position: usize) -> bool {
    source[position..].starts_with('{')
}

/// Finds the first `\command{...}` at or after `from` and returns its argument.
///
/// Occurrences of the command without an adjacent brace are skipped. An
/// unterminated argument ends the search.
pub fn find_command_argument<'a>(
    source: &'a str,
    from: usize,
    command: &str,
) -> Option<(Token<'a>, Group<'a>)> {
    let mut lexer = Lexer::at(source, from);
    while let Some(token) = lexer.next() {
        if !token.is_command(command) || !opens_group(source, token.end) {
            continue
        }
        return group_at(source, token.end).map(|group| (token, group))
    }
    None
}

///////////////////////////////////////////////////////////////////////////////
// ENVIRONMENTS
///////////////////////////////////////////////////////////////////////////////

/// A `\begin{name}` or `\end{name}` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvTag<'a> {
    pub name: &'a str,
    /// Position of the backslash.
    pub start: usize,
    /// Position just past the closing brace of the name.
    pub end: usize,
}

/// Reads an environment tag if `token` is `\begin` or `\end` followed by a
/// braced name.
pub fn env_tag<'a>(source: &'a str, token: &Token<'a>) -> Option<EnvTag<'a>> {
    if !token.is_command("begin") && !token.is_command("end") {
        return None
    }
    let group = group_at(source, token.end)?;
    Some(EnvTag {
        name: group.body,
        start: token.start,
        end: group.end,
    })
}

/// Finds the first `\begin{name}` at or after `from` whose name satisfies
/// `accept`.
pub fn find_begin<'a>(
    source: &'a str,
    from: usize,
    accept: impl Fn(&str) -> bool,
) -> Option<EnvTag<'a>> {
    Lexer::at(source, from)
        .filter(|token| token.is_command("begin"))
        .filter_map(|token| env_tag(source, &token))
        .find(|tag| accept(tag.name))
}

/// Finds the `\end{...}` matching `begin`, counting nested environments of the
/// same name.
pub fn matching_end<'a>(source: &'a str, begin: &EnvTag<'a>) -> Option<EnvTag<'a>> {
    let mut depth: usize = 1;
    let mut lexer = Lexer::at(source, begin.end);
    while let Some(token) = lexer.next() {
        let tag = match env_tag(source, &token) {
            Some(tag) => tag,
            None => continue,
        };
        lexer = Lexer::at(source, tag.end);
        if tag.name != begin.name {
            continue
        }
        if token.is_command("begin") {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(tag)
            }
        }
    }
    None
}

/// A complete environment: its opening tag, matching closing tag and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment<'a> {
    pub begin: EnvTag<'a>,
    pub end: EnvTag<'a>,
    pub body: &'a str,
}

impl<'a> Environment<'a> {
    pub fn close(source: &'a str, begin: EnvTag<'a>) -> Option<Self> {
        let end = matching_end(source, &begin)?;
        Some(Environment {
            begin,
            end,
            body: &source[begin.end..end.start],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_nested_braces() {
        let source = "\\cmd{a{b}c}d";
        let group = group_at(source, 4).unwrap();
        assert_eq!(group.body, "a{b}c");
        assert_eq!(&source[group.end..], "d");
    }

    #[test]
    fn escaped_braces_do_not_count() {
        let source = "{a\\}b\\{c}";
        assert_eq!(group_at(source, 0).unwrap().body, "a\\}b\\{c");
    }

    #[test]
    fn unterminated_group_is_none() {
        assert_eq!(group_at("{a{b}", 0), None);
        assert_eq!(group_at("abc", 0), None);
    }

    #[test]
    fn command_argument_skips_brace_less_occurrences() {
        let source = "\\course x \\course{Math 101}";
        let (token, group) = find_command_argument(source, 0, "course").unwrap();
        assert_eq!(token.start, 10);
        assert_eq!(group.body, "Math 101");
    }

    #[test]
    fn environment_matching_counts_same_name_only() {
        let source = "\\begin{a}x\\begin{b}\\begin{a}y\\end{a}\\end{b}z\\end{a}tail";
        let begin = find_begin(source, 0, |name| name == "a").unwrap();
        let env = Environment::close(source, begin).unwrap();
        assert_eq!(env.body, "x\\begin{b}\\begin{a}y\\end{a}\\end{b}z");
        assert_eq!(&source[env.end.end..], "tail");
    }

    #[test]
    fn unmatched_environment_is_none() {
        let source = "\\begin{a}x\\begin{a}\\end{a}";
        let begin = find_begin(source, 0, |name| name == "a").unwrap();
        assert_eq!(matching_end(source, &begin), None);
    }
}
