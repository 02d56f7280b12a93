//! HTML node tree and serializer.
//!
//! Converted content is built as typed nodes and escaped only when written
//! out, per node kind: text and math escape `&`, `<` and `>`; attribute values
//! additionally escape `"`. Nothing is ever unescaped after the fact.
use std::borrow::Cow;

///////////////////////////////////////////////////////////////////////////////
// NODES
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attributes: Vec<(&'static str, Option<String>)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// TeX passed through verbatim for the math renderer, delimiters included.
    Math(String),
    /// A named character reference such as `mdash`.
    Entity(&'static str),
}

static VOID_ELEMENTS: &[&str] = &["br", "meta"];
static BLOCK_ELEMENTS: &[&str] = &["html", "head", "body", "div", "h1", "p", "ol", "ul", "title", "meta", "script"];

impl Element {
    pub fn new(name: &'static str) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
    pub fn attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, Some(value.into())));
        self
    }
    /// A value-less attribute such as `defer`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attributes.push((name, None));
        self
    }
    pub fn style(self, value: &str) -> Self {
        self.attribute("style", value)
    }
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name)
    }
    pub fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.contains(&self.name)
    }
    /// Whether children are laid out one per line.
    fn breaks_lines(&self) -> bool {
        match self.name {
            "html" | "head" | "body" => true,
            "div" => self.children.iter().any(Node::is_block),
            _ => false,
        }
    }
    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
        }
        if self.is_void() {
            out.push_str("/>");
            return
        }
        out.push('>');
        let breaks = self.breaks_lines();
        if breaks {
            out.push('\n');
        }
        for child in &self.children {
            child.write(out);
            if breaks {
                out.push('\n');
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Node {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(value: impl Into<String>) -> Node {
        Node::Text(value.into())
    }
    pub fn is_block(&self) -> bool {
        match self {
            Node::Element(element) => element.is_block(),
            _ => false,
        }
    }
    pub fn unwrap_text_mut(&mut self) -> Option<&mut String> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
    /// Whether the node renders as nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Node::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
    pub fn write(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Math(math) => out.push_str(&escape_text(math)),
            Node::Entity(name) => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
        }
    }
    pub fn to_html_string(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }
}

pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write(&mut out);
    }
    out
}

///////////////////////////////////////////////////////////////////////////////
// ESCAPING
///////////////////////////////////////////////////////////////////////////////

/// Escapes `&`, `<` and `>`; quotes are left alone.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    escape(value, false)
}

pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(value: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value)
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            ch => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_but_not_quotes() {
        assert_eq!(escape_text("a < b && \"c\""), "a &lt; b &amp;&amp; \"c\"");
        assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn inserted_tags_survive_while_content_is_escaped() {
        let node: Node = Element::new("strong")
            .child(Node::text("<b> & "))
            .child(Element::new("em").child(Node::text("x")))
            .child(Element::new("br"))
            .into();
        assert_eq!(node.to_html_string(), "<strong>&lt;b&gt; &amp; <em>x</em><br/></strong>");
    }

    #[test]
    fn writes_attributes_in_order() {
        let node: Node = Element::new("script")
            .flag("defer")
            .attribute("src", "https://example.org/a.js?x=1&y=2")
            .into();
        assert_eq!(
            node.to_html_string(),
            "<script defer src=\"https://example.org/a.js?x=1&amp;y=2\"></script>",
        );
    }

    #[test]
    fn block_containers_break_lines() {
        let node: Node = Element::new("div")
            .child(Element::new("p").child(Node::text("a")))
            .child(Element::new("p").child(Node::Entity("mdash")))
            .into();
        assert_eq!(node.to_html_string(), "<div>\n<p>a</p>\n<p>&mdash;</p>\n</div>");
        let inline: Node = Element::new("div").child(Node::Math("\\(x<1\\)".into())).into();
        assert_eq!(inline.to_html_string(), "<div>\\(x&lt;1\\)</div>");
    }
}
