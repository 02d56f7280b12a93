//! Assembles the final HTML document from metadata and blocks.
//!
//! Output is deterministic for identical inputs: no timestamps and no
//! generated ids beyond the problem identifiers.
use itertools::Itertools;

use crate::backend::{self, wrap_paragraphs};
use crate::codegen::html::{Element, Node};
use crate::codegen::style;
use crate::config::Config;
use crate::frontend::structure::{self, Block, Numbered};
use crate::frontend::{Epigraph, Metadata, ProblemId, SetNumber};

const STAR: &str = " \u{2605}";

pub struct Renderer<'c> {
    config: &'c Config,
}

impl<'c> Renderer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Renderer {config}
    }

    pub fn render(
        &self,
        metadata: &Metadata,
        set: SetNumber,
        macros: &[String],
        blocks: &[Block<'_>],
    ) -> String {
        let title = self.title(metadata);
        let head = Element::new("head")
            .child(Element::new("meta").attribute("charset", "utf-8"))
            .child(Element::new("meta")
                .attribute("name", "viewport")
                .attribute("content", "width=device-width, initial-scale=1"))
            .child(Element::new("script")
                .flag("defer")
                .attribute("src", self.config.math_script_url.as_str()))
            .child(Element::new("title").child(Node::text(title)));
        let page = Element::new("div")
            .style(style::PAGE)
            .children(macro_span(macros))
            .child(self.header(metadata, set))
            .children(render_blocks(set, blocks));
        let html = Element::new("html")
            .child(head)
            .child(Element::new("body").child(page));
        let mut output = String::from("<!doctype html>\n");
        Node::from(html).write(&mut output);
        output.push('\n');
        output
    }

    /// `\hwtitle`, else `\course`, else the configured fallback.
    fn title<'m>(&'m self, metadata: &'m Metadata) -> &'m str {
        [metadata.title.as_str(), metadata.course.as_str()]
            .iter()
            .copied()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(self.config.fallback_title.as_str())
    }

    fn header(&self, metadata: &Metadata, set: SetNumber) -> Element {
        let set_label = format!("Set S{}", set);
        let subtitle = [metadata.course.as_str(), metadata.author.as_str(), set_label.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .join(" ");
        let header = Element::new("div")
            .style(style::HEADER)
            .child(Element::new("h1").style(style::TITLE).child(Node::text(self.title(metadata))))
            .child(Element::new("div").style(style::SUBTITLE).child(Node::text(subtitle)));
        match epigraph(&metadata.epigraph) {
            Some(epigraph) => header.child(epigraph),
            None => header,
        }
    }
}

/// Macro definitions inside a hidden inline-math span, so the math renderer
/// learns them without displaying anything.
fn macro_span(macros: &[String]) -> Option<Node> {
    let joined = macros
        .iter()
        .map(|definition| definition.trim())
        .filter(|definition| !definition.is_empty())
        .join(" ");
    if joined.is_empty() {
        return None
    }
    let span = Element::new("span")
        .style(style::HIDDEN)
        .child(Node::Math(format!("\\({}\\)", joined)));
    Some(span.into())
}

fn epigraph(raw: &str) -> Option<Element> {
    let epigraph = Epigraph::parse(raw);
    if epigraph.is_empty() {
        return None
    }
    let quote = backend::convert(epigraph.quote);
    let attribution = backend::convert(epigraph.attribution);
    let mut container = Element::new("div").style(style::EPIGRAPH);
    if !quote.is_empty() {
        container = container.child(Element::new("div").style(style::QUOTE).children(quote));
    }
    if !attribution.is_empty() {
        container = container.child(Element::new("div")
            .style(style::ATTRIBUTION)
            .child(Node::Entity("mdash"))
            .child(Node::text(" "))
            .children(attribution));
    }
    Some(container)
}

fn render_blocks(set: SetNumber, blocks: &[Block<'_>]) -> Vec<Node> {
    structure::number_problems(set, blocks)
        .map(|numbered| match numbered {
            Numbered::Section {title} => Element::new("h1")
                .style(style::SECTION)
                .children(backend::convert(title))
                .into(),
            Numbered::Problem {id, starred, content} => problem_card(id, starred, content),
        })
        .collect()
}

fn problem_card(id: ProblemId, starred: bool, content: &str) -> Node {
    let id = id.to_string();
    let mut label = id.clone();
    if starred {
        label.push_str(STAR);
    }
    Element::new("div")
        .style(style::CARD)
        .attribute("id", id)
        .child(Element::new("div").style(style::CARD_TITLE).child(Node::text(label)))
        .children(wrap_paragraphs(backend::convert(content)))
        .into()
}
