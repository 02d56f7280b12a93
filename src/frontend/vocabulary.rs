//! The fixed vocabulary of recognized commands and environments.
//!
//! Names are case-sensitive. Anything not listed here is opaque and passes
//! through untouched for the downstream math renderer.
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const SECTION: &str = "section";
pub const DOCUMENT: &str = "document";
pub const COURSE: &str = "course";
pub const AUTHOR: &str = "author";
pub const TITLE: &str = "hwtitle";
pub const EPIGRAPH: &str = "inspiration";
pub const BYLINE: &str = "byline";
pub const INCLUDE: &str = "input";
pub const ITEM: &str = "item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Italic,
    Bold,
}

impl Emphasis {
    pub fn html_tag(self) -> &'static str {
        match self {
            Emphasis::Italic => "em",
            Emphasis::Bold => "strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn html_tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// The preamble commands and environment that fill in document metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Course,
    Author,
    Title,
    Epigraph,
    /// Attribution inside the epigraph.
    Byline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Format(Emphasis),
    Section,
    Problem {starred: bool},
    Document,
    MathBlock,
    List(ListKind),
    ListItem,
    Metadata(MetadataField),
    MacroDefinition,
    Inclusion,
    /// Recognized and silently removed.
    Dropped,
}

static COMMAND_LIST: &[(&str, Role)] = &[
    ("emph", Role::Format(Emphasis::Italic)),
    ("textit", Role::Format(Emphasis::Italic)),
    ("textbf", Role::Format(Emphasis::Bold)),
    (SECTION, Role::Section),
    (ITEM, Role::ListItem),
    (COURSE, Role::Metadata(MetadataField::Course)),
    (AUTHOR, Role::Metadata(MetadataField::Author)),
    (TITLE, Role::Metadata(MetadataField::Title)),
    (BYLINE, Role::Metadata(MetadataField::Byline)),
    ("newcommand", Role::MacroDefinition),
    ("renewcommand", Role::MacroDefinition),
    ("DeclareMathOperator", Role::MacroDefinition),
    ("def", Role::MacroDefinition),
    (INCLUDE, Role::Inclusion),
    ("maketitle", Role::Dropped),
];

static ENVIRONMENT_LIST: &[(&str, Role)] = &[
    ("problem", Role::Problem {starred: false}),
    ("problem*", Role::Problem {starred: true}),
    (DOCUMENT, Role::Document),
    (EPIGRAPH, Role::Metadata(MetadataField::Epigraph)),
    ("enumerate", Role::List(ListKind::Ordered)),
    ("itemize", Role::List(ListKind::Unordered)),
    ("equation", Role::MathBlock),
    ("equation*", Role::MathBlock),
    ("align", Role::MathBlock),
    ("align*", Role::MathBlock),
    ("gather", Role::MathBlock),
    ("gather*", Role::MathBlock),
    ("multline", Role::MathBlock),
    ("multline*", Role::MathBlock),
    ("flalign", Role::MathBlock),
    ("flalign*", Role::MathBlock),
    ("alignat", Role::MathBlock),
    ("alignat*", Role::MathBlock),
];

lazy_static! {
    static ref COMMANDS: HashMap<&'static str, Role> = COMMAND_LIST.iter().copied().collect();
    static ref ENVIRONMENTS: HashMap<&'static str, Role> = ENVIRONMENT_LIST.iter().copied().collect();
}

pub fn command_role(name: &str) -> Option<Role> {
    COMMANDS.get(name).copied()
}

pub fn environment_role(name: &str) -> Option<Role> {
    ENVIRONMENTS.get(name).copied()
}

pub fn is_section(command: &str) -> bool {
    command_role(command) == Some(Role::Section)
}

pub fn is_list_item(command: &str) -> bool {
    command_role(command) == Some(Role::ListItem)
}

pub fn is_inclusion(command: &str) -> bool {
    command_role(command) == Some(Role::Inclusion)
}

pub fn is_document(environment: &str) -> bool {
    environment_role(environment) == Some(Role::Document)
}

pub fn metadata_field(command: &str) -> Option<MetadataField> {
    match command_role(command)? {
        Role::Metadata(field) => Some(field),
        _ => None,
    }
}

pub fn emphasis(command: &str) -> Option<Emphasis> {
    match command_role(command)? {
        Role::Format(emphasis) => Some(emphasis),
        _ => None,
    }
}

pub fn is_macro_definition(command: &str) -> bool {
    command_role(command) == Some(Role::MacroDefinition)
}

pub fn is_dropped(command: &str) -> bool {
    command_role(command) == Some(Role::Dropped)
}

pub fn list_kind(environment: &str) -> Option<ListKind> {
    match environment_role(environment)? {
        Role::List(kind) => Some(kind),
        _ => None,
    }
}

pub fn is_math_block(environment: &str) -> bool {
    environment_role(environment) == Some(Role::MathBlock)
}

/// `Some(starred)` for the problem environments.
pub fn problem_kind(environment: &str) -> Option<bool> {
    match environment_role(environment)? {
        Role::Problem {starred} => Some(starred),
        _ => None,
    }
}
