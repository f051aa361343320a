//! Owned HTML tree used by every composition stage.
//!
//! The template and every fragment are parsed with [`tl`] and immediately
//! converted into the owned [`Node`] tree defined here. `tl` hands out a
//! borrowed, read-only view of its input; composition needs the opposite: a
//! tree that can be deep-copied per page, mutated in place, and written back
//! out. Conversion happens once per parse and nothing downstream sees `tl`.
//!
//! ## Text and attribute values
//!
//! Text nodes and attribute values are stored exactly as they appear in the
//! source (still entity-encoded), so a parse → serialize round trip does not
//! rewrite the template author's markup. Values created during composition
//! must go through [`escape`] before they enter the tree.
//!
//! ## Parsing
//!
//! Source goes through a strict lexical pass (`prepare`) before `tl` sees
//! it. The pass keeps attributes in source order, cuts out the bodies of
//! `script`, `style`, `textarea` and `title` as raw text, and writes out every
//! end tag HTML allows authors to omit. `tl` then only assembles the tree.
//! Markup a browser would have to repair (a bare `<`, a stray end tag, an
//! element left open) is a [`DomError::Parse`], never a guess.
//!
//! ## What is not preserved
//!
//! Comments are dropped. The doctype is kept verbatim but must be the first
//! thing in the document (leading whitespace allowed). Omitted end tags come
//! back written out, `<br/>` comes back as `<br>`, and a self-closed
//! non-void element such as `<path/>` comes back with an end tag.

mod prepare;

use maud::Markup;
use prepare::StartTag;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("HTML parse error in {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("Generated markup did not produce an element: {0}")]
    EmptyMarkup(String),
}

/// A parsed HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// The doctype declaration as written, e.g. `<!DOCTYPE html>`.
    pub doctype: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Raw (entity-encoded) text.
    Text(String),
}

/// An element with ordered attributes.
///
/// `class` is an ordinary attribute in storage but is treated as an ordered
/// list of tokens by [`Element::classes`] and [`Element::add_class`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a complete document (template source).
///
/// `origin` names the source in error messages (usually a file path).
pub fn parse_document(source: &str, origin: &str) -> Result<Document, DomError> {
    let (doctype, rest) = split_doctype(source);
    Ok(Document {
        doctype,
        children: parse_nodes(rest, origin)?,
    })
}

/// Parse a content fragment into the nodes to splice into a slot.
///
/// Fragments are usually bare snippets. When a fragment is a full document,
/// the children of its `<body>` are used instead of the whole tree.
pub fn parse_fragment(source: &str, origin: &str) -> Result<Vec<Node>, DomError> {
    let mut doc = parse_document(source, origin)?;
    match doc.first_by_tag_mut("body") {
        Some(body) => Ok(std::mem::take(&mut body.children)),
        None => Ok(doc.children),
    }
}

/// Parse maud-generated markup that must contain exactly one root element.
pub fn element_from_markup(markup: Markup) -> Result<Element, DomError> {
    let html = markup.into_string();
    parse_nodes(&html, "generated markup")?
        .into_iter()
        .find_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
        .ok_or(DomError::EmptyMarkup(html))
}

fn split_doctype(source: &str) -> (Option<String>, &str) {
    let trimmed = source.trim_start();
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
    if is_doctype && let Some(end) = trimmed.find('>') {
        return (Some(trimmed[..=end].to_string()), &trimmed[end + 1..]);
    }
    (None, source)
}

fn parse_nodes(source: &str, origin: &str) -> Result<Vec<Node>, DomError> {
    let prepared = prepare::prepare(source, origin)?;
    let dom = tl::parse(&prepared.markup, tl::ParserOptions::default()).map_err(|e| {
        DomError::Parse {
            origin: origin.to_string(),
            message: format!("{e:?}"),
        }
    })?;
    let parser = dom.parser();
    let mut tags = prepared.tags.into_iter();
    let mut nodes = Vec::new();
    for handle in dom.children() {
        if let Some(node) = convert_node(*handle, parser, &mut tags, origin)? {
            nodes.push(node);
        }
    }
    match tags.next() {
        None => Ok(nodes),
        Some(left) => Err(out_of_step(origin, &left.name)),
    }
}

/// Rebuild one `tl` node, taking its name, attributes and raw text from the
/// next start tag recorded by the lexical pass.
fn convert_node(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    tags: &mut std::vec::IntoIter<StartTag>,
    origin: &str,
) -> Result<Option<Node>, DomError> {
    let Some(node) = handle.get(parser) else {
        return Ok(None);
    };
    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str();
            let start = tags
                .next()
                .filter(|start| start.name == name)
                .ok_or_else(|| out_of_step(origin, &name))?;
            let mut children = Vec::new();
            match start.raw_text {
                Some(text) if !text.is_empty() => children.push(Node::Text(text)),
                Some(_) => {}
                None => {
                    for child in tag.children().top().iter() {
                        if let Some(node) = convert_node(*child, parser, tags, origin)? {
                            children.push(node);
                        }
                    }
                }
            }
            Ok(Some(Node::Element(Element {
                tag: start.name,
                attrs: start.attrs,
                children,
            })))
        }
        tl::Node::Raw(bytes) => Ok(Some(Node::Text(bytes.as_utf8_str().into_owned()))),
        tl::Node::Comment(_) => Ok(None),
    }
}

fn out_of_step(origin: &str, tag: &str) -> DomError {
    DomError::Parse {
        origin: origin.to_string(),
        message: format!("element tree out of step with the source at <{tag}>"),
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Document {
    /// Serialize the document. Deterministic for a given tree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str(doctype);
        }
        for node in &self.children {
            write_node(&mut out, node);
        }
        out
    }
}

impl Element {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(text) => out.push_str(text),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            let quote = if value.contains('"') && !value.contains('\'') {
                '\''
            } else {
                '"'
            };
            out.push('=');
            out.push(quote);
            out.push_str(value);
            out.push(quote);
        }
    }
    out.push('>');
    if is_void_element(&el.tag) {
        return;
    }
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Elements that never have children or an end tag.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Escape text for use in a text node or a double-quoted attribute value.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

// ============================================================================
// Element API
// ============================================================================

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Raw attribute value. Valueless attributes report `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Set a raw attribute value, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Append a class token. Existing tokens are kept as they are.
    pub fn add_class(&mut self, token: &str) {
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {token}"),
            _ => token.to_string(),
        };
        self.set_attr("class", joined);
    }

    /// Rewrite every class token with `f`, preserving token order.
    pub fn map_classes(&mut self, f: impl Fn(&str) -> String) {
        if self.attr("class").is_none() {
            return;
        }
        let rewritten: Vec<String> = self.classes().map(f).collect();
        self.set_attr("class", rewritten.join(" "));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Concatenated raw text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// The raw text node of this element when it holds exactly one, either as
    /// its only child or through a chain of only children
    /// (`<span><b>text</b></span>`). Wrapper elements are left in place.
    pub fn sole_text_mut(&mut self) -> Option<&mut String> {
        match self.children.as_mut_slice() {
            [Node::Text(text)] => Some(text),
            [Node::Element(only)] => only.sole_text_mut(),
            _ => None,
        }
    }

    /// Replace all children with one raw text node.
    pub fn set_text(&mut self, raw: impl Into<String>) {
        self.children = vec![Node::Text(raw.into())];
    }

    /// First descendant carrying the given class token, in document order.
    pub fn descendant_with_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        find_mut(&mut self.children, &|el| el.classes().any(|c| c == class))
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

// ============================================================================
// Tree queries
// ============================================================================

impl Document {
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        find(&self.children, &|el| el.id() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_mut(&mut self.children, &|el| el.id() == Some(id))
    }

    /// First element with the given tag, in document order.
    pub fn first_by_tag(&self, tag: &str) -> Option<&Element> {
        find(&self.children, &|el| el.tag == tag)
    }

    pub fn first_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        find_mut(&mut self.children, &|el| el.tag == tag)
    }

    /// Detach the element with the given id (and its subtree) from the tree.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        remove_where(&mut self.children, &|el| el.id() == Some(id))
    }

    /// Visit every element in document order.
    pub fn visit_elements_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        visit_mut(&mut self.children, &mut f);
    }
}

fn find<'a>(nodes: &'a [Node], pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if pred(el) {
                return Some(el);
            }
            if let Some(found) = find(&el.children, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn find_mut<'a>(
    nodes: &'a mut [Node],
    pred: &dyn Fn(&Element) -> bool,
) -> Option<&'a mut Element> {
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if pred(el) {
                return Some(el);
            }
            if let Some(found) = find_mut(&mut el.children, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_where(nodes: &mut Vec<Node>, pred: &dyn Fn(&Element) -> bool) -> Option<Element> {
    if let Some(pos) = nodes
        .iter()
        .position(|node| matches!(node, Node::Element(el) if pred(el)))
        && let Node::Element(el) = nodes.remove(pos)
    {
        return Some(el);
    }
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node
            && let Some(removed) = remove_where(&mut el.children, pred)
        {
            return Some(removed);
        }
    }
    None
}

fn visit_mut(nodes: &mut [Node], f: &mut dyn FnMut(&mut Element)) {
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            f(el);
            visit_mut(&mut el.children, f);
        }
    }
}
