//! In-memory document tree.
//!
//! Stands in for the browser DOM: renderers look up mount points by id,
//! clear them and append freshly built elements. Text and attribute values
//! are stored raw and escaped only at serialization.

mod html;

pub use html::{escape_attr, escape_text};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Set the `style` attribute.
    #[must_use]
    pub fn with_style(self, style: impl Into<String>) -> Self {
        self.with_attr("style", style)
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.append_text(text);
        self
    }

    /// Append an element child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.append_child(child);
        self
    }

    /// Append several element children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Append an element child in place.
    pub fn append_child(&mut self, child: Self) {
        self.children.push(Node::Element(child));
    }

    /// Append a text child in place.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// The `class` attribute.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Whether the element has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// First descendant (or self) with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Self> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|el| el.find_by_id(id))
    }

    /// Mutable variant of [`Element::find_by_id`].
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(el) => el.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// All descendants with the given tag, in document order.
    #[must_use]
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        collect_by(self, &mut out, &|el| el.tag == tag);
        out
    }

    /// All descendants whose class list contains `class`, in document order.
    #[must_use]
    pub fn descendants_by_class(&self, class: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        collect_by(self, &mut out, &|el| {
            el.class()
                .is_some_and(|list| list.split_whitespace().any(|c| c == class))
        });
        out
    }

    /// Serialize the element and its subtree.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        html::write_element(self, &mut out);
        out
    }

    /// Serialize only the children.
    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            html::write_node(child, &mut out);
        }
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
        }
    }
}

fn collect_by<'a>(element: &'a Element, out: &mut Vec<&'a Element>, pred: &dyn Fn(&Element) -> bool) {
    for child in element.child_elements() {
        if pred(child) {
            out.push(child);
        }
        collect_by(child, out, pred);
    }
}

/// A document with a single `<body>` root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// Create a document from a prepared body element.
    #[must_use]
    pub const fn from_body(body: Element) -> Self {
        Self { body }
    }

    /// The body element.
    #[must_use]
    pub const fn body(&self) -> &Element {
        &self.body
    }

    /// Mutable body element.
    pub const fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    /// Element lookup by id.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    /// Mutable element lookup by id.
    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    /// Serialize the body.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}
