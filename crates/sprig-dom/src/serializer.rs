//! Markup serialization (innerHTML / outerHTML).
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Output matches what a browser prints for the same tree:
//! - text escapes `&`, `<`, `>` and U+00A0; attribute values also escape `"`
//! - comments are emitted verbatim (their data is trusted)
//! - children of `script` / `style` and `RawText` nodes are never escaped
//! - void elements get no end tag, and may not have children
//! - `DocumentFragment` entries and nested lists are flattened in place

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{DomError, DomResult};
use crate::namespace::{HTML_NAMESPACE, XmlnsContext, xmlns_to_emit};
use crate::node::{Child, ElementData, NodeId, NodeType};
use crate::tree::DomTree;
use crate::value::coerce;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr". `param` is kept for the browsers that still list it.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are serialized without escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Returns true if `tag` is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Returns true if `tag` is a raw text element.
#[must_use]
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// How void elements are closed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VoidStyle {
    /// `<br>`, as `outerHTML` prints it.
    #[default]
    Html,
    /// `<br />`, as an XML serializer prints it.
    Xml,
}

/// Serializer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// How void elements are closed.
    pub void_style: VoidStyle,
}

impl SerializeOptions {
    /// Options that close void elements XML-style.
    #[must_use]
    pub const fn xml() -> Self {
        Self {
            void_style: VoidStyle::Xml,
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Text mode: replace `&`, U+00A0, `<` and `>`.
pub fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Attribute mode: the text escape set plus `"`.
pub fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// One serialization call over a tree.
struct Serializer<'a> {
    tree: &'a DomTree,
    options: SerializeOptions,
    /// The node the call started from; it always gets its `xmlns`.
    root: NodeId,
}

impl Serializer<'_> {
    fn serialize_node(&self, id: NodeId, output: &mut String, raw: bool) -> DomResult<()> {
        let Some(node) = self.tree.get(id) else {
            return Ok(());
        };

        match &node.node_type {
            NodeType::Document(_) | NodeType::DocumentFragment => {
                self.serialize_children(node.children(), output, false)?;
            }
            NodeType::Element(data) => self.serialize_element(id, data, output)?,
            NodeType::Text(text) => {
                if raw {
                    output.push_str(text);
                } else {
                    escape_text(text, output);
                }
            }
            NodeType::RawText(text) => output.push_str(text),
            NodeType::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeType::DocumentType(doctype) => {
                output.push_str("<!doctype ");
                output.push_str(&doctype.name);
                output.push('>');
            }
        }
        Ok(())
    }

    fn serialize_children(&self, children: &[Child], output: &mut String, raw: bool) -> DomResult<()> {
        for child in children {
            match child {
                Child::Node(id) => self.serialize_node(*id, output, raw)?,
                Child::Value(value) => {
                    let text = coerce(self.tree.stringifier(), value)?;
                    if raw {
                        output.push_str(&text);
                    } else {
                        escape_text(&text, output);
                    }
                }
                Child::List(items) => self.serialize_children(items, output, raw)?,
            }
        }
        Ok(())
    }

    fn serialize_element(&self, id: NodeId, data: &ElementData, output: &mut String) -> DomResult<()> {
        let tag = data.local_name().ok_or(DomError::MissingLocalName)?;

        output.push('<');
        output.push_str(tag);
        self.serialize_attribute_prefix(id, data, tag, output);
        output.push_str(&data.attrs.to_string());

        let children = self.tree.children(id);
        if data.is_void() {
            if !children.is_empty() {
                return Err(DomError::VoidElementChildren {
                    tag: tag.to_string(),
                });
            }
            match self.options.void_style {
                VoidStyle::Html => output.push('>'),
                VoidStyle::Xml => output.push_str(" />"),
            }
            return Ok(());
        }

        output.push('>');
        let raw = data.is_raw_text()
            && data
                .namespace
                .as_deref()
                .is_none_or(|ns| ns == HTML_NAMESPACE);
        self.serialize_children(children, output, raw)?;
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
        Ok(())
    }

    /// `is="…"` for customized built-ins, then `xmlns="…"` when required.
    fn serialize_attribute_prefix(&self, id: NodeId, data: &ElementData, tag: &str, output: &mut String) {
        if let Some(custom) = data.custom_name.as_deref()
            && custom != tag
            && !data.attrs.has("is")
        {
            output.push_str(" is=\"");
            escape_attribute(custom, output);
            output.push('"');
        }

        let parent_namespace = self
            .tree
            .parent(id)
            .and_then(|parent| self.tree.as_element(parent))
            .and_then(|parent| parent.namespace.as_deref());
        let context = XmlnsContext {
            document: self.tree.document_kind(),
            connected: self.tree.is_connected(id),
            namespace: data.namespace.as_deref(),
            parent_namespace,
            has_xmlns_attribute: data.attrs.has("xmlns"),
            is_serialization_root: id == self.root,
        };
        if let Some(namespace) = xmlns_to_emit(context) {
            output.push_str(" xmlns=\"");
            escape_attribute(namespace, output);
            output.push('"');
        }
    }
}

impl DomTree {
    /// [§ 3.5.6 outerHTML](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-outerhtml)
    ///
    /// Serializes the node itself and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingLocalName`], [`DomError::VoidElementChildren`]
    /// or [`DomError::TypeConversion`] from anywhere in the subtree.
    pub fn outer_html(&self, id: NodeId) -> DomResult<String> {
        self.outer_html_with(id, SerializeOptions::default())
    }

    /// [`outer_html`](Self::outer_html) with explicit options.
    ///
    /// # Errors
    ///
    /// See [`outer_html`](Self::outer_html).
    pub fn outer_html_with(&self, id: NodeId, options: SerializeOptions) -> DomResult<String> {
        let serializer = Serializer {
            tree: self,
            options,
            root: id,
        };
        let mut output = String::new();
        serializer.serialize_node(id, &mut output, false)?;
        Ok(output)
    }

    /// [§ 3.5.2 innerHTML](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml)
    ///
    /// Serializes the node's children only.
    ///
    /// # Errors
    ///
    /// See [`outer_html`](Self::outer_html).
    pub fn inner_html(&self, id: NodeId) -> DomResult<String> {
        self.inner_html_with(id, SerializeOptions::default())
    }

    /// [`inner_html`](Self::inner_html) with explicit options.
    ///
    /// # Errors
    ///
    /// See [`outer_html`](Self::outer_html).
    pub fn inner_html_with(&self, id: NodeId, options: SerializeOptions) -> DomResult<String> {
        let serializer = Serializer {
            tree: self,
            options,
            root: id,
        };
        let raw = self
            .as_element(id)
            .is_some_and(|data| {
                data.is_raw_text()
                    && data
                        .namespace
                        .as_deref()
                        .is_none_or(|ns| ns == HTML_NAMESPACE)
            });
        let mut output = String::new();
        serializer.serialize_children(self.children(id), &mut output, raw)?;
        Ok(output)
    }

    /// Serializes the whole document: doctype, then the document element.
    ///
    /// # Errors
    ///
    /// See [`outer_html`](Self::outer_html).
    pub fn to_markup(&self) -> DomResult<String> {
        self.outer_html(NodeId::ROOT)
    }
}
