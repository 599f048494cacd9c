//! Node data model.
//!
//! [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
//!
//! Nodes live in the [`DomTree`](crate::DomTree) arena and refer to each other
//! through [`NodeId`] indices. Child lists are heterogeneous: besides nodes
//! they may hold raw scalars and nested lists, which the serializer resolves
//! lazily (see [`Child`]).

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::attributes::AttributeStore;
use crate::error::{DomError, DomResult};
use crate::factory::ElementBehavior;
use crate::namespace::HTML_NAMESPACE;
use crate::serializer::{is_raw_text_element, is_void_element};
use crate::value::Value;
use crate::views::{ClassList, Dataset, Style};

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One entry of a node's child list.
///
/// Scalars and nested lists are kept as inserted and only turned into text
/// when serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// A node in the same tree.
    Node(NodeId),
    /// A raw scalar, serialized as escaped text.
    Value(Value),
    /// A nested list, flattened during serialization.
    List(Vec<Child>),
}

impl Child {
    /// The node id if this entry is a node.
    #[must_use]
    pub const fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Self::Value(Value::from(s))
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Self::Value(Value::Str(s))
    }
}

impl From<i64> for Child {
    fn from(i: i64) -> Self {
        Self::Value(Value::Int(i))
    }
}

impl From<f64> for Child {
    fn from(f: f64) -> Self {
        Self::Value(Value::Float(f))
    }
}

impl From<Vec<Self>> for Child {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub(crate) parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub(crate) children: Vec<Child>,
}

impl Node {
    pub(crate) const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The parent node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The child list in order.
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// The node's kind tag.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.node_type.kind()
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// "A document whose type is "html" is known as an HTML document."
    Document(DocumentKind),
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    DocumentType(DoctypeData),
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    DocumentFragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.11 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
    /// Character data emitted verbatim, the way the contents of `script` and
    /// `style` are.
    RawText(String),
}

impl NodeType {
    /// The fieldless kind tag.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document(_) => NodeKind::Document,
            Self::DocumentType(_) => NodeKind::DocumentType,
            Self::DocumentFragment => NodeKind::DocumentFragment,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::RawText(_) => NodeKind::RawText,
        }
    }

    /// Character data payload of Text, Comment and `RawText` nodes.
    #[must_use]
    pub fn character_data(&self) -> Option<&str> {
        match self {
            Self::Text(data) | Self::Comment(data) | Self::RawText(data) => Some(data),
            _ => None,
        }
    }

    /// Short human-readable form used in error messages.
    #[must_use]
    pub fn show_form(&self) -> String {
        match self {
            Self::Element(data) => format!("<{}>", data.local_name().unwrap_or("?")),
            Self::Text(data) => format!("#text {data:?}"),
            Self::DocumentType(doctype) => format!("<!doctype {}>", doctype.name),
            _ => self.kind().to_string(),
        }
    }
}

/// Fieldless node kind tag.
///
/// Displays as the DOM `nodeName` of non-element nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum NodeKind {
    /// An element.
    #[strum(serialize = "#element")]
    Element,
    /// A text node.
    #[strum(serialize = "#text")]
    Text,
    /// A comment.
    #[strum(serialize = "#comment")]
    Comment,
    /// Raw (unescaped) character data.
    #[strum(serialize = "#raw-text")]
    RawText,
    /// A document fragment.
    #[strum(serialize = "#document-fragment")]
    DocumentFragment,
    /// A doctype.
    #[strum(serialize = "#doctype")]
    DocumentType,
    /// A document.
    #[strum(serialize = "#document")]
    Document,
}

impl NodeKind {
    /// [§ 4.10 Interface CharacterData](https://dom.spec.whatwg.org/#interface-characterdata)
    #[must_use]
    pub const fn is_character_data(self) -> bool {
        matches!(self, Self::Text | Self::Comment | Self::RawText)
    }

    /// True for kinds that may never hold children.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        self.is_character_data() || matches!(self, Self::DocumentType)
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-type)
///
/// "Unless stated otherwise, a document is an XML document."
/// Here the default is the HTML document a browser tab starts with.
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
pub enum DocumentKind {
    /// An HTML document; `xmlns` is never serialized.
    #[default]
    Html,
    /// An XML document; `xmlns` follows namespace changes.
    Xml,
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// "name"
    pub name: String,
    /// "public ID" (kept, never serialized)
    pub public_id: String,
    /// "system ID" (kept, never serialized)
    pub system_id: String,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///    custom element definition, is value."
/// - "When an element is created, its local name is always given."
///
/// The local name may be left unassigned by a behavior-driven factory call;
/// it is frozen by the first [`assign_local_name`](Self::assign_local_name).
#[derive(Debug, Clone)]
pub struct ElementData {
    local_name: Option<String>,
    /// "An element's namespace"
    pub namespace: Option<String>,
    /// "An element's is value": the behavioral identity of a customized
    /// built-in element when it differs from the local name.
    pub custom_name: Option<String>,
    /// "An element has an associated attribute list"
    pub attrs: AttributeStore,
    /// Behavior resolved by the factory, if any.
    pub behavior: Option<Rc<dyn ElementBehavior>>,
}

impl ElementData {
    /// Element data with a local name and namespace, no attributes.
    pub fn new(local_name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            local_name: Some(local_name.into()),
            namespace,
            custom_name: None,
            attrs: AttributeStore::new(),
            behavior: None,
        }
    }

    /// Element data whose local name is still to be assigned.
    #[must_use]
    pub const fn unnamed(namespace: Option<String>) -> Self {
        Self {
            local_name: None,
            namespace,
            custom_name: None,
            attrs: AttributeStore::new(),
            behavior: None,
        }
    }

    /// Attach attributes, builder style.
    #[must_use]
    pub fn with_attrs(mut self, attrs: AttributeStore) -> Self {
        self.attrs = attrs;
        self
    }

    /// "An element's local name"
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    /// Assign the local name of an element created without one.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::LocalNameAlreadyAssigned`] if a name is already set.
    pub fn assign_local_name(&mut self, name: impl Into<String>) -> DomResult<()> {
        if let Some(current) = &self.local_name {
            return Err(DomError::LocalNameAlreadyAssigned {
                current: current.clone(),
            });
        }
        self.local_name = Some(name.into());
        Ok(())
    }

    /// [§ 4.9 Element tagName](https://dom.spec.whatwg.org/#dom-element-tagname)
    ///
    /// "If this is in the HTML namespace and its node document is an HTML
    /// document, then set qualifiedName to qualifiedName in ASCII uppercase."
    #[must_use]
    pub fn tag_name(&self) -> Option<String> {
        let name = self.local_name()?;
        if self.namespace.as_deref() == Some(HTML_NAMESPACE) {
            Some(name.to_ascii_uppercase())
        } else {
            Some(name.to_string())
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// The raw `class` attribute, or the empty string.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.attrs.get("class").unwrap_or("")
    }

    /// True if this element is a void element in the HTML namespace sense.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.local_name().is_some_and(is_void_element)
    }

    /// True if this element's text children are serialized verbatim.
    #[must_use]
    pub fn is_raw_text(&self) -> bool {
        self.local_name().is_some_and(is_raw_text_element)
    }

    /// [§ 7.1 classList](https://dom.spec.whatwg.org/#dom-element-classlist)
    pub fn class_list(&mut self) -> ClassList<'_> {
        ClassList::new(&mut self.attrs)
    }

    /// [§ 3.2.6.5 The style attribute](https://html.spec.whatwg.org/multipage/dom.html#the-style-attribute)
    pub fn style(&mut self) -> Style<'_> {
        Style::new(&mut self.attrs)
    }

    /// [§ 3.2.6.6 Embedding custom non-visible data](https://html.spec.whatwg.org/multipage/dom.html#dom-dataset)
    pub fn dataset(&mut self) -> Dataset<'_> {
        Dataset::new(&mut self.attrs)
    }
}
