//! In-memory document tree with browser-exact markup serialization.
//!
//! This crate provides an arena-based document tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) and serializes it the
//! way [§ 13.3 of the HTML Standard](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//! describes.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A child
//! list may also hold bare scalar [`Value`]s and nested lists; both are
//! flattened when the tree is serialized.
//!
//! Element classes are resolved through an injected [`ElementRegistry`];
//! values that are not strings are rendered through the tree's
//! [`Stringify`] capability.
//!
//! ```
//! use sprig_dom::{DomTree, NodeId};
//!
//! let mut tree = DomTree::new();
//! let span = tree.create_element(&(), "span", None);
//! tree.set_attribute(span, "id", "one").unwrap();
//! tree.assign_style(span, [("two", "three")]).unwrap();
//! let _ = tree.append_child(NodeId::ROOT, span).unwrap();
//!
//! assert_eq!(
//!     tree.outer_html(span).unwrap(),
//!     r#"<span id="one" style="two: three"></span>"#
//! );
//! ```

pub mod attributes;
pub mod error;
pub mod factory;
pub mod namespace;
pub mod node;
pub mod serializer;
pub mod tree;
pub mod value;
pub mod views;

pub use attributes::{Attr, AttributeStore, BOOLEAN_ATTRIBUTES, is_boolean_attribute};
pub use error::{DomError, DomResult};
pub use factory::{BehaviorMap, ElementBehavior, ElementRegistry, NamedBehavior};
pub use namespace::{
    HTML_NAMESPACE, MATHML_NAMESPACE, SVG_NAMESPACE, XLINK_NAMESPACE, XML_NAMESPACE,
    XMLNS_NAMESPACE,
};
pub use node::{Child, DoctypeData, DocumentKind, ElementData, Node, NodeId, NodeKind, NodeType};
pub use serializer::{SerializeOptions, VoidStyle, escape_attribute, escape_text};
pub use tree::{AncestorIterator, DomTree};
pub use value::{DefaultStringify, Stringify, Value, coerce};
pub use views::{ClassList, Dataset, Style};
