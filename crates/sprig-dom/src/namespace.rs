//! Namespace assignment and `xmlns` emission.
//!
//! [§ 1.7 Namespaces](https://infra.spec.whatwg.org/#namespaces)
//!
//! Both decisions are pure functions of their inputs so the factory and the
//! serializer can share them without touching the tree.

use crate::node::DocumentKind;

/// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
/// "The SVG namespace is "http://www.w3.org/2000/svg"."
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// "The MathML namespace is "http://www.w3.org/1998/Math/MathML"."
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
/// "The XLink namespace is "http://www.w3.org/1999/xlink"."
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
/// "The XML namespace is "http://www.w3.org/XML/1998/namespace"."
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
/// "The XMLNS namespace is "http://www.w3.org/2000/xmlns/"."
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Which factory path an element created without an explicit namespace
/// takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPath {
    /// Generic HTML-flavored creation; the element is placed in the HTML
    /// namespace.
    Html,
    /// SVG-specific creation; the element is placed in the SVG namespace.
    Svg,
}

impl CreationPath {
    /// Namespace assigned to elements created through this path.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Html => HTML_NAMESPACE,
            Self::Svg => SVG_NAMESPACE,
        }
    }
}

/// Route an un-namespaced creation request: the tag `svg` goes through the
/// SVG path, every other tag through the HTML path.
#[must_use]
pub fn creation_path_for(local_name: &str) -> CreationPath {
    if local_name == "svg" {
        CreationPath::Svg
    } else {
        CreationPath::Html
    }
}

/// Inputs to the `xmlns` emission decision for one element.
#[derive(Debug, Clone, Copy)]
pub struct XmlnsContext<'a> {
    /// Kind of the document that owns the element.
    pub document: DocumentKind,
    /// True if the element's root is the document.
    pub connected: bool,
    /// The element's namespace.
    pub namespace: Option<&'a str>,
    /// Namespace of the element's parent, if the parent is an element.
    pub parent_namespace: Option<&'a str>,
    /// True if the element already carries an explicit `xmlns` attribute.
    pub has_xmlns_attribute: bool,
    /// True if the element is the node the serializer was called on.
    pub is_serialization_root: bool,
}

/// Decide whether `xmlns="<namespace>"` is emitted for an element.
///
/// Returns the namespace to emit, or `None`. Markup connected to an HTML
/// document never carries `xmlns`, matching what a browser prints for inline
/// SVG or MathML. A detached subtree of an HTML document declares every
/// namespace except the HTML one, which is implied.
#[must_use]
pub fn xmlns_to_emit<'a>(ctx: XmlnsContext<'a>) -> Option<&'a str> {
    if ctx.has_xmlns_attribute {
        return None;
    }
    let namespace = ctx.namespace?;
    if ctx.document == DocumentKind::Html && (ctx.connected || namespace == HTML_NAMESPACE) {
        return None;
    }
    let differs_from_parent = ctx.parent_namespace != Some(namespace);
    (ctx.is_serialization_root || differs_from_parent).then_some(namespace)
}
