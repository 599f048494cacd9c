//! Arena-based DOM tree and its mutation algebra.
//!
//! [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
//!
//! Every mutation keeps one invariant: a node id appears in at most one child
//! list, and that list belongs to the node's `parent`. Inserting a node that is
//! already attached elsewhere detaches it first (a move, never a copy).
//!
//! Deviations from the standard, kept on purpose:
//! - appending a `DocumentFragment` inserts the fragment itself as one entry;
//!   the serializer flattens it;
//! - scalars and nested lists are valid child entries;
//! - `remove_child` with a node that is not a child returns it unchanged.
//!
//! Cycles (inserting a node into its own subtree) are not detected.

use std::collections::HashSet;
use std::rc::Rc;

use sprig_common::warning::warn_once;

use crate::error::{DomError, DomResult};
use crate::node::{Child, DoctypeData, DocumentKind, ElementData, Node, NodeId, NodeKind, NodeType};
use crate::value::{DefaultStringify, Stringify, Value, coerce};

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes, attached or not, are stored in one vector and addressed by
/// [`NodeId`]. The Document node is always at [`NodeId::ROOT`]; its kind is the
/// owning-document context for every node of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// Renders non-string values handed to attribute and data setters.
    stringify: Rc<dyn Stringify>,
}

impl DomTree {
    /// Create a new tree holding an empty HTML document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(DocumentKind::Html)
    }

    /// Create a new tree holding an empty document of the given kind.
    #[must_use]
    pub fn with_kind(kind: DocumentKind) -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Document(kind))],
            stringify: Rc::new(DefaultStringify),
        }
    }

    /// Replace the value renderer used for coercion.
    #[must_use]
    pub fn with_stringifier(mut self, stringify: Rc<dyn Stringify>) -> Self {
        self.stringify = stringify;
        self
    }

    /// The value renderer used for coercion.
    #[must_use]
    pub fn stringifier(&self) -> &dyn Stringify {
        &*self.stringify
    }

    /// Kind of the document at the root.
    #[must_use]
    pub fn document_kind(&self) -> DocumentKind {
        match self.nodes[NodeId::ROOT.0].node_type {
            NodeType::Document(kind) => kind,
            _ => DocumentKind::default(),
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (it always holds at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// The node's kind tag.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    /// Show form of a node, as used in error messages.
    #[must_use]
    pub fn describe(&self, id: NodeId) -> String {
        self.node(id).node_type.show_form()
    }

    // ===== Node creation =====

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(data.into()))
    }

    /// Create a Text node from any value the stringifier accepts.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::TypeConversion`] if the value cannot be rendered.
    pub fn create_text_value(&mut self, value: &Value) -> DomResult<NodeId> {
        let data = coerce(self.stringifier(), value)?;
        Ok(self.create_text(data))
    }

    /// [§ 4.5 createComment](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Comment(data.into()))
    }

    /// Create character data that is serialized without escaping.
    pub fn create_raw_text(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeType::RawText(data.into()))
    }

    /// [§ 4.5 createDocumentFragment](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeType::DocumentFragment)
    }

    /// Create a doctype with only a name.
    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.create_doctype_with_ids(name, "", "")
    }

    /// [§ 4.5.1 createDocumentType](https://dom.spec.whatwg.org/#dom-domimplementation-createdocumenttype)
    ///
    /// Public and system identifiers are stored but never serialized.
    pub fn create_doctype_with_ids(
        &mut self,
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> NodeId {
        let doctype = DoctypeData {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        };
        if !doctype.public_id.is_empty() || !doctype.system_id.is_empty() {
            warn_once(
                "DOM",
                "doctype public/system identifiers are kept but not serialized",
            );
        }
        self.alloc(NodeType::DocumentType(doctype))
    }

    // ===== Queries =====

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all child entries of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[Child] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Node children only, skipping scalar and list entries.
    #[must_use]
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).iter().filter_map(Child::as_node).collect()
    }

    /// Get the first child entry of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<&Child> {
        self.children(id).first()
    }

    /// Get the last child entry of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<&Child> {
        self.children(id).last()
    }

    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = position_of(self.children(parent), id)?;
        Some((parent, index))
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    ///
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    ///
    /// Found by scanning the parent's child list.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<&Child> {
        let (parent, index) = self.index_in_parent(id)?;
        let index = index.checked_sub(1)?;
        self.children(parent).get(index)
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    ///
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<&Child> {
        let (parent, index) = self.index_in_parent(id)?;
        self.children(parent).get(index + 1)
    }

    /// [§ 4.4 getRootNode](https://dom.spec.whatwg.org/#dom-node-getrootnode)
    ///
    /// Follows parent links until none remain.
    #[must_use]
    pub fn get_root_node(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// [§ 4.4 isConnected](https://dom.spec.whatwg.org/#dom-node-isconnected)
    ///
    /// A node is connected iff its root is a Document.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.kind(self.get_root_node(id)) == NodeKind::Document
    }

    /// [§ 4.4 ownerDocument](https://dom.spec.whatwg.org/#dom-node-ownerdocument)
    ///
    /// Every node of the arena is owned by the root document, except the
    /// document itself.
    #[must_use]
    pub fn owner_document(&self, id: NodeId) -> Option<NodeId> {
        (id != NodeId::ROOT).then_some(NodeId::ROOT)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// [§ 4.4 contains](https://dom.spec.whatwg.org/#dom-node-contains)
    ///
    /// "an inclusive descendant of this"
    #[must_use]
    pub fn contains(&self, node: NodeId, other: NodeId) -> bool {
        node == other || self.is_descendant_of(other, node)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Element data, or an error naming `method` if `id` is not an element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] for non-element nodes.
    pub fn element(&self, id: NodeId, method: &'static str) -> DomResult<&ElementData> {
        self.as_element(id).ok_or_else(|| DomError::IllegalInvocation {
            node: self.describe(id),
            method,
        })
    }

    /// Mutable element data, or an error naming `method`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] for non-element nodes.
    pub fn element_mut(&mut self, id: NodeId, method: &'static str) -> DomResult<&mut ElementData> {
        let node = self.describe(id);
        self.as_element_mut(id)
            .ok_or(DomError::IllegalInvocation { node, method })
    }

    // ===== Mutation =====

    fn ensure_container(&self, id: NodeId, method: &'static str) -> DomResult<()> {
        if self.kind(id).is_leaf() {
            return Err(DomError::IllegalInvocation {
                node: self.describe(id),
                method,
            });
        }
        Ok(())
    }

    fn missing_child(&self, parent: NodeId, child: NodeId) -> DomError {
        DomError::MissingChild {
            parent: self.describe(parent),
            child: self.describe(child),
        }
    }

    /// Unlink `id` from its parent's child list and clear its parent.
    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            let _ = remove_entry(&mut self.node_mut(parent).children, id);
        }
    }

    /// Detach every node referenced by `entry` from its current parent.
    fn detach_entry(&mut self, entry: &Child) {
        match entry {
            Child::Node(id) => self.detach(*id),
            Child::List(items) => {
                for item in items {
                    self.detach_entry(item);
                }
            }
            Child::Value(_) => {}
        }
    }

    /// Point every node referenced by `entry` at `parent` (`None` releases).
    fn set_entry_parent(&mut self, entry: &Child, parent: Option<NodeId>) {
        match entry {
            Child::Node(id) => self.node_mut(*id).parent = parent,
            Child::List(items) => {
                for item in items {
                    self.set_entry_parent(item, parent);
                }
            }
            Child::Value(_) => {}
        }
    }

    /// Adopt `items` into `parent` and splice them in at `anchor`.
    ///
    /// A node listed more than once keeps only its last occurrence. Detaching
    /// may shift `parent`'s child list, so the anchor is located only after
    /// every item is detached. An anchor inside a nested list splices into
    /// that list.
    fn splice_entries(&mut self, parent: NodeId, items: Vec<Child>, anchor: Anchor) {
        let items = dedupe_nodes(items);
        for item in &items {
            self.detach_entry(item);
            self.set_entry_parent(item, Some(parent));
        }
        let children = &mut self.node_mut(parent).children;
        let items = match anchor {
            Anchor::Start => {
                let _ = children.splice(0..0, items);
                return;
            }
            Anchor::End => items,
            Anchor::Before(node) => match splice_next_to(children, node, 0, items) {
                Ok(()) => return,
                Err(items) => items,
            },
            Anchor::After(node) => match splice_next_to(children, node, 1, items) {
                Ok(()) => return,
                Err(items) => items,
            },
        };
        children.extend(items);
    }

    /// [§ 4.4 appendChild](https://dom.spec.whatwg.org/#dom-node-appendchild)
    ///
    /// Moves `child` to the end of `parent`'s children.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `parent` cannot have children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.ensure_container(parent, "append_child")?;
        self.detach(child);
        self.node_mut(parent).children.push(Child::Node(child));
        self.node_mut(child).parent = Some(parent);
        Ok(child)
    }

    /// [§ 4.4 insertBefore](https://dom.spec.whatwg.org/#dom-node-insertbefore)
    ///
    /// A `reference` of `None` appends. Inserting a node before itself leaves
    /// the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingChild`] if `reference` is not a child of
    /// `parent`, [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, node);
        };
        self.ensure_container(parent, "insert_before")?;
        if position_of(self.children(parent), reference).is_none() {
            return Err(self.missing_child(parent, reference));
        }
        if node == reference {
            return Ok(node);
        }
        self.detach(node);
        // The reference may have shifted left if `node` preceded it.
        let index = position_of(self.children(parent), reference)
            .ok_or_else(|| self.missing_child(parent, reference))?;
        self.node_mut(parent).children.insert(index, Child::Node(node));
        self.node_mut(node).parent = Some(parent);
        Ok(node)
    }

    /// [§ 4.4 replaceChild](https://dom.spec.whatwg.org/#dom-node-replacechild)
    ///
    /// Puts `next` in the slot held by `prev` and returns `prev`, now detached.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingChild`] if `prev` is not a child of
    /// `parent`, [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn replace_child(&mut self, parent: NodeId, next: NodeId, prev: NodeId) -> DomResult<NodeId> {
        self.ensure_container(parent, "replace_child")?;
        if next == prev {
            return Ok(prev);
        }
        if position_of(self.children(parent), prev).is_none() {
            return Err(self.missing_child(parent, prev));
        }
        self.detach(next);
        let index = position_of(self.children(parent), prev)
            .ok_or_else(|| self.missing_child(parent, prev))?;
        self.node_mut(parent).children[index] = Child::Node(next);
        self.node_mut(prev).parent = None;
        self.node_mut(next).parent = Some(parent);
        Ok(prev)
    }

    /// [§ 4.4 removeChild](https://dom.spec.whatwg.org/#dom-node-removechild)
    ///
    /// A `child` that is not among `parent`'s children is returned unchanged
    /// rather than raising.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.ensure_container(parent, "remove_child")?;
        if remove_entry(&mut self.node_mut(parent).children, child) {
            self.node_mut(child).parent = None;
        }
        Ok(child)
    }

    /// [§ 4.2.8 ChildNode remove](https://dom.spec.whatwg.org/#dom-childnode-remove)
    ///
    /// Detaches `node` from its parent, if any.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// [§ 4.2.6 ParentNode prepend](https://dom.spec.whatwg.org/#dom-parentnode-prepend)
    ///
    /// Inserts `items` before the first child, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn prepend(&mut self, parent: NodeId, items: impl IntoIterator<Item = Child>) -> DomResult<()> {
        self.ensure_container(parent, "prepend")?;
        self.splice_entries(parent, items.into_iter().collect(), Anchor::Start);
        Ok(())
    }

    /// [§ 4.2.6 ParentNode append](https://dom.spec.whatwg.org/#dom-parentnode-append)
    ///
    /// Appends `items` after the last child. Scalars are stored as-is.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn append(&mut self, parent: NodeId, items: impl IntoIterator<Item = Child>) -> DomResult<()> {
        self.ensure_container(parent, "append")?;
        self.splice_entries(parent, items.into_iter().collect(), Anchor::End);
        Ok(())
    }

    /// [§ 4.2.8 ChildNode before](https://dom.spec.whatwg.org/#dom-childnode-before)
    ///
    /// Inserts `items` just before `node`. Does nothing if `node` has no
    /// parent; `node` itself is skipped if listed among `items`.
    pub fn before(&mut self, node: NodeId, items: impl IntoIterator<Item = Child>) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let items = without_node(items, node);
        self.splice_entries(parent, items, Anchor::Before(node));
    }

    /// [§ 4.2.8 ChildNode after](https://dom.spec.whatwg.org/#dom-childnode-after)
    ///
    /// Inserts `items` just after `node`. Does nothing if `node` has no
    /// parent; `node` itself is skipped if listed among `items`.
    pub fn after(&mut self, node: NodeId, items: impl IntoIterator<Item = Child>) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let items = without_node(items, node);
        self.splice_entries(parent, items, Anchor::After(node));
    }

    /// [§ 4.2.8 ChildNode replaceWith](https://dom.spec.whatwg.org/#dom-childnode-replacewith)
    ///
    /// Replaces `node` with `items` and detaches it. Does nothing if `node`
    /// has no parent.
    pub fn replace_with(&mut self, node: NodeId, items: impl IntoIterator<Item = Child>) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let items = without_node(items, node);
        self.splice_entries(parent, items, Anchor::After(node));
        self.detach(node);
    }

    /// [§ 4.2.6 ParentNode replaceChildren](https://dom.spec.whatwg.org/#dom-parentnode-replacechildren)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `parent` is a leaf.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        items: impl IntoIterator<Item = Child>,
    ) -> DomResult<()> {
        self.ensure_container(parent, "replace_children")?;
        let items: Vec<Child> = items.into_iter().collect();
        for item in &items {
            self.detach_entry(item);
        }
        self.clear_children(parent);
        self.splice_entries(parent, items, Anchor::End);
        Ok(())
    }

    /// Remove every child entry of `parent`, clearing their parent links.
    fn clear_children(&mut self, parent: NodeId) {
        let old = std::mem::take(&mut self.node_mut(parent).children);
        for entry in &old {
            self.set_entry_parent(entry, None);
        }
    }

    /// Move all children of `from` to the end of `to`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `to` is a leaf.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) -> DomResult<()> {
        self.ensure_container(to, "move_children")?;
        if from == to {
            return Ok(());
        }
        let moved = std::mem::take(&mut self.node_mut(from).children);
        for entry in &moved {
            self.set_entry_parent(entry, None);
        }
        self.splice_entries(to, moved, Anchor::End);
        Ok(())
    }

    // ===== Document =====

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.first_child_of_kind(NodeId::ROOT, NodeKind::Element)
    }

    /// [§ 4.5 doctype](https://dom.spec.whatwg.org/#dom-document-doctype)
    ///
    /// "The doctype getter steps are to return the child of this that is a
    /// doctype; otherwise null."
    #[must_use]
    pub fn doctype(&self) -> Option<NodeId> {
        self.first_child_of_kind(NodeId::ROOT, NodeKind::DocumentType)
    }

    fn first_child_of_kind(&self, parent: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .filter_map(Child::as_node)
            .find(|&id| self.kind(id) == kind)
    }

    /// Install `doctype` as the document's doctype, ahead of every other
    /// child. The previous doctype, if any, is detached and returned.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidProperty`] if `doctype` is not a doctype.
    pub fn set_doctype(&mut self, doctype: NodeId) -> DomResult<Option<NodeId>> {
        if self.kind(doctype) != NodeKind::DocumentType {
            return Err(DomError::InvalidProperty {
                name: "doctype".to_string(),
                expected: "a doctype node",
                found: self.describe(doctype),
            });
        }
        self.detach(doctype);
        let previous = self.doctype();
        if let Some(previous) = previous {
            self.detach(previous);
        }
        self.node_mut(NodeId::ROOT).children.insert(0, Child::Node(doctype));
        self.node_mut(doctype).parent = Some(NodeId::ROOT);
        Ok(previous)
    }

    /// Install `element` as the document element. The previous document
    /// element, if any, is detached and returned.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidProperty`] if `element` is not an element.
    pub fn set_document_element(&mut self, element: NodeId) -> DomResult<Option<NodeId>> {
        if self.kind(element) != NodeKind::Element {
            return Err(DomError::InvalidProperty {
                name: "documentElement".to_string(),
                expected: "an element",
                found: self.describe(element),
            });
        }
        self.detach(element);
        let previous = self.document_element();
        if let Some(previous) = previous {
            self.detach(previous);
        }
        let _ = self.append_child(NodeId::ROOT, element)?;
        Ok(previous)
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.document_child_named(&["body", "frameset"])
    }

    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#dom-document-head)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.document_child_named(&["head"])
    }

    fn document_child_named(&self, names: &[&str]) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .filter_map(Child::as_node)
            .find(|&id| {
                self.as_element(id)
                    .and_then(ElementData::local_name)
                    .is_some_and(|tag| names.iter().any(|n| tag.eq_ignore_ascii_case(n)))
            })
    }

    // ===== Character data and text content =====

    /// [§ 4.10 data](https://dom.spec.whatwg.org/#dom-characterdata-data)
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.node_type.character_data())
    }

    /// Replace the payload of a Text, Comment or `RawText` node.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::TypeConversion`] if the value cannot be rendered,
    /// [`DomError::IllegalInvocation`] if `id` is not character data.
    pub fn set_data(&mut self, id: NodeId, value: &Value) -> DomResult<()> {
        let rendered = coerce(self.stringifier(), value)?;
        *self.character_data_mut(id, "set_data")? = rendered;
        Ok(())
    }

    /// [§ 4.10 appendData](https://dom.spec.whatwg.org/#dom-characterdata-appenddata)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not character data.
    pub fn append_data(&mut self, id: NodeId, extra: &str) -> DomResult<()> {
        self.character_data_mut(id, "append_data")?.push_str(extra);
        Ok(())
    }

    fn character_data_mut(&mut self, id: NodeId, method: &'static str) -> DomResult<&mut String> {
        let node = self.describe(id);
        match &mut self.node_mut(id).node_type {
            NodeType::Text(data) | NodeType::Comment(data) | NodeType::RawText(data) => Ok(data),
            _ => Err(DomError::IllegalInvocation { node, method }),
        }
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Character data returns its payload; elements and fragments concatenate
    /// the text of their descendants, including scalar entries the
    /// stringifier accepts; documents and doctypes return the empty string.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let node = self.node(id);
        match &node.node_type {
            NodeType::Text(data) | NodeType::Comment(data) | NodeType::RawText(data) => {
                data.clone()
            }
            NodeType::Document(_) | NodeType::DocumentType(_) => String::new(),
            NodeType::Element(_) | NodeType::DocumentFragment => {
                let mut out = String::new();
                self.collect_text(&node.children, &mut out);
                out
            }
        }
    }

    fn collect_text(&self, entries: &[Child], out: &mut String) {
        for entry in entries {
            match entry {
                Child::Node(id) => match &self.node(*id).node_type {
                    NodeType::Text(data) | NodeType::RawText(data) => out.push_str(data),
                    NodeType::Element(_) | NodeType::DocumentFragment => {
                        self.collect_text(&self.node(*id).children, out);
                    }
                    _ => {}
                },
                Child::Value(value) => {
                    if let Some(text) = self.stringify.render(value) {
                        out.push_str(&text);
                    }
                }
                Child::List(items) => self.collect_text(items, out),
            }
        }
    }

    /// [§ 4.4 textContent setter](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Containers lose all children and gain a single Text node unless `text`
    /// is empty; character data has its payload replaced.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match self.kind(id) {
            NodeKind::Text | NodeKind::Comment | NodeKind::RawText => {
                if let Ok(data) = self.character_data_mut(id, "set_text_content") {
                    text.clone_into(data);
                }
            }
            NodeKind::Document | NodeKind::DocumentType => {}
            NodeKind::Element | NodeKind::DocumentFragment => {
                self.clear_children(id);
                if !text.is_empty() {
                    let text_node = self.create_text(text);
                    self.node_mut(id).children.push(Child::Node(text_node));
                    self.node_mut(text_node).parent = Some(id);
                }
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the top-level entry referring to `id`.
fn position_of(children: &[Child], id: NodeId) -> Option<usize> {
    children.iter().position(|c| c.as_node() == Some(id))
}

/// Remove the entry referring to `id`, searching nested lists too.
fn remove_entry(children: &mut Vec<Child>, id: NodeId) -> bool {
    if let Some(index) = position_of(children, id) {
        let _ = children.remove(index);
        return true;
    }
    children.iter_mut().any(|entry| match entry {
        Child::List(items) => remove_entry(items, id),
        _ => false,
    })
}

/// Where [`DomTree::splice_entries`] inserts its items.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    End,
    Before(NodeId),
    After(NodeId),
}

/// Splice `items` at `offset` from the entry referring to `anchor`,
/// searching nested lists. Hands `items` back if `anchor` is not found.
fn splice_next_to(
    children: &mut Vec<Child>,
    anchor: NodeId,
    offset: usize,
    mut items: Vec<Child>,
) -> Result<(), Vec<Child>> {
    if let Some(index) = position_of(children, anchor) {
        let at = index + offset;
        let _ = children.splice(at..at, items);
        return Ok(());
    }
    for entry in children.iter_mut() {
        if let Child::List(nested) = entry {
            match splice_next_to(nested, anchor, offset, items) {
                Ok(()) => return Ok(()),
                Err(back) => items = back,
            }
        }
    }
    Err(items)
}

/// Drop every node entry that appears again later in `items`, searching
/// nested lists too. Lists left empty are kept.
fn dedupe_nodes(items: Vec<Child>) -> Vec<Child> {
    fn keep_last(items: Vec<Child>, seen: &mut HashSet<NodeId>) -> Vec<Child> {
        let mut kept: Vec<Child> = items
            .into_iter()
            .rev()
            .filter_map(|item| match item {
                Child::Node(id) => seen.insert(id).then_some(Child::Node(id)),
                Child::List(nested) => Some(Child::List(keep_last(nested, seen))),
                Child::Value(_) => Some(item),
            })
            .collect();
        kept.reverse();
        kept
    }
    keep_last(items, &mut HashSet::new())
}

fn without_node(items: impl IntoIterator<Item = Child>, node: NodeId) -> Vec<Child> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Child::Node(id) if id == node => None,
            Child::List(nested) => Some(Child::List(without_node(nested, node))),
            other => Some(other),
        })
        .collect()
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
