//! JSON description of a document tree.
//!
//! Objects are tagged by `"type"`; bare JSON scalars and arrays are scalar and
//! list children:
//!
//! ```json
//! {"type": "element", "tag": "p", "attrs": {"id": "intro"},
//!  "children": ["Hello, ", {"type": "element", "tag": "b", "children": ["world"]}, 1]}
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sprig_dom::{Child, DomTree, ElementRegistry, NodeId, Value, coerce};

/// One node of the description.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Blueprint {
    /// An element and its subtree.
    Element(ElementBlueprint),
    /// A Text node; non-string data is rendered by the tree's stringifier.
    Text {
        /// Payload.
        data: Value,
    },
    /// A Comment node.
    Comment {
        /// Payload, emitted verbatim.
        data: String,
    },
    /// A `RawText` node.
    Raw {
        /// Payload, emitted verbatim.
        data: String,
    },
    /// A `DocumentFragment`.
    Fragment {
        /// Entries, flattened on output.
        #[serde(default)]
        children: Vec<Entry>,
    },
    /// A `DocumentType`.
    Doctype {
        /// The doctype name.
        name: String,
        /// Kept on the node, never printed.
        #[serde(default)]
        public_id: String,
        /// Kept on the node, never printed.
        #[serde(default)]
        system_id: String,
    },
    /// The document itself; only valid at the top level.
    Document {
        /// Children of the document node.
        #[serde(default)]
        children: Vec<Entry>,
    },
}

/// Element fields of a [`Blueprint`].
#[derive(Debug, Deserialize)]
pub struct ElementBlueprint {
    /// Local name.
    pub tag: String,
    /// Explicit namespace; omitted means the HTML factory path.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Customized built-in name.
    #[serde(default)]
    pub is: Option<String>,
    /// Attributes in document order, written as properties (boolean
    /// attributes take `true` / `false`).
    #[serde(default)]
    pub attrs: Map<String, JsonValue>,
    /// Class tokens added through the class list.
    #[serde(default)]
    pub class: Vec<String>,
    /// Inline style mapping; keys may be camelCase and `null` values are
    /// skipped.
    #[serde(default)]
    pub style: Map<String, JsonValue>,
    /// Dataset entries keyed by camelCase name.
    #[serde(default)]
    pub dataset: Map<String, JsonValue>,
    /// Child entries.
    #[serde(default)]
    pub children: Vec<Entry>,
}

/// One entry of a child list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// A node.
    Node(Blueprint),
    /// A nested list.
    List(Vec<Entry>),
    /// A bare scalar.
    Scalar(Value),
}

impl Blueprint {
    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Fails if `text` is not a valid description.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid tree description")
    }

    /// Build this description into `tree` and return the top node.
    ///
    /// A `document` blueprint fills the tree's root and returns it.
    ///
    /// # Errors
    ///
    /// Fails on the first value the tree rejects, or on a nested document.
    pub fn build(&self, tree: &mut DomTree, registry: &dyn ElementRegistry) -> Result<NodeId> {
        if let Self::Document { children } = self {
            let entries = build_entries(children, tree, registry)?;
            tree.append(NodeId::ROOT, entries)?;
            return Ok(NodeId::ROOT);
        }
        self.build_node(tree, registry)
    }

    fn build_node(&self, tree: &mut DomTree, registry: &dyn ElementRegistry) -> Result<NodeId> {
        let id = match self {
            Self::Element(element) => element.build(tree, registry)?,
            Self::Text { data } => tree.create_text_value(data)?,
            Self::Comment { data } => tree.create_comment(data.as_str()),
            Self::Raw { data } => tree.create_raw_text(data.as_str()),
            Self::Fragment { children } => {
                let fragment = tree.create_fragment();
                let entries = build_entries(children, tree, registry)?;
                tree.append(fragment, entries)?;
                fragment
            }
            Self::Doctype {
                name,
                public_id,
                system_id,
            } => tree.create_doctype_with_ids(name.as_str(), public_id.as_str(), system_id.as_str()),
            Self::Document { .. } => bail!("a document can only appear at the top level"),
        };
        Ok(id)
    }
}

impl ElementBlueprint {
    fn build(&self, tree: &mut DomTree, registry: &dyn ElementRegistry) -> Result<NodeId> {
        let is = self.is.as_deref();
        let id = match self.namespace.as_deref() {
            Some(namespace) => tree.create_element_ns(registry, Some(namespace), &self.tag, is),
            None => tree.create_element(registry, &self.tag, is),
        };

        for (name, value) in &self.attrs {
            tree.set_property(id, name, &scalar(value)?)
                .with_context(|| format!("attribute '{name}' of <{}>", self.tag))?;
        }
        if !self.class.is_empty() {
            let tokens: Vec<&str> = self.class.iter().map(String::as_str).collect();
            tree.class_list(id)?.add(&tokens);
        }
        if !self.style.is_empty() {
            let mut declarations = Vec::with_capacity(self.style.len());
            for (key, value) in &self.style {
                let value = match scalar(value)? {
                    Value::Null => continue,
                    other => coerce(tree.stringifier(), &other)
                        .with_context(|| format!("style '{key}' of <{}>", self.tag))?,
                };
                declarations.push((key.as_str(), value));
            }
            tree.assign_style(id, declarations)?;
        }
        for (key, value) in &self.dataset {
            tree.set_data_property(id, key, &scalar(value)?)
                .with_context(|| format!("dataset '{key}' of <{}>", self.tag))?;
        }

        let entries = build_entries(&self.children, tree, registry)?;
        tree.append(id, entries)?;
        Ok(id)
    }
}

fn build_entries(
    entries: &[Entry],
    tree: &mut DomTree,
    registry: &dyn ElementRegistry,
) -> Result<Vec<Child>> {
    entries
        .iter()
        .map(|entry| {
            Ok(match entry {
                Entry::Node(blueprint) => Child::Node(blueprint.build_node(tree, registry)?),
                Entry::List(items) => Child::List(build_entries(items, tree, registry)?),
                Entry::Scalar(value) => Child::Value(value.clone()),
            })
        })
        .collect()
}

fn scalar(value: &JsonValue) -> Result<Value> {
    Value::deserialize(value).with_context(|| format!("unsupported value {value}"))
}
