//! Element attribute storage.
//!
//! [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
//!
//! "A NamedNodeMap has an associated element... and attribute list, which is
//! the element's attribute list."
//!
//! Attributes keep insertion order; that order is the serialization order.

use std::fmt;

use serde::Serialize;

use crate::error::{DomError, DomResult};
use crate::node::NodeId;
use crate::serializer::escape_attribute;
use crate::tree::DomTree;
use crate::value::{Stringify, Value, coerce};

/// [§ 2.4.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
///
/// "The presence of a boolean attribute on an element represents the true
/// value, and the absence of the attribute represents the false value."
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Returns true if `name` is on the boolean-attribute allow-list.
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(&name)
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// A single `(name, value)` pair. Names compare exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attr {
    /// "An attribute's local name"
    pub name: String,
    /// "An attribute's value"
    pub value: String,
}

/// Ordered string-to-string attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeStore {
    entries: Vec<Attr>,
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True if an attribute called `name` exists.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|a| a.name == name)
    }

    /// Set `name` to `value`.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            self.entries.push(Attr { name, value });
        }
    }

    /// Set `name` to `value` after coercing it to a string.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::TypeConversion`](crate::DomError::TypeConversion)
    /// if `stringify` declines the value.
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: &Value,
        stringify: &dyn Stringify,
    ) -> DomResult<()> {
        let value = coerce(stringify, value)?;
        self.set(name, value);
        Ok(())
    }

    /// Remove the attribute called `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|a| a.name == name)?;
        Some(self.entries.remove(index).value)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.entries.iter()
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|a| a.name.as_str())
    }
}

impl<'a> IntoIterator for &'a AttributeStore {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

/// Renders ` name="value"` for every attribute in order, skipping entries
/// with an empty name. Values use the attribute escape set.
impl fmt::Display for AttributeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut escaped = String::new();
        for attr in self.entries.iter().filter(|a| !a.name.is_empty()) {
            escaped.clear();
            escape_attribute(&attr.value, &mut escaped);
            write!(f, " {}=\"{escaped}\"", attr.name)?;
        }
        Ok(())
    }
}

impl DomTree {
    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// `None` for missing attributes and for non-element nodes.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|data| data.attrs.get(name))
    }

    /// [§ 4.9 hasAttribute](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id).is_some_and(|data| data.attrs.has(name))
    }

    /// [§ 4.9 getAttributeNames](https://dom.spec.whatwg.org/#dom-element-getattributenames)
    #[must_use]
    pub fn attribute_names(&self, id: NodeId) -> Vec<String> {
        self.as_element(id)
            .map(|data| data.attrs.names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> DomResult<()> {
        self.element_mut(id, "set_attribute")?.attrs.set(name, value);
        Ok(())
    }

    /// `set_attribute` with a value that is coerced to a string first.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::TypeConversion`] if the tree's stringifier declines
    /// the value, or [`DomError::IllegalInvocation`] for non-elements.
    pub fn set_attribute_value(&mut self, id: NodeId, name: &str, value: &Value) -> DomResult<()> {
        let text = coerce(self.stringifier(), value)?;
        self.set_attribute(id, name, text)
    }

    /// [§ 4.9 removeAttribute](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// Returns the removed value.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not an element.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(id, "remove_attribute")?.attrs.remove(name))
    }

    /// [§ 4.9 toggleAttribute](https://dom.spec.whatwg.org/#dom-element-toggleattribute)
    ///
    /// Returns whether the attribute is present afterward.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not an element.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let attrs = &mut self.element_mut(id, "toggle_attribute")?.attrs;
        let present = attrs.has(name);
        let wanted = force.unwrap_or(!present);
        if wanted && !present {
            attrs.set(name, "");
        } else if !wanted && present {
            let _ = attrs.remove(name);
        }
        Ok(wanted)
    }

    /// Property-style attribute write.
    ///
    /// On the boolean allow-list, `true` stores the empty string and `false`
    /// or `Null` removes the attribute; any other value is rejected. Elsewhere
    /// `Null` removes the attribute and other values are coerced.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidProperty`] for a non-boolean value on a
    /// boolean attribute, [`DomError::TypeConversion`] for a value the
    /// stringifier declines, or [`DomError::IllegalInvocation`] for
    /// non-elements.
    pub fn set_property(&mut self, id: NodeId, name: &str, value: &Value) -> DomResult<()> {
        let text = if is_boolean_attribute(name) {
            match value {
                Value::Bool(true) => Some(String::new()),
                Value::Bool(false) | Value::Null => None,
                other => {
                    return Err(DomError::InvalidProperty {
                        name: name.to_string(),
                        expected: "boolean",
                        found: other.describe(),
                    });
                }
            }
        } else if matches!(value, Value::Null) {
            None
        } else {
            Some(coerce(self.stringifier(), value)?)
        };

        let attrs = &mut self.element_mut(id, "set_property")?.attrs;
        match text {
            Some(text) => attrs.set(name, text),
            None => {
                let _ = attrs.remove(name);
            }
        }
        Ok(())
    }

    /// Assign the `id` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not an element.
    pub fn set_id(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        self.set_attribute(id, "id", value)
    }

    /// Assign the raw `class` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`] if `id` is not an element.
    pub fn set_class_name(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        self.set_attribute(id, "class", value)
    }
}
