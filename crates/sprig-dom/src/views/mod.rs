//! Structured views derived from raw attributes.
//!
//! Each view borrows an element's [`AttributeStore`](crate::AttributeStore)
//! and re-parses the attribute it covers on every read; writes go straight
//! back to the attribute. Nothing is cached, so a view and a direct attribute
//! write can never drift apart.

mod class_list;
mod dataset;
mod style;

pub use class_list::ClassList;
pub use dataset::{Dataset, is_valid_key, to_attribute_name, to_camel_case};
pub use style::{Style, parse_declarations, to_kebab_case};

use crate::error::DomResult;
use crate::node::NodeId;
use crate::tree::DomTree;
use crate::value::{Value, coerce};

impl DomTree {
    /// The `class` token list of element `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// if `id` is not an element.
    pub fn class_list(&mut self, id: NodeId) -> DomResult<ClassList<'_>> {
        Ok(self.element_mut(id, "class_list")?.class_list())
    }

    /// The inline style map of element `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// if `id` is not an element.
    pub fn style(&mut self, id: NodeId) -> DomResult<Style<'_>> {
        Ok(self.element_mut(id, "style")?.style())
    }

    /// The `data-*` map of element `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// if `id` is not an element.
    pub fn dataset(&mut self, id: NodeId) -> DomResult<Dataset<'_>> {
        Ok(self.element_mut(id, "dataset")?.dataset())
    }

    /// Set one inline style property from a value; `Null` or an empty
    /// rendering removes it.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// for non-elements and [`DomError::TypeConversion`](crate::DomError::TypeConversion)
    /// if the value cannot be rendered.
    pub fn set_style_property(&mut self, id: NodeId, key: &str, value: &Value) -> DomResult<()> {
        let text = match value {
            Value::Null => String::new(),
            other => coerce(self.stringifier(), other)?,
        };
        self.style(id)?.set(key, &text);
        Ok(())
    }

    /// Set one dataset entry from a value; `Null` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// for non-elements, [`DomError::InvalidProperty`](crate::DomError::InvalidProperty)
    /// for a bad key and [`DomError::TypeConversion`](crate::DomError::TypeConversion)
    /// if the value cannot be rendered.
    pub fn set_data_property(&mut self, id: NodeId, key: &str, value: &Value) -> DomResult<()> {
        if matches!(value, Value::Null) {
            let _ = self.dataset(id)?.remove(key);
            return Ok(());
        }
        let text = coerce(self.stringifier(), value)?;
        self.dataset(id)?.set(key, text)
    }
}
