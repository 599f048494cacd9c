//! [§ 6.7 The CSSStyleDeclaration interface](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! The `style` attribute viewed as a property map. Only the declaration list
//! syntax is understood (`prop: value; prop: value`); values are opaque.

use crate::attributes::AttributeStore;
use crate::error::DomResult;
use crate::node::NodeId;
use crate::tree::DomTree;
use crate::value::{Stringify, Value, coerce};

const STYLE: &str = "style";

/// "camel-cased attribute to IDL attribute": `flexDirection` becomes
/// `flex-direction`. Custom properties (`--*`) pass through unchanged.
#[must_use]
pub fn to_kebab_case(key: &str) -> String {
    if key.starts_with("--") {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a declaration list into ordered `(property, value)` pairs.
///
/// Declarations without a colon or with an empty property are skipped. A
/// later declaration of the same property overwrites the earlier value in
/// place.
#[must_use]
pub fn parse_declarations(text: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for declaration in text.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim();
        if property.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        if let Some(existing) = entries.iter_mut().find(|(p, _)| p == property) {
            existing.1 = value;
        } else {
            entries.push((property.to_string(), value));
        }
    }
    entries
}

/// Property-map view over an element's `style` attribute.
#[derive(Debug)]
pub struct Style<'a> {
    attrs: &'a mut AttributeStore,
}

impl<'a> Style<'a> {
    /// View over `attrs`.
    pub const fn new(attrs: &'a mut AttributeStore) -> Self {
        Self { attrs }
    }

    /// [§ 6.7 cssText](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    #[must_use]
    pub fn css_text(&self) -> &str {
        self.attrs.get(STYLE).unwrap_or("")
    }

    /// Replace the attribute verbatim.
    pub fn set_css_text(&mut self, text: impl Into<String>) {
        self.attrs.set(STYLE, text);
    }

    /// Current declarations in attribute order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        parse_declarations(self.css_text())
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// True if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// [§ 6.7 getPropertyValue](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// `key` may be camelCase or kebab-case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let property = to_kebab_case(key);
        self.entries()
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    /// [§ 6.7 setProperty](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// An empty value removes the property. The whole map is written back.
    pub fn set(&mut self, key: &str, value: &str) {
        let property = to_kebab_case(key);
        let mut entries = self.entries();
        let value = value.trim();
        if value.is_empty() {
            entries.retain(|(p, _)| *p != property);
        } else if let Some(existing) = entries.iter_mut().find(|(p, _)| *p == property) {
            value.clone_into(&mut existing.1);
        } else {
            entries.push((property, value.to_string()));
        }
        self.write(&entries);
    }

    /// [`set`](Self::set) with a coerced value; `Null` removes the property.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::TypeConversion`](crate::DomError::TypeConversion)
    /// if `stringify` declines the value.
    pub fn set_value(&mut self, key: &str, value: &Value, stringify: &dyn Stringify) -> DomResult<()> {
        if matches!(value, Value::Null) {
            let _ = self.remove(key);
            return Ok(());
        }
        let value = coerce(stringify, value)?;
        self.set(key, &value);
        Ok(())
    }

    /// [§ 6.7 removeProperty](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    ///
    /// Returns the removed value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let property = to_kebab_case(key);
        let mut entries = self.entries();
        let index = entries.iter().position(|(p, _)| *p == property)?;
        let (_, value) = entries.remove(index);
        self.write(&entries);
        Some(value)
    }

    /// Each non-empty pair becomes ` key: value;`; the result is trimmed.
    fn write(&mut self, entries: &[(String, String)]) {
        let mut text = String::new();
        for (property, value) in entries.iter().filter(|(_, v)| !v.is_empty()) {
            text.push(' ');
            text.push_str(property);
            text.push_str(": ");
            text.push_str(value);
            text.push(';');
        }
        self.attrs.set(STYLE, text.trim());
    }
}

impl DomTree {
    /// Assign an element's inline style from a whole mapping.
    ///
    /// Keys go through [`to_kebab_case`]; pairs with an empty value are
    /// dropped. Pairs are joined with `"; "` and no trailing separator, so
    /// `{two: "three"}` writes `style="two: three"`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::IllegalInvocation`](crate::DomError::IllegalInvocation)
    /// if `id` is not an element.
    pub fn assign_style<K, V>(&mut self, id: NodeId, style: impl IntoIterator<Item = (K, V)>) -> DomResult<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let text = style
            .into_iter()
            .filter(|(_, v)| !v.as_ref().trim().is_empty())
            .map(|(k, v)| format!("{}: {}", to_kebab_case(k.as_ref()), v.as_ref().trim()))
            .collect::<Vec<_>>()
            .join("; ");
        self.element_mut(id, "assign_style")?.attrs.set(STYLE, text);
        Ok(())
    }
}
