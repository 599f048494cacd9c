//! [§ 3.2.6.6 Embedding custom non-visible data](https://html.spec.whatwg.org/multipage/dom.html#embedding-custom-non-visible-data-with-the-data-*-attributes)
//!
//! `data-*` attributes viewed as a camelCase-keyed map.

use crate::attributes::AttributeStore;
use crate::error::{DomError, DomResult};
use crate::value::{Stringify, Value, coerce};

const PREFIX: &str = "data-";

/// "For each name in list, for each U+002D HYPHEN-MINUS character (-) in the
/// name that is followed by an ASCII lower alpha, remove the U+002D
/// HYPHEN-MINUS character (-) and replace the character that followed it by
/// the same character converted to ASCII uppercase."
///
/// `name` is the part after `data-`.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            let _ = chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// "For each ASCII upper alpha in name, insert a U+002D HYPHEN-MINUS
/// character (-) before the character and replace the character with the
/// same character converted to ASCII lowercase. Insert the string data- at
/// the front of name."
#[must_use]
pub fn to_attribute_name(key: &str) -> String {
    let mut out = String::with_capacity(PREFIX.len() + key.len() + 2);
    out.push_str(PREFIX);
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

/// "If name contains a U+002D HYPHEN-MINUS character (-) followed by an
/// ASCII lower alpha, then throw a "SyntaxError" DOMException."
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'-' && pair[1].is_ascii_lowercase())
}

/// Map view over an element's `data-*` attributes.
#[derive(Debug)]
pub struct Dataset<'a> {
    attrs: &'a mut AttributeStore,
}

impl<'a> Dataset<'a> {
    /// View over `attrs`.
    pub const fn new(attrs: &'a mut AttributeStore) -> Self {
        Self { attrs }
    }

    /// Every `data-*` attribute as `(key, value)`, in attribute order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.attrs
            .iter()
            .filter_map(|attr| {
                let name = attr.name.strip_prefix(PREFIX)?;
                Some((to_camel_case(name), attr.value.clone()))
            })
            .collect()
    }

    /// Keys in attribute order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(&to_attribute_name(key))
    }

    /// True if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.has(&to_attribute_name(key))
    }

    /// Write `data-<kebab key>`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidProperty`] if `key` holds a hyphen followed
    /// by a lowercase letter, which no attribute name maps back to.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> DomResult<()> {
        if !is_valid_key(key) {
            return Err(DomError::InvalidProperty {
                name: key.to_string(),
                expected: "a dataset key without '-' before a lowercase letter",
                found: format!("{key:?}"),
            });
        }
        self.attrs.set(to_attribute_name(key), value);
        Ok(())
    }

    /// [`set`](Self::set) with a coerced value; `Null` removes the key.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidProperty`] for a bad key and
    /// [`DomError::TypeConversion`] if `stringify` declines the value.
    pub fn set_value(&mut self, key: &str, value: &Value, stringify: &dyn Stringify) -> DomResult<()> {
        if matches!(value, Value::Null) {
            let _ = self.remove(key);
            return Ok(());
        }
        let value = coerce(stringify, value)?;
        self.set(key, value)
    }

    /// Remove `data-<kebab key>`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attrs.remove(&to_attribute_name(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_mapping() {
        assert_eq!(to_camel_case("foo-bar"), "fooBar");
        assert_eq!(to_camel_case("-foo"), "Foo");
        assert_eq!(to_camel_case("a-1"), "a-1");
        assert_eq!(to_attribute_name("fooBar"), "data-foo-bar");
        assert_eq!(to_attribute_name("Foo"), "data--foo");
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let mut attrs = AttributeStore::new();
        let mut dataset = Dataset::new(&mut attrs);
        assert!(matches!(
            dataset.set("foo-bar", "x"),
            Err(DomError::InvalidProperty { .. })
        ));
        assert!(dataset.set("foo-Bar", "x").is_ok());
        assert_eq!(attrs.get("data-foo--bar"), Some("x"));
    }
}
