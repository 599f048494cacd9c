//! [§ 7.1 Interface DOMTokenList](https://dom.spec.whatwg.org/#interface-domtokenlist)
//!
//! The `class` attribute viewed as an ordered set of tokens.

use std::fmt;

use crate::attributes::AttributeStore;

const CLASS: &str = "class";

/// Token-set view over an element's `class` attribute.
///
/// Tokens are re-read from the attribute on every call, so the view never
/// disagrees with a direct attribute write.
#[derive(Debug)]
pub struct ClassList<'a> {
    attrs: &'a mut AttributeStore,
}

impl<'a> ClassList<'a> {
    /// View over `attrs`.
    pub const fn new(attrs: &'a mut AttributeStore) -> Self {
        Self { attrs }
    }

    /// [§ 7.1 value](https://dom.spec.whatwg.org/#dom-domtokenlist-value)
    ///
    /// "The value attribute must return the result of running this's get an
    /// attribute value."
    #[must_use]
    pub fn value(&self) -> &str {
        self.attrs.get(CLASS).unwrap_or("")
    }

    /// "The ordered set parser": whitespace-split, duplicates dropped.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for token in self.value().split_ascii_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        tokens
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    /// True if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value().split_ascii_whitespace().next().is_none()
    }

    /// The token at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<String> {
        self.tokens().into_iter().nth(index)
    }

    /// True if `token` is present.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.value().split_ascii_whitespace().any(|t| t == token)
    }

    /// [§ 7.1 add](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    ///
    /// Appends each token not already present. Empty tokens are ignored. The
    /// attribute is only rewritten when the set changes.
    pub fn add(&mut self, tokens: &[&str]) {
        let mut current = self.tokens();
        let before = current.len();
        for token in tokens.iter().filter(|t| !t.is_empty()) {
            if !current.iter().any(|t| t == token) {
                current.push((*token).to_string());
            }
        }
        if current.len() != before {
            self.write(&current);
        }
    }

    /// [§ 7.1 remove](https://dom.spec.whatwg.org/#dom-domtokenlist-remove)
    ///
    /// The attribute is only rewritten when the set changes; removing every
    /// token leaves `class=""` behind.
    pub fn remove(&mut self, tokens: &[&str]) {
        let current = self.tokens();
        let kept: Vec<String> = current
            .iter()
            .filter(|t| !tokens.contains(&t.as_str()))
            .cloned()
            .collect();
        if kept.len() != current.len() {
            self.write(&kept);
        }
    }

    /// [§ 7.1 replace](https://dom.spec.whatwg.org/#dom-domtokenlist-replace)
    ///
    /// "If this's token set does not contain token, then return false.
    /// Replace token in this's token set with newToken."
    pub fn replace(&mut self, token: &str, new_token: &str) -> bool {
        let mut current = self.tokens();
        let Some(index) = current.iter().position(|t| t == token) else {
            return false;
        };
        if current.iter().any(|t| t == new_token) {
            let _ = current.remove(index);
        } else {
            new_token.clone_into(&mut current[index]);
        }
        self.write(&current);
        true
    }

    /// [§ 7.1 toggle](https://dom.spec.whatwg.org/#dom-domtokenlist-toggle)
    ///
    /// Returns whether `token` is present afterward.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        if self.contains(token) {
            if force == Some(true) {
                return true;
            }
            self.remove(&[token]);
            false
        } else {
            if force == Some(false) {
                return false;
            }
            self.add(&[token]);
            true
        }
    }

    /// Replace the whole attribute value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.attrs.set(CLASS, value);
    }

    fn write(&mut self, tokens: &[String]) {
        self.attrs.set(CLASS, tokens.join(" "));
    }
}

impl fmt::Display for ClassList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
