//! Element creation.
//!
//! [§ 4.9 Creating an element](https://dom.spec.whatwg.org/#concept-create-element)
//!
//! Custom element registration lives outside this crate. Creation consults an
//! injected [`ElementRegistry`] for the behavior to attach, and falls back to a
//! generic element when the lookup comes back empty.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use sprig_common::warning::warn_once;

use crate::namespace::{HTML_NAMESPACE, SVG_NAMESPACE, creation_path_for};
use crate::node::{ElementData, NodeId, NodeType};
use crate::tree::DomTree;

/// The behavioral identity of an element class.
///
/// [§ 4.13.4 Custom element definitions](https://html.spec.whatwg.org/multipage/custom-elements.html#custom-element-definition)
pub trait ElementBehavior: fmt::Debug {
    /// "A name: A valid custom element name"
    fn name(&self) -> &str;

    /// "A local name: A local name" of the built-in element this behavior
    /// customizes, or `None` for an autonomous element.
    fn extends(&self) -> Option<&str> {
        None
    }
}

/// Lookup capability used by the factory.
pub trait ElementRegistry {
    /// Behavior registered for a tag or `is` name, if any.
    fn resolve_element_behavior(&self, tag_or_is_name: &str) -> Option<Rc<dyn ElementBehavior>>;
}

/// The empty registry: every element gets the generic behavior.
impl ElementRegistry for () {
    fn resolve_element_behavior(&self, _tag_or_is_name: &str) -> Option<Rc<dyn ElementBehavior>> {
        None
    }
}

/// A behavior described by data alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBehavior {
    name: String,
    extends: Option<String>,
}

impl NamedBehavior {
    /// An autonomous behavior, serialized under its own name.
    pub fn autonomous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
        }
    }

    /// A customized built-in: serialized as `extends` with an `is` attribute.
    pub fn customized(name: impl Into<String>, extends: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Some(extends.into()),
        }
    }
}

impl ElementBehavior for NamedBehavior {
    fn name(&self) -> &str {
        &self.name
    }

    fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }
}

/// Name-keyed [`ElementRegistry`] backed by a map.
#[derive(Debug, Clone, Default)]
pub struct BehaviorMap {
    behaviors: HashMap<String, Rc<dyn ElementBehavior>>,
}

impl BehaviorMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `behavior` under its own name, returning the one it replaces.
    pub fn insert(&mut self, behavior: Rc<dyn ElementBehavior>) -> Option<Rc<dyn ElementBehavior>> {
        self.behaviors.insert(behavior.name().to_string(), behavior)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, behavior: impl ElementBehavior + 'static) -> Self {
        let _ = self.insert(Rc::new(behavior));
        self
    }
}

impl ElementRegistry for BehaviorMap {
    fn resolve_element_behavior(&self, tag_or_is_name: &str) -> Option<Rc<dyn ElementBehavior>> {
        self.behaviors.get(tag_or_is_name).cloned()
    }
}

impl DomTree {
    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// Creates an unattached element. `svg` is routed through the SVG path;
    /// every other tag lands in the HTML namespace.
    pub fn create_element(
        &mut self,
        registry: &dyn ElementRegistry,
        local_name: &str,
        is: Option<&str>,
    ) -> NodeId {
        let namespace = creation_path_for(local_name).namespace();
        self.create_element_ns(registry, Some(namespace), local_name, is)
    }

    /// Creates an unattached element in the SVG namespace.
    pub fn create_svg_element(&mut self, registry: &dyn ElementRegistry, local_name: &str) -> NodeId {
        self.create_element_ns(registry, Some(SVG_NAMESPACE), local_name, None)
    }

    /// [§ 4.5 createElementNS](https://dom.spec.whatwg.org/#dom-document-createelementns)
    ///
    /// Creates an unattached element in exactly the given namespace.
    pub fn create_element_ns(
        &mut self,
        registry: &dyn ElementRegistry,
        namespace: Option<&str>,
        local_name: &str,
        is: Option<&str>,
    ) -> NodeId {
        let key = is.unwrap_or(local_name);
        let behavior = registry.resolve_element_behavior(key);
        if behavior.is_none() && (is.is_some() || local_name.contains('-')) {
            warn_once(
                "DOM",
                &format!("no behavior registered for '{key}'; using a generic element"),
            );
        }

        let mut data = ElementData::new(local_name, namespace.map(str::to_string));
        data.custom_name = is.map(str::to_string);
        data.behavior = behavior;
        self.alloc(NodeType::Element(data))
    }

    /// Creates an element directly from a behavior, deriving its local name.
    ///
    /// A customized built-in takes the tag it extends and keeps its own name
    /// as the custom name; an autonomous behavior takes its own name. A
    /// behavior with an empty name and nothing to extend yields an element
    /// whose local name must be assigned before it can be serialized.
    pub fn create_element_for_behavior(&mut self, behavior: Rc<dyn ElementBehavior>) -> NodeId {
        let namespace = Some(HTML_NAMESPACE.to_string());
        let mut data = match behavior.extends() {
            Some(extends) => {
                let mut data = ElementData::new(extends, namespace);
                data.custom_name = Some(behavior.name().to_string());
                data
            }
            None if !behavior.name().is_empty() => ElementData::new(behavior.name(), namespace),
            None => ElementData::unnamed(namespace),
        };
        data.behavior = Some(behavior);
        self.alloc(NodeType::Element(data))
    }
}
