//! Tests for element creation: namespace routing and behavior lookup.

use std::rc::Rc;

use sprig_common::warning::{clear_warnings, recorded_warnings};
use sprig_dom::{
    BehaviorMap, DomTree, ElementBehavior, ElementRegistry, HTML_NAMESPACE, MATHML_NAMESPACE,
    NamedBehavior, SVG_NAMESPACE,
};

fn namespace_of(tree: &DomTree, id: sprig_dom::NodeId) -> Option<&str> {
    tree.as_element(id).and_then(|data| data.namespace.as_deref())
}

// ========== Namespace routing ==========

#[test]
fn test_html_factory_assigns_xhtml() {
    let mut tree = DomTree::new();
    let div = tree.create_element(&(), "div", None);

    assert_eq!(namespace_of(&tree, div), Some(HTML_NAMESPACE));
}

#[test]
fn test_svg_tag_routes_to_svg_namespace() {
    let mut tree = DomTree::new();
    let svg = tree.create_element(&(), "svg", None);
    let path = tree.create_svg_element(&(), "path");

    assert_eq!(namespace_of(&tree, svg), Some(SVG_NAMESPACE));
    assert_eq!(namespace_of(&tree, path), Some(SVG_NAMESPACE));
}

#[test]
fn test_namespaced_creation_bypasses_defaults() {
    let mut tree = DomTree::new();
    let math = tree.create_element_ns(&(), Some(MATHML_NAMESPACE), "math", None);
    let svg_as_html = tree.create_element_ns(&(), Some(HTML_NAMESPACE), "svg", None);
    let bare = tree.create_element_ns(&(), None, "thing", None);

    assert_eq!(namespace_of(&tree, math), Some(MATHML_NAMESPACE));
    assert_eq!(namespace_of(&tree, svg_as_html), Some(HTML_NAMESPACE));
    assert_eq!(namespace_of(&tree, bare), None);
}

// ========== Behavior lookup ==========

#[test]
fn test_registered_behavior_is_attached() {
    let registry = BehaviorMap::new().with(NamedBehavior::autonomous("x-card"));
    let mut tree = DomTree::new();
    let card = tree.create_element(&registry, "x-card", None);

    let data = tree.as_element(card).unwrap();
    let behavior = data.behavior.as_ref().unwrap();
    assert_eq!(behavior.name(), "x-card");
    assert_eq!(behavior.extends(), None);
}

#[test]
fn test_is_name_takes_precedence_in_lookup() {
    let registry = BehaviorMap::new()
        .with(NamedBehavior::customized("fancy-button", "button"))
        .with(NamedBehavior::autonomous("button"));
    let mut tree = DomTree::new();
    let button = tree.create_element(&registry, "button", Some("fancy-button"));

    let data = tree.as_element(button).unwrap();
    assert_eq!(data.local_name(), Some("button"));
    assert_eq!(data.custom_name.as_deref(), Some("fancy-button"));
    assert_eq!(
        data.behavior.as_ref().map(|b| b.name().to_string()),
        Some("fancy-button".to_string())
    );
}

#[test]
fn test_unregistered_custom_element_falls_back_and_warns() {
    clear_warnings();
    let mut tree = DomTree::new();
    let element = tree.create_element(&(), "x-unknown", None);
    let _ = tree.create_element(&(), "x-unknown", None);

    assert!(tree.as_element(element).unwrap().behavior.is_none());
    let warnings = recorded_warnings();
    let matching = warnings.iter().filter(|w| w.contains("x-unknown")).count();
    assert_eq!(matching, 1);
}

#[test]
fn test_customized_behavior_derives_local_name() {
    let mut tree = DomTree::new();
    let element =
        tree.create_element_for_behavior(Rc::new(NamedBehavior::customized("wide-td", "td")));

    assert_eq!(tree.outer_html(element).unwrap(), r#"<td is="wide-td"></td>"#);
}

#[test]
fn test_autonomous_behavior_uses_its_name() {
    let mut tree = DomTree::new();
    let element = tree.create_element_for_behavior(Rc::new(NamedBehavior::autonomous("x-panel")));

    assert_eq!(tree.outer_html(element).unwrap(), "<x-panel></x-panel>");
}

#[test]
fn test_local_name_is_frozen_once_assigned() {
    let mut tree = DomTree::new();
    let div = tree.create_element(&(), "div", None);

    let result = tree.as_element_mut(div).unwrap().assign_local_name("span");

    assert!(result.is_err());
    assert_eq!(tree.as_element(div).unwrap().local_name(), Some("div"));
}

/// Registry that resolves every dashed name to one shared behavior.
#[derive(Debug)]
struct DashedRegistry(Rc<dyn ElementBehavior>);

impl ElementRegistry for DashedRegistry {
    fn resolve_element_behavior(&self, tag_or_is_name: &str) -> Option<Rc<dyn ElementBehavior>> {
        tag_or_is_name.contains('-').then(|| Rc::clone(&self.0))
    }
}

#[test]
fn test_custom_registry_implementation() {
    let registry = DashedRegistry(Rc::new(NamedBehavior::autonomous("shared")));
    let mut tree = DomTree::new();
    let dashed = tree.create_element(&registry, "my-widget", None);
    let plain = tree.create_element(&registry, "p", None);

    assert!(tree.as_element(dashed).unwrap().behavior.is_some());
    assert!(tree.as_element(plain).unwrap().behavior.is_none());
}
