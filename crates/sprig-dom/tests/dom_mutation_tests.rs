//! Tests for tree mutation methods: remove_child, insert_before, replace_child,
//! move_children and the ChildNode / ParentNode conveniences.

use sprig_dom::{Child, DomError, DomTree, NodeId, NodeKind, Value};

/// Helper to create an HTML element and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(&(), tag, None)
}

/// Helper to create a parent `div` attached to the document.
fn attached_parent(tree: &mut DomTree) -> NodeId {
    let parent = alloc_element(tree, "div");
    let _ = tree.append_child(NodeId::ROOT, parent).unwrap();
    parent
}

/// Helper to append several children in order.
fn append_all(tree: &mut DomTree, parent: NodeId, children: &[NodeId]) {
    for &child in children {
        let _ = tree.append_child(parent, child).unwrap();
    }
}

// ========== append_child ==========

#[test]
fn test_append_child_moves_between_parents() {
    let mut tree = DomTree::new();
    let parent_a = attached_parent(&mut tree);
    let parent_b = alloc_element(&mut tree, "section");
    let child = alloc_element(&mut tree, "p");

    let _ = tree.append_child(parent_a, child).unwrap();
    let _ = tree.append_child(parent_b, child).unwrap();

    assert!(tree.child_nodes(parent_a).is_empty());
    assert_eq!(tree.child_nodes(parent_b), [child]);
    assert_eq!(tree.parent(child), Some(parent_b));
}

#[test]
fn test_append_child_to_same_parent_moves_to_end() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    append_all(&mut tree, parent, &[a, b]);

    let _ = tree.append_child(parent, a).unwrap();

    assert_eq!(tree.child_nodes(parent), [b, a]);
}

#[test]
fn test_append_child_on_character_data_is_illegal() {
    let mut tree = DomTree::new();
    let text = tree.create_text("hello");
    let comment = tree.create_comment("note");
    let child = alloc_element(&mut tree, "p");

    for leaf in [text, comment] {
        let result = tree.append_child(leaf, child);
        assert!(matches!(
            result,
            Err(DomError::IllegalInvocation { method: "append_child", .. })
        ));
    }
    assert_eq!(tree.parent(child), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);

    let child = alloc_element(&mut tree, "p");
    let _ = tree.append_child(parent, child).unwrap();

    assert_eq!(tree.children(parent).len(), 1);

    let removed = tree.remove_child(parent, child).unwrap();

    assert_eq!(removed, child);
    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.previous_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b, c]);

    let _ = tree.remove_child(parent, a).unwrap();

    // b is now first child, c is second
    assert_eq!(tree.child_nodes(parent), [b, c]);
    assert_eq!(tree.previous_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(&Child::Node(c)));
    assert_eq!(tree.previous_sibling(c), Some(&Child::Node(b)));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b, c]);

    let _ = tree.remove_child(parent, b).unwrap();

    // a and c are siblings now
    assert_eq!(tree.child_nodes(parent), [a, c]);
    assert_eq!(tree.next_sibling(a), Some(&Child::Node(c)));
    assert_eq!(tree.previous_sibling(c), Some(&Child::Node(a)));
}

#[test]
fn test_remove_child_not_present_is_lenient() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let stranger = alloc_element(&mut tree, "b");
    let _ = tree.append_child(parent, a).unwrap();

    let result = tree.remove_child(parent, stranger);

    assert_eq!(result, Ok(stranger));
    assert_eq!(tree.child_nodes(parent), [a]);
}

#[test]
fn test_remove_child_does_not_detach_from_other_parent() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let other = alloc_element(&mut tree, "section");
    let child = alloc_element(&mut tree, "p");
    let _ = tree.append_child(other, child).unwrap();

    let _ = tree.remove_child(parent, child).unwrap();

    assert_eq!(tree.parent(child), Some(other));
}

#[test]
fn test_remove_detaches_from_parent() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let child = alloc_element(&mut tree, "p");
    let _ = tree.append_child(parent, child).unwrap();

    tree.remove(child);
    tree.remove(child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);

    let b = alloc_element(&mut tree, "b");
    let _ = tree.append_child(parent, b).unwrap();

    let a = alloc_element(&mut tree, "a");
    let _ = tree.insert_before(parent, a, Some(b)).unwrap();

    assert_eq!(tree.child_nodes(parent), [a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.next_sibling(a), Some(&Child::Node(b)));
    assert_eq!(tree.previous_sibling(b), Some(&Child::Node(a)));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, c]);

    let b = alloc_element(&mut tree, "b");
    let _ = tree.insert_before(parent, b, Some(c)).unwrap();

    assert_eq!(tree.child_nodes(parent), [a, b, c]);
}

#[test]
fn test_insert_before_none_appends() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let _ = tree.append_child(parent, a).unwrap();

    let _ = tree.insert_before(parent, b, None).unwrap();

    assert_eq!(tree.child_nodes(parent), [a, b]);
}

#[test]
fn test_insert_before_sibling_that_precedes_reference() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b, c]);

    let _ = tree.insert_before(parent, a, Some(c)).unwrap();

    assert_eq!(tree.child_nodes(parent), [b, a, c]);
}

#[test]
fn test_insert_before_missing_reference_fails() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let node = alloc_element(&mut tree, "a");
    let stranger = alloc_element(&mut tree, "b");

    let result = tree.insert_before(parent, node, Some(stranger));

    assert!(matches!(result, Err(DomError::MissingChild { .. })));
    assert_eq!(tree.parent(node), None);
}

#[test]
fn test_insert_before_itself_is_noop() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    append_all(&mut tree, parent, &[a, b]);

    let _ = tree.insert_before(parent, b, Some(b)).unwrap();

    assert_eq!(tree.child_nodes(parent), [a, b]);
}

// ========== replace_child ==========

#[test]
fn test_replace_child_returns_previous() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b]);

    let replaced = tree.replace_child(parent, c, a).unwrap();

    assert_eq!(replaced, a);
    assert_eq!(tree.child_nodes(parent), [c, b]);
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.parent(c), Some(parent));
}

#[test]
fn test_replace_child_with_existing_sibling() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b, c]);

    let _ = tree.replace_child(parent, a, c).unwrap();

    assert_eq!(tree.child_nodes(parent), [b, a]);
    assert_eq!(tree.parent(c), None);
}

#[test]
fn test_replace_child_missing_previous_fails() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let stranger = alloc_element(&mut tree, "b");

    let result = tree.replace_child(parent, a, stranger);

    assert!(matches!(result, Err(DomError::MissingChild { .. })));
}

// ========== move_children ==========

#[test]
fn test_move_children_basic() {
    let mut tree = DomTree::new();
    let src = attached_parent(&mut tree);
    let dst = attached_parent(&mut tree);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    append_all(&mut tree, src, &[a, b]);

    tree.move_children(src, dst).unwrap();

    assert!(tree.children(src).is_empty());
    assert_eq!(tree.child_nodes(dst), [a, b]);
    assert_eq!(tree.parent(a), Some(dst));
    assert_eq!(tree.parent(b), Some(dst));
}

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let src = attached_parent(&mut tree);
    let dst = attached_parent(&mut tree);

    let existing = alloc_element(&mut tree, "x");
    let _ = tree.append_child(dst, existing).unwrap();

    let a = alloc_element(&mut tree, "a");
    let _ = tree.append_child(src, a).unwrap();

    tree.move_children(src, dst).unwrap();

    assert_eq!(tree.child_nodes(dst), [existing, a]);
    assert_eq!(tree.previous_sibling(a), Some(&Child::Node(existing)));
}

#[test]
fn test_move_children_empty_source() {
    let mut tree = DomTree::new();
    let src = attached_parent(&mut tree);
    let dst = attached_parent(&mut tree);

    let existing = alloc_element(&mut tree, "x");
    let _ = tree.append_child(dst, existing).unwrap();

    tree.move_children(src, dst).unwrap();

    assert_eq!(tree.child_nodes(dst), [existing]);
}

// ========== ChildNode / ParentNode ==========

#[test]
fn test_before_and_after() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let anchor = alloc_element(&mut tree, "b");
    let _ = tree.append_child(parent, anchor).unwrap();
    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");

    tree.before(anchor, [Child::from(a)]);
    tree.after(anchor, [Child::from(c), Child::from("tail")]);

    assert_eq!(tree.child_nodes(parent), [a, anchor, c]);
    assert_eq!(tree.last_child(parent), Some(&Child::Value(Value::from("tail"))));
}

#[test]
fn test_before_without_parent_does_nothing() {
    let mut tree = DomTree::new();
    let orphan = alloc_element(&mut tree, "b");
    let a = alloc_element(&mut tree, "a");

    tree.before(orphan, [Child::from(a)]);

    assert_eq!(tree.parent(a), None);
}

#[test]
fn test_replace_with_skips_itself() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    append_all(&mut tree, parent, &[a, b, c]);
    let x = alloc_element(&mut tree, "x");

    tree.replace_with(b, [Child::from(b), Child::from(x)]);

    assert_eq!(tree.child_nodes(parent), [a, x, c]);
    assert_eq!(tree.parent(b), None);
}

#[test]
fn test_prepend_and_append_keep_order() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    let d = alloc_element(&mut tree, "d");
    let _ = tree.append_child(parent, c).unwrap();

    tree.prepend(parent, [Child::from(a), Child::from(b)]).unwrap();
    tree.append(parent, [Child::from(d)]).unwrap();

    assert_eq!(tree.child_nodes(parent), [a, b, c, d]);
}

#[test]
fn test_replace_children_releases_old_children() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let _ = tree.append_child(parent, a).unwrap();

    tree.replace_children(parent, [Child::from(b), Child::from(3_i64)])
        .unwrap();

    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.children(parent).len(), 2);
}

#[test]
fn test_nested_list_children_get_parent_links() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");

    tree.append(parent, [Child::from(vec![Child::from(a), Child::from(b)])])
        .unwrap();
    assert_eq!(tree.parent(a), Some(parent));

    let _ = tree.remove_child(parent, a).unwrap();
    assert_eq!(tree.parent(a), None);
    assert_eq!(
        tree.children(parent),
        [Child::List(vec![Child::Node(b)])]
    );
}

#[test]
fn test_append_same_node_twice_keeps_last_slot() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");

    tree.append(parent, [Child::from(a), Child::from(b), Child::from(a)])
        .unwrap();
    assert_eq!(tree.child_nodes(parent), [b, a]);
    assert_eq!(tree.outer_html(parent).unwrap(), "<div><b></b><a></a></div>");

    tree.remove(a);
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.child_nodes(parent), [b]);
}

#[test]
fn test_duplicate_inside_nested_list_is_dropped() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");

    tree.prepend(
        parent,
        [Child::from(vec![Child::from(a), Child::from("x")]), Child::from(a)],
    )
    .unwrap();

    assert_eq!(
        tree.children(parent),
        [
            Child::List(vec![Child::Value(Value::from("x"))]),
            Child::Node(a)
        ]
    );
}

#[test]
fn test_after_anchor_inside_nested_list() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append(parent, [Child::from(vec![Child::from(a)]), Child::from(b)])
        .unwrap();

    tree.after(a, [Child::from(c)]);

    assert_eq!(tree.parent(c), Some(parent));
    assert_eq!(
        tree.outer_html(parent).unwrap(),
        "<div><a></a><c></c><b></b></div>"
    );
}

#[test]
fn test_before_and_replace_with_anchor_inside_nested_list() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let x = alloc_element(&mut tree, "x");
    let y = alloc_element(&mut tree, "y");
    tree.append(parent, [Child::from(vec![Child::from(a)]), Child::from(b)])
        .unwrap();

    tree.before(a, [Child::from(x)]);
    assert_eq!(
        tree.outer_html(parent).unwrap(),
        "<div><x></x><a></a><b></b></div>"
    );

    tree.replace_with(a, [Child::from(y)]);
    assert_eq!(tree.parent(a), None);
    assert_eq!(
        tree.children(parent),
        [
            Child::List(vec![Child::Node(x), Child::Node(y)]),
            Child::Node(b)
        ]
    );
}

#[test]
fn test_standalone_foreign_element_declares_namespace() {
    let mut tree = DomTree::new();
    let one = tree.create_element_ns(&(), Some("urn:example"), "one", None);
    tree.append(one, [Child::from("...")]).unwrap();

    assert!(!tree.is_connected(one));
    assert_eq!(
        tree.outer_html(one).unwrap(),
        r#"<one xmlns="urn:example">...</one>"#
    );
}

// ========== Queries ==========

#[test]
fn test_connectedness_and_ancestry() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let child = alloc_element(&mut tree, "p");
    let orphan = alloc_element(&mut tree, "p");
    let _ = tree.append_child(parent, child).unwrap();

    assert!(tree.is_connected(child));
    assert!(!tree.is_connected(orphan));
    assert!(tree.contains(parent, child));
    assert!(tree.contains(child, child));
    assert!(!tree.contains(child, parent));
    assert_eq!(tree.get_root_node(child), NodeId::ROOT);
    assert_eq!(tree.ancestors(child).collect::<Vec<_>>(), [parent, NodeId::ROOT]);
}

#[test]
fn test_text_content_round_trip() {
    let mut tree = DomTree::new();
    let parent = attached_parent(&mut tree);
    let inner = alloc_element(&mut tree, "b");
    let text = tree.create_text("bold");
    let _ = tree.append_child(inner, text).unwrap();
    tree.append(parent, [Child::from("x = "), Child::from(inner), Child::from(2_i64)])
        .unwrap();

    assert_eq!(tree.text_content(parent), "x = bold2");

    tree.set_text_content(parent, "plain");
    assert_eq!(tree.text_content(parent), "plain");
    assert_eq!(tree.parent(inner), None);
    assert_eq!(tree.kind(tree.child_nodes(parent)[0]), NodeKind::Text);
}

#[test]
fn test_set_data_coerces_and_rejects_non_character_data() {
    let mut tree = DomTree::new();
    let text = tree.create_text("a");
    let element = alloc_element(&mut tree, "p");

    tree.set_data(text, &Value::from(1.5)).unwrap();
    tree.append_data(text, "!").unwrap();
    assert_eq!(tree.data(text), Some("1.5!"));

    assert!(matches!(
        tree.set_data(text, &Value::Null),
        Err(DomError::TypeConversion { .. })
    ));
    assert!(matches!(
        tree.set_data(element, &Value::from("x")),
        Err(DomError::IllegalInvocation { .. })
    ));
}

// ========== Document ==========

#[test]
fn test_document_element_and_doctype() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let _ = tree.append_child(html, body).unwrap();

    assert_eq!(tree.set_document_element(html), Ok(None));
    let doctype = tree.create_doctype("html");
    assert_eq!(tree.set_doctype(doctype), Ok(None));

    assert_eq!(tree.child_nodes(NodeId::ROOT), [doctype, html]);
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.doctype(), Some(doctype));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.head(), None);

    let replacement = alloc_element(&mut tree, "html");
    assert_eq!(tree.set_document_element(replacement), Ok(Some(html)));
    assert_eq!(tree.parent(html), None);
}

#[test]
fn test_set_doctype_rejects_elements() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");

    assert!(matches!(
        tree.set_doctype(div),
        Err(DomError::InvalidProperty { .. })
    ));
}
