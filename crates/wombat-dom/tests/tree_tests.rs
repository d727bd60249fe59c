//! Tests for the arena document tree: allocation, attachment, sibling links,
//! element data, and traversal.

use wombat_dom::{DomTree, ElementData, NodeData, NodeId};

/// Helper to create an element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, name: &str) -> NodeId {
    tree.alloc(NodeData::Element(ElementData::new(name.to_string(), false)))
}

// ========== attachment and sibling links ==========

#[test]
fn test_new_tree_has_only_document() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(tree.get(NodeId::ROOT).is_some());
    assert!(tree.as_element(NodeId::ROOT).is_none());
    assert!(tree.document_element().is_none());
}

#[test]
fn test_append_child_sets_relationships() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(b));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_alloc_without_attach_is_parentless() {
    let mut tree = DomTree::new();
    let orphan = alloc_element(&mut tree, "div");
    assert_eq!(tree.parent(orphan), None);
    assert!(tree.children(orphan).is_empty());
}

#[test]
fn test_is_descendant_of() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let p = alloc_element(&mut tree, "p");
    let span = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(div, p);
    tree.append_child(p, span);

    assert!(tree.is_descendant_of(span, div));
    assert!(tree.is_descendant_of(span, NodeId::ROOT));
    assert!(!tree.is_descendant_of(div, span));
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(div, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![div, NodeId::ROOT]);
}

#[test]
fn test_document_element_skips_nothing_but_finds_first() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    assert_eq!(tree.document_element(), Some(html));
}

// ========== element data ==========

#[test]
fn test_set_attribute_first_wins() {
    let mut element = ElementData::new("div".to_string(), false);
    assert!(element.set_attribute("id".to_string(), "a".to_string()));
    assert!(!element.set_attribute("id".to_string(), "b".to_string()));
    assert_eq!(element.attribute("id"), Some("a"));
    assert_eq!(element.attributes().len(), 1);
}

#[test]
fn test_id_and_classes() {
    let mut element = ElementData::new("div".to_string(), false);
    let _ = element.set_attribute("id".to_string(), "main".to_string());
    let _ = element.set_attribute("class".to_string(), "one  two".to_string());
    assert_eq!(element.id(), Some("main"));
    let classes = element.classes();
    assert!(classes.contains("one"));
    assert!(classes.contains("two"));
    assert_eq!(classes.len(), 2);
}

#[test]
fn test_append_text_only_on_elements() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);

    assert!(tree.append_text(div, 'h'));
    assert!(tree.append_text(div, 'i'));
    assert_eq!(tree.as_element(div).unwrap().text, "hi");

    // The document node never carries character data.
    assert!(!tree.append_text(NodeId::ROOT, 'x'));
}

// ========== document metadata ==========

#[test]
fn test_head_form_and_doctype_slots() {
    let mut tree = DomTree::new();
    let head = alloc_element(&mut tree, "head");
    let form = alloc_element(&mut tree, "form");
    tree.append_child(NodeId::ROOT, head);
    tree.append_child(NodeId::ROOT, form);

    assert_eq!(tree.head(), None);
    tree.set_head(head);
    tree.set_form(form);
    tree.set_doctype_name("html".to_string());

    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.form(), Some(form));
    assert_eq!(tree.doctype_name(), Some("html"));
}

// ========== traversal ==========

#[test]
fn test_traverse_is_preorder() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    let div = alloc_element(&mut tree, "div");
    let span = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);
    tree.append_child(body, div);
    tree.append_child(body, span);

    let order: Vec<NodeId> = tree.traverse().collect();
    assert_eq!(order, vec![html, head, body, div, span]);
}

#[test]
fn test_traverse_on_empty_tree_yields_nothing() {
    let tree = DomTree::new();
    assert_eq!(tree.traverse().count(), 0);
}

#[test]
fn test_traverse_is_restartable() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);

    let first: Vec<NodeId> = tree.traverse().collect();
    let second: Vec<NodeId> = tree.traverse().collect();
    assert_eq!(first, second);
}
