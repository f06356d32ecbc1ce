//! Enforcement atomicity and the closed-world default.

use trellis_tests::prelude::*;

#[test]
fn test_rejected_attach_leaves_no_partial_state() {
    // GIVEN a parent with one committed child
    let session = core_session();
    let mut tree = Tree::new();
    let root = tree.create_node(ident("object.base"), "config", attrs!());
    let good = tree.create_node(ident("field.string"), "email", attrs!());
    session.attach(&mut tree, root, good).unwrap();

    let bad = tree.create_node(ident("field.string"), "123bad", attrs!());

    // WHEN a later attach is denied
    session.attach(&mut tree, root, bad).unwrap_err();

    // THEN the children collection is unchanged, by count and identity
    assert_eq!(tree.children(root), &[good]);
    assert_eq!(tree.get(bad).unwrap().parent, None);
}

#[test]
fn test_closed_world_default_denies() {
    // GIVEN two types with no declarations touching each other
    let session = core_session();

    // field.base declares neither child rules nor parent rules
    let decision =
        session.decide_placement(&ident("field.base"), &ident("field.base"), "anything");

    assert_eq!(decision, Decision::Undeclared);
    assert!(!session.is_placement_allowed(&ident("field.base"), &ident("field.base"), "anything"));
}

#[test]
fn test_object_under_field_is_denied() {
    // GIVEN a field node, which declares no accepts-children at all
    let session = core_session();
    let mut tree = Tree::new();
    let root = tree.create_node(ident("field.string"), "email", attrs!());
    let child = tree.create_node(ident("object.base"), "nested", attrs!());

    // WHEN attaching an object under a field
    let err = session.attach(&mut tree, root, child).unwrap_err();

    // THEN no declaration covers the pair and nothing changed
    assert!(tree.children(root).is_empty());
    assert_eq!(err.constraint_id, ids::PLACEMENT_UNDECLARED);
}

#[test]
fn test_violation_path_runs_root_to_parent() {
    // GIVEN a nested container
    let session = core_session();
    let mut tree = Tree::new();
    let root = tree.create_node(ident("object.base"), "config", attrs!());
    let section = tree.create_node(ident("object.pojo"), "person", attrs!());
    session.attach(&mut tree, root, section).unwrap();

    let bad = tree.create_node(ident("field.string"), "123bad", attrs!());

    // WHEN a deep attach is denied
    let err = session.enforce_on_attach(&tree, section, bad).unwrap_err();

    // THEN the path walks from the root to the attempted parent
    assert_eq!(
        err.path.to_string(),
        "/config[object.base]/person[object.pojo]"
    );
}

#[test]
fn test_missing_nodes_are_structural_violations() {
    let session = core_session();
    let mut tree = Tree::new();
    let root = tree.create_node(ident("object.base"), "config", attrs!());

    let err = session
        .enforce_on_attach(&tree, root, NodeId::new(999))
        .unwrap_err();

    assert_eq!(err.constraint_id, ids::MISSING_NODE);
}

#[test]
fn test_double_attach_is_rejected_structurally() {
    // GIVEN a child already linked under one parent
    let session = core_session();
    let mut tree = Tree::new();
    let first = tree.create_node(ident("object.base"), "a", attrs!());
    let second = tree.create_node(ident("object.base"), "b", attrs!());
    let child = tree.create_node(ident("field.string"), "email", attrs!());
    session.attach(&mut tree, first, child).unwrap();

    // WHEN linking it under another parent
    let err = session.attach(&mut tree, second, child).unwrap_err();

    // THEN the structural guard fires and the original link stands
    assert_eq!(err.constraint_id, ids::TREE_STRUCTURE);
    assert_eq!(tree.get(child).unwrap().parent, Some(first));
    assert!(tree.children(second).is_empty());
}

#[test]
fn test_denied_set_value_leaves_attributes_unchanged() {
    let session = core_session();
    let mut tree = Tree::new();
    let node = tree.create_node(ident("field.string"), "email", attrs!());
    session
        .set_value(&mut tree, node, "doc", Value::String("primary".into()))
        .unwrap();

    // Wrong kind for a String attribute
    session
        .set_value(&mut tree, node, "doc", Value::Int(7))
        .unwrap_err();

    assert_eq!(
        tree.get(node).unwrap().get_attr("doc"),
        Some(&Value::String("primary".into()))
    );
}
