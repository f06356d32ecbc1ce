//! Value-constraint evaluation: inline attribute specs and inherited
//! standalone checks.

use trellis_tests::prelude::*;

/// A schema exercising every check kind: a column type with a slug-named
/// identifier, a bounded length, an enumerated charset, and a min/max
/// consistency pair declared on the base and inherited by the variant.
fn column_provider(builder: &mut RegistryBuilder) -> ConfigResult<()> {
    builder.register(
        TypeDef::new(ident("column.base"))
            .attr(
                AttrSpec::new("identifier", "String")
                    .required()
                    .with_match_pattern(Pattern::new(r"^[a-z][a-z0-9_]*$")?),
            )
            .attr(
                AttrSpec::new("length", "Int")
                    .with_range(Some(Value::Int(1)), Some(Value::Int(4000))),
            )
            .attr(AttrSpec::new("charset", "String").with_allowed_values(vec![
                Value::String("utf8".into()),
                Value::String("latin1".into()),
            ]))
            .attr(AttrSpec::new("min", "Int"))
            .attr(AttrSpec::new("max", "Int"))
            .check(CheckDef::new(
                "min-below-max",
                NameSpec::exact("min"),
                CheckKind::SiblingCompare {
                    other: "max".to_string(),
                    relation: CompareOp::Le,
                },
                "min must not exceed max",
            )),
    )?;
    builder.register(TypeDef::new(ident("column.varchar")).extends(ident("column.base")))?;
    Ok(())
}

fn column_session() -> Session {
    Session::bootstrap(vec![Box::new(column_provider)]).unwrap()
}

fn varchar_node(tree: &mut Tree) -> NodeId {
    tree.create_node(ident("column.varchar"), "name", attrs!())
}

#[test]
fn test_pattern_constraint() {
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    session
        .set_value(&mut tree, node, "identifier", Value::String("user_name".into()))
        .unwrap();
    let err = session
        .set_value(&mut tree, node, "identifier", Value::String("User-Name".into()))
        .unwrap_err();

    assert_eq!(err.all()[0].constraint_id, ids::ATTR_MATCH);
    // The committed value survives the rejected assignment.
    assert_eq!(
        tree.get(node).unwrap().get_attr("identifier"),
        Some(&Value::String("user_name".into()))
    );
}

#[test]
fn test_range_constraint() {
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    session
        .set_value(&mut tree, node, "length", Value::Int(255))
        .unwrap();
    let err = session
        .enforce_on_set_value(&tree, node, "length", &Value::Int(0))
        .unwrap_err();

    assert_eq!(err.all()[0].constraint_id, ids::ATTR_RANGE);
}

#[test]
fn test_enumerated_set_constraint() {
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    session
        .set_value(&mut tree, node, "charset", Value::String("utf8".into()))
        .unwrap();
    let err = session
        .enforce_on_set_value(&tree, node, "charset", &Value::String("ebcdic".into()))
        .unwrap_err();

    assert_eq!(err.all()[0].constraint_id, ids::ATTR_ONE_OF);
}

#[test]
fn test_required_attribute_rejects_null() {
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    let err = session
        .enforce_on_set_value(&tree, node, "identifier", &Value::Null)
        .unwrap_err();

    assert_eq!(err.all()[0].constraint_id, ids::ATTR_REQUIRED);
}

#[test]
fn test_cross_field_check_is_inherited() {
    // GIVEN the check declared on column.base and a varchar node with max
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);
    session
        .set_value(&mut tree, node, "max", Value::Int(10))
        .unwrap();

    // WHEN assigning a min above max on the subtype
    let err = session
        .enforce_on_set_value(&tree, node, "min", &Value::Int(20))
        .unwrap_err();

    // THEN the inherited check fires with its authored id
    assert_eq!(err.all()[0].constraint_id, "min-below-max");

    // AND a consistent min passes
    session
        .set_value(&mut tree, node, "min", Value::Int(5))
        .unwrap();
}

#[test]
fn test_all_failures_reported_together() {
    // GIVEN a value of the wrong kind for a patterned, enumerated string
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    // WHEN assigning an Int where charset expects one of the strings
    let err = session
        .enforce_on_set_value(&tree, node, "charset", &Value::Int(7))
        .unwrap_err();

    // THEN every independent failure is present, not just the first
    let id_list: Vec<&str> = err.iter().map(|v| v.constraint_id.as_str()).collect();
    assert!(id_list.contains(&ids::ATTR_TYPE));
    assert!(id_list.contains(&ids::ATTR_ONE_OF));
    assert!(err.len() >= 2);
}

#[test]
fn test_violation_paths_name_the_offender() {
    let session = column_session();
    let mut tree = Tree::new();
    let node = varchar_node(&mut tree);

    let err = session
        .enforce_on_set_value(&tree, node, "length", &Value::Int(0))
        .unwrap_err();

    assert_eq!(err.all()[0].path.to_string(), "/name[column.varchar]");
}
