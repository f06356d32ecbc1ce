//! Registration, two-pass resolution, and the one-way seal.

use trellis_tests::prelude::*;

#[test]
fn test_unresolved_parent_prevents_sealing() {
    // GIVEN a type whose parent identifier was never registered
    let mut builder = RegistryBuilder::new();
    builder
        .register(TypeDef::new(ident("field.string")).extends(ident("field.base")))
        .unwrap();

    // WHEN sealing
    let result = builder.seal();

    // THEN the registry never becomes queryable
    assert!(matches!(result, Err(ConfigError::UnknownParent { .. })));
}

#[test]
fn test_bootstrap_fails_on_unresolved_parent() {
    // GIVEN a provider with the same dangling reference
    let broken = |builder: &mut RegistryBuilder| -> ConfigResult<()> {
        builder.register(TypeDef::new(ident("field.string")).extends(ident("field.base")))
    };

    // WHEN bootstrapping a session
    let result = Session::bootstrap(vec![Box::new(broken)]);

    // THEN no session exists
    assert!(matches!(result, Err(ConfigError::UnknownParent { .. })));
}

#[test]
fn test_registration_order_does_not_matter() {
    // GIVEN children registered before parents, across providers
    let children_first = |builder: &mut RegistryBuilder| -> ConfigResult<()> {
        builder.register(TypeDef::new(ident("field.string")).extends(ident("field.base")))?;
        builder.register(TypeDef::new(ident("field.int")).extends(ident("field.base")))
    };
    let parents_later = |builder: &mut RegistryBuilder| -> ConfigResult<()> {
        builder.register(TypeDef::new(ident("field.base")))
    };

    // WHEN bootstrapping
    let session =
        Session::bootstrap(vec![Box::new(children_first), Box::new(parents_later)]).unwrap();

    // THEN the chains resolved
    assert_eq!(
        session.ancestors_of(&ident("field.string")).unwrap(),
        vec![ident("field.string"), ident("field.base")]
    );
}

#[test]
fn test_duplicate_identifier_is_rejected_immediately() {
    let mut builder = RegistryBuilder::new();
    builder.register(TypeDef::new(ident("field.base"))).unwrap();

    let result = builder.register(TypeDef::new(ident("field.base")));

    assert!(matches!(result, Err(ConfigError::DuplicateType(_))));
}

#[test]
fn test_inheritance_cycle_is_rejected_at_seal() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(TypeDef::new(ident("a.one")).extends(ident("a.two")))
        .unwrap();
    builder
        .register(TypeDef::new(ident("a.two")).extends(ident("a.three")))
        .unwrap();
    builder
        .register(TypeDef::new(ident("a.three")).extends(ident("a.one")))
        .unwrap();

    assert!(matches!(
        builder.seal(),
        Err(ConfigError::InheritanceCycle(_))
    ));
}

#[test]
fn test_sealed_session_rejects_late_definitions() {
    // GIVEN a bootstrapped session
    let session = core_session();

    // WHEN registering or authoring rules afterwards
    let late_type = session.register_type(TypeDef::new(ident("late.arrival")));
    let late_rule = session.add_explicit_constraint(ExplicitRule::forbid(
        "late",
        "",
        TypePattern::any(),
        TypePattern::any(),
        NameSpec::Any,
    ));

    // THEN both fail with the sealed error
    assert!(matches!(
        late_type,
        Err(SessionError::Config(ConfigError::Sealed))
    ));
    assert!(matches!(
        late_rule,
        Err(SessionError::Config(ConfigError::Sealed))
    ));
}

#[test]
fn test_malformed_pattern_is_a_configuration_error() {
    // GIVEN a provider declaring a broken name pattern
    let broken = |builder: &mut RegistryBuilder| -> ConfigResult<()> {
        builder.register(
            TypeDef::new(ident("field.string")).accepts_parent(ParentRule::new(
                TypeSpec::Any,
                TypeSpec::Any,
                NameSpec::pattern("[unclosed")?,
            )),
        )
    };

    // WHEN bootstrapping
    let result = Session::bootstrap(vec![Box::new(broken)]);

    // THEN the pattern error surfaces as configuration failure
    assert!(matches!(result, Err(ConfigError::Pattern(_))));
}
