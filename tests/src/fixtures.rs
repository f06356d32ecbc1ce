//! Shared schema fixtures.
//!
//! The core fixture models a small field/object/attr hierarchy:
//!
//! - `field.base` with `field.string` and `field.int` variants;
//!   `field.string` accepts any parent as long as its own name is a plain
//!   identifier.
//! - `object.base` accepts any `field.*`, `attr.*`, or `object.*` child;
//!   `object.pojo` inherits everything and declares nothing of its own.
//! - `attr.base`/`attr.int` accept any parent, but an explicit rule
//!   forbids `attr.int` named `maxLength` under any object type.

use trellis_core::TypeIdent;
use trellis_registry::{
    AttrSpec, ChildRule, ConfigResult, ExplicitRule, NameSpec, ParentRule, RegistryBuilder,
    TypeDef, TypePattern, TypeSpec,
};
use trellis_session::{SchemaProvider, Session};

/// Parse a known-good identifier literal.
pub fn ident(text: &str) -> TypeIdent {
    TypeIdent::parse(text).unwrap()
}

/// The core schema provider used by most scenarios.
pub struct CoreSchema;

impl SchemaProvider for CoreSchema {
    fn provide(&self, builder: &mut RegistryBuilder) -> ConfigResult<()> {
        builder.register(
            TypeDef::new(ident("field.base"))
                .describe("abstract field")
                .attr(AttrSpec::new("doc", "String")),
        )?;
        builder.register(
            TypeDef::new(ident("field.string"))
                .extends(ident("field.base"))
                .describe("string-valued field")
                .accepts_parent(ParentRule::new(
                    TypeSpec::Any,
                    TypeSpec::Any,
                    NameSpec::pattern(r"^[a-zA-Z][a-zA-Z0-9_]*$")?,
                )),
        )?;
        builder.register(
            TypeDef::new(ident("field.int"))
                .extends(ident("field.base"))
                .describe("integer-valued field"),
        )?;
        builder.register(
            TypeDef::new(ident("object.base"))
                .describe("generic container")
                .accepts_child(ChildRule::new(
                    TypeSpec::exact("field"),
                    TypeSpec::Any,
                    NameSpec::Any,
                ))
                .accepts_child(ChildRule::new(
                    TypeSpec::exact("attr"),
                    TypeSpec::Any,
                    NameSpec::Any,
                ))
                .accepts_child(ChildRule::new(
                    TypeSpec::exact("object"),
                    TypeSpec::Any,
                    NameSpec::Any,
                )),
        )?;
        builder.register(
            TypeDef::new(ident("object.pojo"))
                .extends(ident("object.base"))
                .describe("plain generated object"),
        )?;
        builder.register(
            TypeDef::new(ident("attr.base")).accepts_parent(ParentRule::any()),
        )?;
        builder.register(
            TypeDef::new(ident("attr.int")).extends(ident("attr.base")),
        )?;
        builder.add_explicit(ExplicitRule::forbid(
            "no-length-attrs-on-objects",
            "object types may never carry a string-length attribute",
            TypePattern::category("object"),
            TypePattern::exact("attr", "int"),
            NameSpec::exact("maxLength"),
        ))?;
        Ok(())
    }
}

/// A session over the core schema.
pub fn core_session() -> Session {
    Session::bootstrap(vec![Box::new(CoreSchema)]).unwrap()
}
