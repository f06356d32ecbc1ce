//! Value-check evaluation.
//!
//! Pure functions over a node and a candidate value. The enforcer collects
//! every failure instead of stopping at the first, so a single assignment
//! gets complete diagnostics.

use crate::{ids, Violation, Violations};
use trellis_core::{NodePath, Value};
use trellis_flatten::FlatAttr;
use trellis_registry::{CheckDef, CheckKind};
use trellis_tree::MetaNode;

/// Check if a value kind satisfies a declared value type.
pub fn types_compatible(expected: &str, actual: &str) -> bool {
    if expected == actual {
        return true;
    }
    // Null is compatible with anything; required-ness is checked separately
    if actual == "Null" {
        return true;
    }
    // Int can be used where Float is expected
    if expected == "Float" && actual == "Int" {
        return true;
    }
    false
}

/// Evaluate the inline constraints of a resolved attribute spec against a
/// candidate value, pushing one violation per failure.
pub fn evaluate_spec(
    flat: &FlatAttr,
    attr: &str,
    value: &Value,
    path: &NodePath,
    out: &mut Violations,
) {
    let spec = &flat.spec;

    if !types_compatible(&spec.value_type, value.type_name()) {
        out.push(Violation::new(
            ids::ATTR_TYPE,
            format!(
                "attribute {:?} expects {}, got {}",
                attr,
                spec.value_type,
                value.type_name()
            ),
            path.clone(),
        ));
    }

    if flat.required && value.is_null() {
        out.push(Violation::new(
            ids::ATTR_REQUIRED,
            format!("required attribute {:?} may not be null", attr),
            path.clone(),
        ));
    }

    // Null carries no content for the remaining checks.
    if value.is_null() {
        return;
    }

    if let Some(pattern) = &spec.match_pattern {
        match value.as_str() {
            Some(text) if pattern.is_match(text) => {}
            _ => out.push(Violation::new(
                ids::ATTR_MATCH,
                format!(
                    "attribute {:?} value {} does not match /{}/",
                    attr, value, pattern
                ),
                path.clone(),
            )),
        }
    }

    let below_min = spec.min.as_ref().map_or(false, |min| !value.gte(min));
    let above_max = spec.max.as_ref().map_or(false, |max| !value.lte(max));
    if below_min || above_max {
        out.push(Violation::new(
            ids::ATTR_RANGE,
            format!(
                "attribute {:?} value {} is out of range [{}..{}]",
                attr,
                value,
                spec.min.as_ref().unwrap_or(&Value::Null),
                spec.max.as_ref().unwrap_or(&Value::Null)
            ),
            path.clone(),
        ));
    }

    if let Some(allowed) = &spec.allowed_values {
        if !allowed.contains(value) {
            out.push(Violation::new(
                ids::ATTR_ONE_OF,
                format!(
                    "attribute {:?} value {} is not one of the allowed values",
                    attr, value
                ),
                path.clone(),
            ));
        }
    }
}

/// Evaluate one standalone check against a candidate assignment.
///
/// The check's attr selector decides whether it governs this assignment at
/// all; null values are skipped (required-ness is the spec's concern).
pub fn evaluate_check(
    check: &CheckDef,
    node: &MetaNode,
    attr: &str,
    value: &Value,
    path: &NodePath,
    out: &mut Violations,
) {
    if !check.attr.matches(attr) || value.is_null() {
        return;
    }

    let passed = match &check.kind {
        CheckKind::Matches { pattern } => value
            .as_str()
            .map(|text| pattern.is_match(text))
            .unwrap_or(false),
        CheckKind::Range { min, max } => {
            min.as_ref().map_or(true, |min| value.gte(min))
                && max.as_ref().map_or(true, |max| value.lte(max))
        }
        CheckKind::OneOf { values } => values.contains(value),
        CheckKind::SiblingCompare { other, relation } => {
            match node.get_attr(other) {
                // Sibling not set yet, nothing to compare
                None | Some(Value::Null) => true,
                // Non-comparable kinds fail the check
                Some(sibling) => relation.eval(value, sibling).unwrap_or(false),
            }
        }
    };

    if !passed {
        out.push(Violation::new(
            check.id.clone(),
            format!("{} (got {})", check.message, value),
            path.clone(),
        ));
    }
}
