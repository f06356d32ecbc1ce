//! Schema definition types.

use std::collections::HashMap;
use std::fmt;
use trellis_core::{Pattern, PatternError, TypeIdent, Value};

/// Attribute declaration within a type.
///
/// The inline constraint fields (match pattern, range, allowed values) are
/// validation constraints that travel with the attribute through
/// inheritance.
#[derive(Debug, Clone)]
pub struct AttrSpec {
    /// Attribute name.
    pub name: String,
    /// Value kind name (String, Int, Float, Bool, List).
    pub value_type: String,
    /// Whether this attribute must be present and non-null.
    pub required: bool,
    /// Match pattern constraint for string values.
    pub match_pattern: Option<Pattern>,
    /// Minimum value constraint (for Int, Float).
    pub min: Option<Value>,
    /// Maximum value constraint (for Int, Float).
    pub max: Option<Value>,
    /// Allowed values (enumerated-set constraint).
    pub allowed_values: Option<Vec<Value>>,
}

impl AttrSpec {
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            required: false,
            match_pattern: None,
            min: None,
            max: None,
            allowed_values: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_range(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        // Merge rather than replace: only update if Some is provided
        if min.is_some() {
            self.min = min;
        }
        if max.is_some() {
            self.max = max;
        }
        self
    }

    pub fn with_match_pattern(mut self, pattern: Pattern) -> Self {
        self.match_pattern = Some(pattern);
        self
    }

    pub fn with_allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }
}

/// Selector over one part of a type identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// Matches any value of the part.
    Any,
    /// Matches exactly the given value.
    Exact(String),
}

impl TypeSpec {
    pub fn exact(part: impl Into<String>) -> Self {
        TypeSpec::Exact(part.into())
    }

    /// Whether this selector matches the given identifier part.
    pub fn matches(&self, part: &str) -> bool {
        match self {
            TypeSpec::Any => true,
            TypeSpec::Exact(expected) => expected == part,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TypeSpec::Any)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Any => write!(f, "*"),
            TypeSpec::Exact(part) => write!(f, "{}", part),
        }
    }
}

/// Selector over a node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSpec {
    /// Matches any name.
    Any,
    /// Matches exactly the given name.
    Exact(String),
    /// Matches names accepted by the compiled pattern.
    Pattern(Pattern),
}

impl NameSpec {
    pub fn exact(name: impl Into<String>) -> Self {
        NameSpec::Exact(name.into())
    }

    /// Compile a pattern selector from regex source.
    pub fn pattern(source: impl Into<String>) -> Result<Self, PatternError> {
        Ok(NameSpec::Pattern(Pattern::new(source)?))
    }

    /// Whether this selector matches the given name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameSpec::Any => true,
            NameSpec::Exact(expected) => expected == name,
            NameSpec::Pattern(pattern) => pattern.is_match(name),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, NameSpec::Any)
    }
}

impl fmt::Display for NameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSpec::Any => write!(f, "*"),
            NameSpec::Exact(name) => write!(f, "{}", name),
            NameSpec::Pattern(pattern) => write!(f, "/{}/", pattern),
        }
    }
}

/// Accepts-children declaration owned by a parent type: which child types,
/// under which names, this type permits beneath itself.
#[derive(Debug, Clone)]
pub struct ChildRule {
    /// Category selector for the child type.
    pub category: TypeSpec,
    /// Variant selector for the child type.
    pub variant: TypeSpec,
    /// Selector for the child's name.
    pub name: NameSpec,
}

impl ChildRule {
    pub fn new(category: TypeSpec, variant: TypeSpec, name: NameSpec) -> Self {
        Self {
            category,
            variant,
            name,
        }
    }

    /// Rule accepting any child under any name.
    pub fn any() -> Self {
        Self::new(TypeSpec::Any, TypeSpec::Any, NameSpec::Any)
    }

    /// Whether this rule sanctions the given child type and name.
    pub fn matches(&self, child: &TypeIdent, child_name: &str) -> bool {
        self.category.matches(child.category())
            && self.variant.matches(child.variant())
            && self.name.matches(child_name)
    }
}

/// Accepts-parents declaration owned by a child type: under which parent
/// types, and carrying which names, this type may legally appear.
#[derive(Debug, Clone)]
pub struct ParentRule {
    /// Category selector for the parent type.
    pub category: TypeSpec,
    /// Variant selector for the parent type.
    pub variant: TypeSpec,
    /// Selector for the name this child must carry.
    pub child_name: NameSpec,
}

impl ParentRule {
    pub fn new(category: TypeSpec, variant: TypeSpec, child_name: NameSpec) -> Self {
        Self {
            category,
            variant,
            child_name,
        }
    }

    /// Rule accepting any parent under any name.
    pub fn any() -> Self {
        Self::new(TypeSpec::Any, TypeSpec::Any, NameSpec::Any)
    }

    /// Whether this rule sanctions appearing under the given parent type
    /// with the given name.
    pub fn matches(&self, parent: &TypeIdent, child_name: &str) -> bool {
        self.category.matches(parent.category())
            && self.variant.matches(parent.variant())
            && self.child_name.matches(child_name)
    }
}

/// Two-part type pattern used by explicit rules.
#[derive(Debug, Clone)]
pub struct TypePattern {
    pub category: TypeSpec,
    pub variant: TypeSpec,
}

impl TypePattern {
    pub fn new(category: TypeSpec, variant: TypeSpec) -> Self {
        Self { category, variant }
    }

    /// Matches any type.
    pub fn any() -> Self {
        Self::new(TypeSpec::Any, TypeSpec::Any)
    }

    /// Matches every variant of one category (`category.*`).
    pub fn category(category: impl Into<String>) -> Self {
        Self::new(TypeSpec::exact(category), TypeSpec::Any)
    }

    /// Matches exactly one type.
    pub fn exact(category: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::new(TypeSpec::exact(category), TypeSpec::exact(variant))
    }

    pub fn matches(&self, ident: &TypeIdent) -> bool {
        self.category.matches(ident.category()) && self.variant.matches(ident.variant())
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.variant)
    }
}

/// Verdict of an explicit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Forbid,
}

/// A directly authored placement rule, outside the inheritance hierarchy.
///
/// Explicit rules fine-tune what the declared hierarchy would otherwise
/// permit: a Forbid overrides every other source, an Allow is an
/// additional grant.
#[derive(Debug, Clone)]
pub struct ExplicitRule {
    /// Stable identifier carried into violations.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Pattern over the parent type.
    pub parent: TypePattern,
    /// Pattern over the child type.
    pub child: TypePattern,
    /// Selector for the child's name.
    pub child_name: NameSpec,
    /// Allow or Forbid.
    pub verdict: Verdict,
}

impl ExplicitRule {
    pub fn allow(
        id: impl Into<String>,
        description: impl Into<String>,
        parent: TypePattern,
        child: TypePattern,
        child_name: NameSpec,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            parent,
            child,
            child_name,
            verdict: Verdict::Allow,
        }
    }

    pub fn forbid(
        id: impl Into<String>,
        description: impl Into<String>,
        parent: TypePattern,
        child: TypePattern,
        child_name: NameSpec,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            parent,
            child,
            child_name,
            verdict: Verdict::Forbid,
        }
    }

    /// Whether this rule applies to the given placement.
    pub fn matches(&self, parent: &TypeIdent, child: &TypeIdent, child_name: &str) -> bool {
        self.parent.matches(parent)
            && self.child.matches(child)
            && self.child_name.matches(child_name)
    }
}

/// Comparison operator for cross-field checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Evaluate the relation between two values.
    ///
    /// Returns None when the values have no meaningful order; the caller
    /// reports that as a failed check rather than guessing.
    pub fn eval(&self, left: &Value, right: &Value) -> Option<bool> {
        use std::cmp::Ordering;
        match self {
            CompareOp::Eq => Some(left == right),
            CompareOp::Ne => Some(left != right),
            CompareOp::Lt => Some(left.compare(right)? == Ordering::Less),
            CompareOp::Le => Some(left.compare(right)? != Ordering::Greater),
            CompareOp::Gt => Some(left.compare(right)? == Ordering::Greater),
            CompareOp::Ge => Some(left.compare(right)? != Ordering::Less),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// The shape of a standalone validation check.
#[derive(Debug, Clone)]
pub enum CheckKind {
    /// String value must match the pattern.
    Matches { pattern: Pattern },
    /// Numeric value must fall inside the bounds.
    Range {
        min: Option<Value>,
        max: Option<Value>,
    },
    /// Value must be a member of the set.
    OneOf { values: Vec<Value> },
    /// Value must stand in the relation to a sibling attribute.
    SiblingCompare { other: String, relation: CompareOp },
}

/// A standalone validation check attached to a type.
///
/// Checks are inherited by descendants the same way placement declarations
/// are; the attr selector picks which attribute assignments they govern.
#[derive(Debug, Clone)]
pub struct CheckDef {
    /// Stable identifier carried into violations.
    pub id: String,
    /// Which attribute names this check governs.
    pub attr: NameSpec,
    /// What the check verifies.
    pub kind: CheckKind,
    /// Message reported on failure.
    pub message: String,
}

impl CheckDef {
    pub fn new(
        id: impl Into<String>,
        attr: NameSpec,
        kind: CheckKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            attr,
            kind,
            message: message.into(),
        }
    }
}

/// Type definition: one entry of the registry catalog.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// The type's identifier.
    pub ident: TypeIdent,
    /// Single-inheritance parent, resolved at seal time.
    pub parent: Option<TypeIdent>,
    /// Human-readable description.
    pub description: String,
    /// Attribute declarations by name.
    pub attributes: HashMap<String, AttrSpec>,
    /// Accepts-children declarations.
    pub child_rules: Vec<ChildRule>,
    /// Accepts-parents declarations.
    pub parent_rules: Vec<ParentRule>,
    /// Standalone validation checks.
    pub checks: Vec<CheckDef>,
}

impl TypeDef {
    pub fn new(ident: TypeIdent) -> Self {
        Self {
            ident,
            parent: None,
            description: String::new(),
            attributes: HashMap::new(),
            child_rules: Vec::new(),
            parent_rules: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Declare the parent type.
    pub fn extends(mut self, parent: TypeIdent) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add an attribute declaration.
    pub fn attr(mut self, spec: AttrSpec) -> Self {
        self.attributes.insert(spec.name.clone(), spec);
        self
    }

    /// Add an accepts-children declaration.
    pub fn accepts_child(mut self, rule: ChildRule) -> Self {
        self.child_rules.push(rule);
        self
    }

    /// Add an accepts-parents declaration.
    pub fn accepts_parent(mut self, rule: ParentRule) -> Self {
        self.parent_rules.push(rule);
        self
    }

    /// Add a standalone validation check.
    pub fn check(mut self, def: CheckDef) -> Self {
        self.checks.push(def);
        self
    }

    /// Get an attribute declaration by name (direct, not inherited).
    pub fn get_attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attributes.get(name)
    }

    /// Check if this type directly declares an attribute.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}
