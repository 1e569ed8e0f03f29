//! Type descriptors and the hard-coded type catalogue.
//!
//! A [`TypeDescriptor`] is a type name tagged with condition sets, one per
//! axis. [`TypeDescriptor::guard_expression`] folds those sets into the
//! conditional-compilation predicate a template wraps around code that uses
//! the type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::{Architecture, AxisKind, Condition, ConditionAxis};

/// Guard used for types that are always available.
pub const ALWAYS: &str = "true";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a target-language type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName(pub String);

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// ConditionSet
// ---------------------------------------------------------------------------

/// The values a type is restricted to on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    pub axis: AxisKind,
    pub values: Vec<Condition>,
}

impl ConditionSet {
    /// OR-join of the set's predicates, or `None` when the set is empty.
    fn disjunction(&self) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let predicates: Vec<String> = self.values.iter().map(Condition::predicate).collect();
        Some(predicates.join(" || "))
    }
}

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// A named type and the conditions under which it exists.
///
/// Condition sets keep the order in which their axes were first added; that
/// order is the order of the `&&` clauses in the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: TypeName,
    #[serde(default)]
    pub conditions: Vec<ConditionSet>,
}

impl TypeDescriptor {
    /// An unconditionally available type.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self { name: name.into(), conditions: Vec::new() }
    }

    /// Restrict the type to `values` on axis `A`.
    ///
    /// Repeated calls for the same axis extend its set. Passing an empty
    /// slice still records the axis, marking the type conditional in intent.
    pub fn conditional_on<A>(mut self, values: &[A]) -> Self
    where
        A: ConditionAxis + Into<Condition>,
    {
        let values = values.iter().map(|v| (*v).into());
        match self.conditions.iter_mut().find(|set| set.axis == A::KIND) {
            Some(set) => set.values.extend(values),
            None => self.conditions.push(ConditionSet {
                axis: A::KIND,
                values: values.collect(),
            }),
        }
        self
    }

    /// `true` iff any condition set has at least one value.
    pub fn is_conditional(&self) -> bool {
        self.conditions.iter().any(|set| !set.values.is_empty())
    }

    /// Synthesize the guard expression for this type.
    ///
    /// Each axis contributes the `||`-join of its predicates; axes are joined
    /// with `&&`. No parentheses are inserted, so
    /// `os(macOS) || os(Linux) && arch(arm64)` is emitted verbatim.
    ///
    /// A type with condition sets that are all empty yields [`ALWAYS`] and logs
    /// a warning.
    pub fn guard_expression(&self) -> String {
        let clauses: Vec<String> = self
            .conditions
            .iter()
            .filter_map(ConditionSet::disjunction)
            .collect();
        if clauses.is_empty() {
            if !self.conditions.is_empty() {
                tracing::warn!(type_name = %self.name, "conditional type with no predicate");
            }
            return ALWAYS.to_string();
        }
        clauses.join(" && ")
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// MatrixType
// ---------------------------------------------------------------------------

/// A matrix implementation under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixType {
    pub descriptor: TypeDescriptor,
    /// Storage is one contiguous buffer. Does not affect the guard.
    #[serde(default)]
    pub contiguous: bool,
}

impl MatrixType {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self { descriptor: TypeDescriptor::new(name), contiguous: false }
    }

    pub fn contiguous(mut self) -> Self {
        self.contiguous = true;
        self
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.descriptor.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// TypeCatalogue
// ---------------------------------------------------------------------------

/// The fixed set of types templates are specialized over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCatalogue {
    pub scalar_types: Vec<TypeDescriptor>,
    pub matrix_types: Vec<MatrixType>,
}

impl TypeCatalogue {
    /// The built-in catalogue: every fixed-width integer, the floating-point
    /// types, `Float80` on x86 only, and both matrix storage kinds.
    pub fn standard() -> Self {
        let mut scalar_types = Vec::new();
        for length in ["", "8", "16", "32", "64"] {
            for sign in ["", "U"] {
                scalar_types.push(TypeDescriptor::new(format!("{sign}Int{length}")));
            }
        }
        scalar_types.push(TypeDescriptor::new("Float"));
        scalar_types.push(TypeDescriptor::new("Double"));
        scalar_types.push(TypeDescriptor::new("Float80").conditional_on(Architecture::X86));

        let matrix_types = vec![
            MatrixType::new("BasicMatrix"),
            MatrixType::new("ContiguousMatrix").contiguous(),
        ];

        Self { scalar_types, matrix_types }
    }
}

impl Default for TypeCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
