//! Binary decision variables.

use std::fmt;

/// Dense index of a variable within a [`BinaryModel`](super::BinaryModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A 0/1 decision variable.
#[derive(Debug, Clone)]
pub struct BinaryVar {
    /// Variable name, used in diagnostics only.
    pub name: String,
    /// Fixed value, if any.
    pub fixed: Option<bool>,
}

impl BinaryVar {
    /// Creates a free binary variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed: None,
        }
    }

    /// Creates a binary variable fixed to `value`.
    pub fn fixed(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            fixed: Some(value),
        }
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }
}
