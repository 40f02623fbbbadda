//! Input-language types
//!
//! The closed type universe the generator accepts, per the data model.
//! Types reaching the emitter must already be canonical (invariant 1);
//! [`Type::canonicalize`] is provided so a host can normalize a raw IR
//! before handing it to [`crate::generate`].

use serde::{Deserialize, Serialize};

/// A type in the input language's closed type universe.
///
/// `NamedTuple` and `PositionalTuple` exist so a host IR can represent
/// them; the emitter rejects both with `GenError::Unsupported` (they are
/// explicit non-goals), but modeling them keeps `canonicalize` total and
/// the type lifter's unsupported branch reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int,
    Float,
    Null,
    Sequence(Box<Type>),
    Map(Box<Type>, Box<Type>),
    NamedTuple(Vec<(String, Type)>),
    PositionalTuple(Vec<Type>),
}

impl Type {
    /// Normalize a type to its canonical form.
    ///
    /// For this type universe canonicalization is structural recursion:
    /// every variant is already in normal form once its children are.
    pub fn canonicalize(&self) -> Type {
        match self {
            Type::Bool | Type::Int | Type::Float | Type::Null => self.clone(),
            Type::Sequence(elem) => Type::Sequence(Box::new(elem.canonicalize())),
            Type::Map(key, value) => {
                Type::Map(Box::new(key.canonicalize()), Box::new(value.canonicalize()))
            }
            Type::NamedTuple(fields) => Type::NamedTuple(
                fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.canonicalize()))
                    .collect(),
            ),
            Type::PositionalTuple(elems) => {
                Type::PositionalTuple(elems.iter().map(Type::canonicalize).collect())
            }
        }
    }

    /// Types the type lifter (`crate::types`) knows how to lift.
    pub fn is_supported_shape(&self) -> bool {
        match self {
            Type::Bool | Type::Int | Type::Float | Type::Null => true,
            Type::Sequence(elem) => elem.is_supported_shape(),
            Type::Map(key, value) => key.is_supported_shape() && value.is_supported_shape(),
            Type::NamedTuple(_) | Type::PositionalTuple(_) => false,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Null => write!(f, "null"),
            Type::Sequence(elem) => write!(f, "seq<{}>", elem),
            Type::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            Type::NamedTuple(fields) => {
                let rendered: Vec<String> =
                    fields.iter().map(|(n, t)| format!("{}: {}", n, t)).collect();
                write!(f, "tuple{{{}}}", rendered.join(", "))
            }
            Type::PositionalTuple(elems) => {
                let rendered: Vec<String> = elems.iter().map(|t| t.to_string()).collect();
                write!(f, "tuple({})", rendered.join(", "))
            }
        }
    }
}
