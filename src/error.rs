//! Generator errors
//!
//! Exactly the three error kinds of the error handling design: an
//! unsupported construct, an invalid lvalue, and a registry shape
//! mismatch. All are synchronous and abort the whole generation — none
//! are recovered locally.

use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Debug, Error)]
pub enum GenError {
    /// A construct the core does not (yet) handle: foreign/receive-capable/
    /// non-static functions, equality/inequality operators, non-primitive
    /// binary operands, named/positional tuples, coercing assignments,
    /// non-boolean `if` conditions, non-literal-`true` `while` conditions,
    /// variables of `Null` type, or a type shape outside the enumerated
    /// set.
    #[error("unsupported construct in `{function}`: {detail}")]
    Unsupported { function: String, detail: String },

    /// An expression reached the lvalue emitter that cannot be an lvalue.
    #[error("invalid lvalue in `{function}`: {detail}")]
    InvalidLvalue { function: String, detail: String },

    /// An attempt to register operator-table entries for a type shape
    /// with no defined constructor. Should not occur if the type lifter
    /// is consistent with the registry.
    #[error("no operator-table constructor for type shape `{shape}`")]
    RegistryShape { shape: String },
}

impl GenError {
    pub fn unsupported(function: impl Into<String>, detail: impl Into<String>) -> Self {
        let function = function.into();
        let detail = detail.into();
        tracing::warn!(function = %function, detail = %detail, "unsupported construct");
        GenError::Unsupported { function, detail }
    }

    pub fn invalid_lvalue(function: impl Into<String>, detail: impl Into<String>) -> Self {
        let function = function.into();
        let detail = detail.into();
        tracing::warn!(function = %function, detail = %detail, "invalid lvalue");
        GenError::InvalidLvalue { function, detail }
    }

    pub fn registry_shape(shape: impl Into<String>) -> Self {
        let shape = shape.into();
        tracing::warn!(shape = %shape, "registry shape has no constructor");
        GenError::RegistryShape { shape }
    }
}
