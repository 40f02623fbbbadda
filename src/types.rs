//! Type lifter (component B)
//!
//! Maps input-language types to symbolic target-type expressions and
//! their companion operator-table types, per §4.B.

use crate::error::{GenError, GenResult};
use crate::ir::Type;

/// Render `t`'s symbolic (value-summary) target type.
///
/// `in_var_position` distinguishes a type used to declare a variable
/// (where `Null` is never legal) from one used only structurally, e.g.
/// as a function's return type.
pub fn symbolic_of(t: &Type, in_var_position: bool) -> GenResult<String> {
    match t {
        Type::Bool => Ok("PrimVS<Bdd, Boolean>".to_string()),
        Type::Int => Ok("PrimVS<Bdd, Integer>".to_string()),
        Type::Float => Ok("PrimVS<Bdd, Float>".to_string()),
        Type::Null => {
            if in_var_position {
                Err(GenError::unsupported("<type-lifter>", "variable of type Null"))
            } else {
                Ok("void".to_string())
            }
        }
        Type::Sequence(elem) => Ok(format!("ListVS<Bdd, {}>", symbolic_of(elem, true)?)),
        Type::Map(key, value) => Ok(format!(
            "MapVS<Bdd, {}, {}>",
            concrete_boxed_of(key)?,
            symbolic_of(value, true)?
        )),
        Type::NamedTuple(_) | Type::PositionalTuple(_) => {
            Err(GenError::unsupported("<type-lifter>", format!("symbolic type for {}", t)))
        }
    }
}

/// Render `t`'s boxed concrete (non-value-summary) target type, used for
/// map keys which are never themselves symbolic.
pub fn concrete_boxed_of(t: &Type) -> GenResult<String> {
    match t {
        Type::Bool => Ok("Boolean".to_string()),
        Type::Int => Ok("Integer".to_string()),
        Type::Float => Ok("Float".to_string()),
        Type::Null => Err(GenError::unsupported("<type-lifter>", "boxed concrete type for Null")),
        Type::Sequence(_) | Type::Map(_, _) => {
            Err(GenError::unsupported("<type-lifter>", format!("boxed concrete type for {}", t)))
        }
        Type::NamedTuple(_) | Type::PositionalTuple(_) => {
            Err(GenError::unsupported("<type-lifter>", format!("boxed concrete type for {}", t)))
        }
    }
}

/// Render `t`'s operator-table type: the same shape as `symbolic_of`
/// with each value-summary type substituted by its `.Ops` companion.
pub fn ops_type_of(t: &Type) -> GenResult<String> {
    match t {
        Type::Bool => Ok("PrimVS.Ops<Bdd, Boolean>".to_string()),
        Type::Int => Ok("PrimVS.Ops<Bdd, Integer>".to_string()),
        Type::Float => Ok("PrimVS.Ops<Bdd, Float>".to_string()),
        Type::Sequence(elem) => Ok(format!("ListVS.Ops<Bdd, {}>", symbolic_of(elem, true)?)),
        Type::Map(key, value) => Ok(format!(
            "MapVS.Ops<Bdd, {}, {}>",
            concrete_boxed_of(key)?,
            symbolic_of(value, true)?
        )),
        Type::Null => Err(GenError::unsupported("<type-lifter>", "operator table for Null")),
        Type::NamedTuple(_) | Type::PositionalTuple(_) => {
            Err(GenError::unsupported("<type-lifter>", format!("operator table for {}", t)))
        }
    }
}

/// Render the constructor expression that builds the operator-table
/// instance for `t`, recursively registering any element/value ops it
/// depends on via `registry` (§4.C: dependent requests must be
/// registered before the containing shape's definition uses them).
pub fn ops_ctor_of(t: &Type, registry: &mut crate::registry::OperatorTableRegistry) -> GenResult<String> {
    match t {
        Type::Bool | Type::Int | Type::Float => Ok("new PrimVS.Ops<>(bdd)".to_string()),
        Type::Sequence(elem) => {
            let elem_name = registry.register_for(elem)?;
            Ok(format!("new ListVS.Ops<>(bdd, {})", elem_name))
        }
        Type::Map(_, value) => {
            let value_name = registry.register_for(value)?;
            Ok(format!("new MapVS.Ops<>(bdd, {})", value_name))
        }
        Type::Null => Err(GenError::registry_shape(t.to_string())),
        Type::NamedTuple(_) | Type::PositionalTuple(_) => Err(GenError::registry_shape(t.to_string())),
    }
}
