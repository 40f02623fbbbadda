//! Input-language statements
//!
//! Statement variants the statement emitter (§4.H) lowers, plus `Other`
//! for the same leniency reason as `Expr::Other`.

use super::expr::Expr;
use super::ty::Type;
use serde::{Deserialize, Serialize};

/// The destination of an `Assign`/`MoveAssign`, or the target of a
/// mutation context (§4.F).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Lvalue {
    Variable {
        name: String,
        ty: Type,
    },
    MapAccess {
        map: Box<Lvalue>,
        key: Expr,
        value_ty: Type,
    },
    SeqAccess {
        seq: Box<Lvalue>,
        index: Expr,
        elem_ty: Type,
    },
    NamedTupleAccess {
        tuple: Box<Lvalue>,
        field: String,
    },
    TupleAccess {
        tuple: Box<Lvalue>,
        index: usize,
    },
    /// Anything else that reached the lvalue emitter — always invalid.
    Invalid(String),
}

impl Lvalue {
    /// The statically declared type of this lvalue, where known. Used
    /// by the statement emitter to reject coercing assignments.
    pub fn declared_type(&self) -> Option<&Type> {
        match self {
            Lvalue::Variable { ty, .. } => Some(ty),
            Lvalue::MapAccess { value_ty, .. } => Some(value_ty),
            Lvalue::SeqAccess { elem_ty, .. } => Some(elem_ty),
            Lvalue::NamedTupleAccess { .. } | Lvalue::TupleAccess { .. } | Lvalue::Invalid(_) => None,
        }
    }
}

/// A function call target. Only static, non-receive-capable callees are
/// accepted by the statement emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callee {
    pub name: String,
    pub is_static: bool,
    pub can_receive: bool,
}

/// A statement in the input-language IR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Assign {
        target: Lvalue,
        value: Expr,
    },
    MoveAssign {
        target: Lvalue,
        value: Expr,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    Goto(String),
    Pop,
    Raise(Expr),
    Compound(Vec<Stmt>),
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    FunctionCall {
        callee: Callee,
        args: Vec<Expr>,
    },
    /// Any statement shape this generator does not recognize. Emitted
    /// as a skip comment rather than aborting generation.
    Other(String),
}
