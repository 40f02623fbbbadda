//! Input-language expressions
//!
//! Expression variants the generator lifts into value-summary form
//! (§4.G), plus `Other` so unknown variants degrade to a skip comment
//! rather than aborting generation (§7).

use super::ty::Type;
use serde::{Deserialize, Serialize};

/// A binary operator over primitive value summaries.
///
/// `Eq`/`Ne` are representable so the "not yet supported" rejection in
/// §4.G has a concrete input to reject against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Eq,
    Ne,
}

impl BinOp {
    /// `true` for the operators §4.G explicitly defers support for.
    pub fn is_supported(self) -> bool {
        !matches!(self, BinOp::Eq | BinOp::Ne)
    }

    /// `true` for operators whose result is always `bool`, regardless
    /// of operand type — the comparison and logical operators.
    pub fn produces_bool(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::And | BinOp::Or | BinOp::Eq | BinOp::Ne
        )
    }

    /// The target-level infix symbol used in the `map2` lambda body.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An expression in the input-language IR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// Pass-through: clone has no effect at this level.
    Clone(Box<Expr>),
    BinaryOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    BoolLit(bool),
    IntLit(i64),
    FloatLit(f64),
    /// The zero value of a type: `false`, `0`, `0.0`, empty sequence/map.
    Default(Type),
    MapAccess {
        map: Box<Expr>,
        key: Box<Expr>,
        value_ty: Type,
    },
    SeqAccess {
        seq: Box<Expr>,
        index: Box<Expr>,
        elem_ty: Type,
    },
    VariableAccess {
        name: String,
        ty: Type,
    },
    LinearAccessRef {
        name: String,
        ty: Type,
    },
    /// Any expression shape this generator does not recognize. Emitted
    /// as a skip comment rather than aborting generation.
    Other(String),
}

/// The type of any `BinOp` that `produces_bool` — used so `static_type`
/// can hand back a `&Type` without owning one.
const BOOL: Type = Type::Bool;

impl Expr {
    /// Best-effort static type of this expression, for call sites that
    /// need it (the lvalue/statement emitters carry types on their own
    /// side, so this is only used where an expression's type cannot be
    /// inferred from context).
    pub fn static_type(&self) -> Option<&Type> {
        match self {
            Expr::VariableAccess { ty, .. } | Expr::LinearAccessRef { ty, .. } => Some(ty),
            Expr::Default(ty) => Some(ty),
            Expr::MapAccess { value_ty, .. } => Some(value_ty),
            Expr::SeqAccess { elem_ty, .. } => Some(elem_ty),
            Expr::Clone(inner) => inner.static_type(),
            Expr::BinaryOp { op, .. } if op.produces_bool() => Some(&BOOL),
            _ => None,
        }
    }
}
