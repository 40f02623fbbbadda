//! Top-level declarations
//!
//! Only `Decl::Function` is walked by the function/module emitter
//! (§4.I); every other declaration a host IR might carry is expected to
//! already be normalized to `Decl::Skipped` before it reaches this
//! crate, which the module emitter renders as the skip comment from
//! §6 Output item 2.

use super::stmt::Stmt;
use super::ty::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Local {
    pub name: String,
    pub ty: Type,
}

/// A function declaration.
///
/// Invariant 2: a `Function` reaching the emitter must have `owner ==
/// None` and `can_receive == false`; either violation is
/// `GenError::Unsupported`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub owner: Option<String>,
    pub can_receive: bool,
    pub is_foreign: bool,
    pub params: Vec<Param>,
    pub return_ty: Type,
    pub locals: Vec<Local>,
    pub body: Stmt,
}

/// A top-level declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decl {
    Function(Function),
    /// A declaration shape the module emitter does not handle; the
    /// `String` is rendered verbatim into the skip comment.
    Skipped(String),
}
