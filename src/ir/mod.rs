//! Typed input IR
//!
//! The data model the generator consumes, per the Data Model section:
//! a closed type universe (`ty`), expressions (`expr`), statements
//! (`stmt`), and declarations (`decl`). Parsing, scope resolution, and
//! IR construction are external collaborators — this crate only reads
//! these types.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{Decl, Function, Local, Param};
pub use expr::{BinOp, Expr};
pub use stmt::{Callee, Lvalue, Stmt};
pub use ty::Type;

use serde::{Deserialize, Serialize};

/// The global scope enumerating a compilation unit's declarations.
///
/// Enumeration order here is the order declarations are emitted in
/// (§5: the emitted artifact is a pure function of the IR provided
/// declaration enumeration is deterministic).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalScope {
    pub decls: Vec<Decl>,
}

impl GlobalScope {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls }
    }
}
