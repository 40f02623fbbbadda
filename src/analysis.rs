//! Flow-analysis predicates (component E)
//!
//! Four syntactic predicates over statements, driving conservative
//! insertion of path-constraint liveness checks (§4.E).
//!
//! The `Must` predicate on `Compound` deliberately uses "any child"
//! rather than "some non-empty prefix-free suffix" — see the Open
//! Question decision in `DESIGN.md`. This is a known inherited
//! over/under-approximation, preserved on purpose.

use crate::ir::Stmt;

/// Can `s` transfer control via an early `return`?
pub fn can_early_return(s: &Stmt) -> bool {
    match s {
        Stmt::Return(_) | Stmt::Goto(_) | Stmt::Pop | Stmt::Raise(_) => true,
        Stmt::Break | Stmt::Continue => false,
        Stmt::Compound(children) => children.iter().any(can_early_return),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => can_early_return(then_branch) || can_early_return(else_branch),
        Stmt::While { body, .. } => can_early_return(body),
        Stmt::Assign { .. }
        | Stmt::MoveAssign { .. }
        | Stmt::FunctionCall { .. }
        | Stmt::Other(_) => false,
    }
}

/// Must `s` transfer control via an early `return` on every path
/// through it?
pub fn must_early_return(s: &Stmt) -> bool {
    match s {
        Stmt::Return(_) | Stmt::Goto(_) | Stmt::Pop | Stmt::Raise(_) => true,
        Stmt::Break | Stmt::Continue => false,
        // Inherited behaviour: "any child" rather than the stricter,
        // logically correct "exists i such that child_i must, and every
        // statement at or after i is unreachable on the path where it
        // doesn't". See DESIGN.md.
        Stmt::Compound(children) => children.iter().any(must_early_return),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => must_early_return(then_branch) && must_early_return(else_branch),
        Stmt::While { body, .. } => must_early_return(body),
        Stmt::Assign { .. }
        | Stmt::MoveAssign { .. }
        | Stmt::FunctionCall { .. }
        | Stmt::Other(_) => false,
    }
}

/// Can `s` transfer control out of its immediately enclosing loop
/// (via `break`, or by escaping further via `return`/`goto`/etc.)?
pub fn can_jump_out(s: &Stmt) -> bool {
    match s {
        Stmt::Return(_) | Stmt::Goto(_) | Stmt::Pop | Stmt::Raise(_) => true,
        Stmt::Break | Stmt::Continue => true,
        Stmt::Compound(children) => children.iter().any(can_jump_out),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => can_jump_out(then_branch) || can_jump_out(else_branch),
        // break/continue within the loop are absorbed by it and
        // therefore do not escape it; only an early return propagates.
        Stmt::While { body, .. } => can_early_return(body),
        Stmt::Assign { .. }
        | Stmt::MoveAssign { .. }
        | Stmt::FunctionCall { .. }
        | Stmt::Other(_) => false,
    }
}

/// Must `s` transfer control out of its immediately enclosing loop?
pub fn must_jump_out(s: &Stmt) -> bool {
    match s {
        Stmt::Return(_) | Stmt::Goto(_) | Stmt::Pop | Stmt::Raise(_) => true,
        Stmt::Break | Stmt::Continue => true,
        Stmt::Compound(children) => children.iter().any(must_jump_out),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => must_jump_out(then_branch) && must_jump_out(else_branch),
        Stmt::While { body, .. } => must_early_return(body),
        Stmt::Assign { .. }
        | Stmt::MoveAssign { .. }
        | Stmt::FunctionCall { .. }
        | Stmt::Other(_) => false,
    }
}
