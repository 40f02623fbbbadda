//! Name mint & compilation context (component A)
//!
//! Fresh, pairwise-distinct identifiers for temporaries and scope
//! variables, plus the process-wide-per-job state (the operator-table
//! registry) threaded through emission by exclusive mutable reference —
//! no global state, per the re-architecture guidance in §9.

use crate::registry::OperatorTableRegistry;
use rustc_hash::FxHashMap;

/// Fixed symbol the BDD library handle is bound to in emitted code.
pub const BDD_VAR: &str = "bdd";
/// Fixed symbol the function's return accumulator is bound to.
pub const RETURN_ACCUMULATOR: &str = "returnAccumulator";

/// A path-constraint scope: the name of a target-level BDD-valued
/// variable representing the currently-live path constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConstraintScope {
    pub var: String,
}

impl PathConstraintScope {
    pub fn reference(&self) -> &str {
        &self.var
    }
}

/// A loop scope: the break-predicate accumulator and the early-return
/// propagation flag for one enclosing loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopScope {
    pub exits_list: String,
    pub early_return_flag: String,
}

/// A branch scope: the flag set by any control-flow-escaping
/// sub-statement executed within one branch of an `if`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchScope {
    pub jumped_out_flag: String,
}

/// Stable identifiers for input-language declarations, assigned on
/// first request and reused thereafter.
#[derive(Debug, Default)]
struct DeclNames {
    names: FxHashMap<String, String>,
}

/// Owns every mint counter and the operator-table registry for one
/// compilation job. Not `Sync`; independent jobs must each construct
/// their own context (§5).
pub struct CompilationContext {
    pub class_name: String,
    next_temp: u32,
    next_pc_scope: u32,
    next_loop_scope: u32,
    next_branch_scope: u32,
    decl_names: DeclNames,
    pub registry: OperatorTableRegistry,
}

impl CompilationContext {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            next_temp: 0,
            next_pc_scope: 0,
            next_loop_scope: 0,
            next_branch_scope: 0,
            decl_names: DeclNames::default(),
            registry: OperatorTableRegistry::new(),
        }
    }

    /// A fresh, unique identifier valid as a target-level local.
    pub fn fresh_temp_var(&mut self) -> String {
        let id = self.next_temp;
        self.next_temp += 1;
        format!("tmp{}", id)
    }

    /// A fresh path-constraint scope with a unique BDD-valued name.
    pub fn fresh_pc_scope(&mut self) -> PathConstraintScope {
        let id = self.next_pc_scope;
        self.next_pc_scope += 1;
        PathConstraintScope {
            var: format!("pc{}", id),
        }
    }

    /// A fresh loop scope with unique list/flag identifiers.
    pub fn fresh_loop_scope(&mut self) -> LoopScope {
        let id = self.next_loop_scope;
        self.next_loop_scope += 1;
        LoopScope {
            exits_list: format!("loopExits{}", id),
            early_return_flag: format!("loopEarlyReturn{}", id),
        }
    }

    /// A fresh branch scope with a unique flag identifier.
    pub fn fresh_branch_scope(&mut self) -> BranchScope {
        let id = self.next_branch_scope;
        self.next_branch_scope += 1;
        BranchScope {
            jumped_out_flag: format!("jumpedOut{}", id),
        }
    }

    /// A stable, collision-free identifier for an input-language
    /// declaration, minted once and reused on every subsequent call for
    /// the same `decl_key`.
    pub fn name_for_decl(&mut self, decl_key: &str) -> String {
        if let Some(name) = self.decl_names.names.get(decl_key) {
            return name.clone();
        }
        let name = mangle_var(decl_key);
        self.decl_names.names.insert(decl_key.to_string(), name.clone());
        name
    }

    /// Fixed, deterministic mangling of a source variable name into an
    /// emittable identifier. A pure function of `name`.
    pub fn get_var(&self, name: &str) -> String {
        mangle_var(name)
    }
}

/// Deterministic mangling: target identifiers must not collide with
/// reserved keywords of the (unspecified) target language, so every
/// source identifier is prefixed.
fn mangle_var(name: &str) -> String {
    format!("v_{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_names_are_pairwise_distinct() {
        let mut ctx = CompilationContext::new("Gen");
        let a = ctx.fresh_temp_var();
        let b = ctx.fresh_temp_var();
        assert_ne!(a, b);

        let pc1 = ctx.fresh_pc_scope();
        let pc2 = ctx.fresh_pc_scope();
        assert_ne!(pc1.var, pc2.var);
    }

    #[test]
    fn get_var_is_pure() {
        let ctx = CompilationContext::new("Gen");
        assert_eq!(ctx.get_var("x"), ctx.get_var("x"));
        assert_eq!(ctx.get_var("x"), "v_x");
    }

    #[test]
    fn decl_names_are_stable_across_calls() {
        let mut ctx = CompilationContext::new("Gen");
        let a = ctx.name_for_decl("foo");
        let b = ctx.name_for_decl("foo");
        assert_eq!(a, b);
    }
}
