//! Control-flow context (component D)
//!
//! An immutable bundle of (path-constraint scope, optional loop scope,
//! optional branch scope) threaded through statement emission by value
//! — cheap to clone, and child contexts simply shadow the parent's
//! path-constraint scope with a fresh one (invariant 3).

use crate::mint::{BranchScope, CompilationContext, LoopScope, PathConstraintScope};

#[derive(Debug, Clone)]
pub struct FlowContext {
    pub pc_scope: PathConstraintScope,
    pub loop_scope: Option<LoopScope>,
    pub branch_scope: Option<BranchScope>,
}

impl FlowContext {
    /// Fresh pc scope, no loop, no branch — the context a function body
    /// is emitted under.
    pub fn fresh_func_context(ctx: &mut CompilationContext) -> Self {
        Self {
            pc_scope: ctx.fresh_pc_scope(),
            loop_scope: None,
            branch_scope: None,
        }
    }

    /// Fresh pc scope and fresh loop scope; no branch — the context a
    /// loop body is emitted under.
    pub fn fresh_loop_context(ctx: &mut CompilationContext) -> Self {
        Self {
            pc_scope: ctx.fresh_pc_scope(),
            loop_scope: Some(ctx.fresh_loop_scope()),
            branch_scope: None,
        }
    }

    /// Fresh pc scope and fresh branch scope; loop scope inherited from
    /// `self` — the context one arm of an `if` is emitted under.
    pub fn fresh_branch_sub_context(&self, ctx: &mut CompilationContext) -> Self {
        Self {
            pc_scope: ctx.fresh_pc_scope(),
            loop_scope: self.loop_scope.clone(),
            branch_scope: Some(ctx.fresh_branch_scope()),
        }
    }

    pub fn with_pc_scope(&self, pc_scope: PathConstraintScope) -> Self {
        Self {
            pc_scope,
            loop_scope: self.loop_scope.clone(),
            branch_scope: self.branch_scope.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_context_has_no_branch_scope() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_loop_context(&mut ctx);
        assert!(flow.loop_scope.is_some());
        assert!(flow.branch_scope.is_none());
    }

    #[test]
    fn branch_sub_context_inherits_loop_scope() {
        let mut ctx = CompilationContext::new("Gen");
        let loop_flow = FlowContext::fresh_loop_context(&mut ctx);
        let branch_flow = loop_flow.fresh_branch_sub_context(&mut ctx);
        assert_eq!(
            branch_flow.loop_scope.as_ref().map(|l| &l.exits_list),
            loop_flow.loop_scope.as_ref().map(|l| &l.exits_list)
        );
        assert_ne!(branch_flow.pc_scope.var, loop_flow.pc_scope.var);
    }
}
