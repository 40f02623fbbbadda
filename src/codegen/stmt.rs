//! Statement emitter (component H) — the path-constraint protocol
//!
//! Central invariant: at every point of emission, exactly one
//! path-constraint variable is live, and every side effect executed by
//! the emitted code must be guarded by it (§4.H).

use crate::analysis::{can_jump_out, must_jump_out};
use crate::codegen::expr::{emit_expr, literal_type};
use crate::codegen::lvalue::emit_mutation;
use crate::codegen::FuncMeta;
use crate::error::{GenError, GenResult};
use crate::flow::FlowContext;
use crate::ir::{Expr, Stmt, Type};
use crate::mint::{CompilationContext, BDD_VAR, RETURN_ACCUMULATOR};
use crate::sink::Sink;

/// Lower one statement, updating `flow`'s path constraint and scope
/// flags per the protocol this module implements.
pub fn emit_stmt(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    stmt: &Stmt,
) -> GenResult<()> {
    match stmt {
        Stmt::Assign { target, value } | Stmt::MoveAssign { target, value } => {
            emit_assign(ctx, flow, function, sink, target, value)
        }
        Stmt::Return(value) => emit_return(ctx, flow, function, sink, value.as_ref()),
        Stmt::Break => emit_break(flow, function, sink),
        Stmt::Continue => emit_continue(flow, function, sink),
        Stmt::Compound(children) => emit_compound(ctx, flow, function, sink, children),
        Stmt::While { cond, body } => emit_while(ctx, flow, function, sink, cond, body),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => emit_if(ctx, flow, function, sink, cond, then_branch, else_branch),
        Stmt::FunctionCall { callee, args } => emit_call(ctx, flow, function, sink, callee, args),
        Stmt::Goto(label) => {
            sink.line(format!("// unsupported: goto {}", label));
            Ok(())
        }
        Stmt::Pop => {
            sink.line("// unsupported: pop");
            Ok(())
        }
        Stmt::Raise(_) => {
            sink.line("// unsupported: raise");
            Ok(())
        }
        Stmt::Other(desc) => {
            sink.line(format!("// unsupported statement: {}", desc));
            Ok(())
        }
    }
}

fn emit_assign(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    target: &crate::ir::Lvalue,
    value: &Expr,
) -> GenResult<()> {
    if let (Some(target_ty), Some(value_ty)) = (target.declared_type(), literal_type(value)) {
        if *target_ty != value_ty {
            return Err(GenError::unsupported(
                function.name,
                format!("coercing assignment from {} to {}", value_ty, target_ty),
            ));
        }
    }

    let value = value.clone();
    let function_name = function.name.to_string();
    let mutator = Box::new(move |ctx: &mut CompilationContext, flow: &FlowContext, sink: &mut Sink, temp: &str| {
        let rhs = emit_expr(ctx, flow, &function_name, &value)?;
        sink.line(format!("{} = {};", temp, rhs));
        Ok(())
    });
    emit_mutation(ctx, flow, function.name, sink, target, false, mutator)
}

fn emit_return(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    value: Option<&Expr>,
) -> GenResult<()> {
    match (value, function.return_ty) {
        (Some(expr), ty) if *ty != Type::Null => {
            let value_text = emit_expr(ctx, flow, function.name, expr)?;
            let ops = ctx.registry.register_for(ty)?;
            sink.line(format!(
                "{acc} = {ops}.merge2({acc}, {val});",
                acc = RETURN_ACCUMULATOR,
                ops = ops,
                val = value_text
            ));
        }
        (None, Type::Null) => {}
        _ => {
            return Err(GenError::unsupported(
                function.name,
                "return value presence does not match function return type",
            ))
        }
    }

    sink.line(format!("{} = {}.constFalse();", flow.pc_scope.reference(), BDD_VAR));
    if let Some(loop_scope) = &flow.loop_scope {
        sink.line(format!("{} = true;", loop_scope.early_return_flag));
    }
    if let Some(branch_scope) = &flow.branch_scope {
        sink.line(format!("{} = true;", branch_scope.jumped_out_flag));
    }
    Ok(())
}

fn emit_break(flow: &FlowContext, function: FuncMeta, sink: &mut Sink) -> GenResult<()> {
    let loop_scope = flow
        .loop_scope
        .as_ref()
        .ok_or_else(|| GenError::unsupported(function.name, "break outside of any loop"))?;
    sink.line(format!("{}.add({});", loop_scope.exits_list, flow.pc_scope.reference()));
    if let Some(branch_scope) = &flow.branch_scope {
        sink.line(format!("{} = true;", branch_scope.jumped_out_flag));
    }
    sink.line(format!("{} = {}.constFalse();", flow.pc_scope.reference(), BDD_VAR));
    Ok(())
}

fn emit_continue(flow: &FlowContext, function: FuncMeta, sink: &mut Sink) -> GenResult<()> {
    if flow.loop_scope.is_none() {
        return Err(GenError::unsupported(function.name, "continue outside of any loop"));
    }
    // Continue kills this path's share of the current pc; the surviving
    // paths rejoin at the top of the enclosing while's condition check
    // implicitly, with no explicit jump emitted.
    sink.line(format!("{} = {}.constFalse();", flow.pc_scope.reference(), BDD_VAR));
    Ok(())
}

fn emit_compound(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    children: &[Stmt],
) -> GenResult<()> {
    let mut open_blocks = 0usize;
    for child in children {
        emit_stmt(ctx, flow, function, sink, child)?;
        if must_jump_out(child) {
            break;
        }
        if can_jump_out(child) {
            sink.line(format!("if (!{}.isConstFalse({})) {{", BDD_VAR, flow.pc_scope.reference()));
            sink.push_indent();
            open_blocks += 1;
        }
    }
    for _ in 0..open_blocks {
        sink.pop_indent();
        sink.line("}");
    }
    Ok(())
}

fn emit_while(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    cond: &Expr,
    body: &Stmt,
) -> GenResult<()> {
    // Corrected semantics (§9 open question): the condition must be the
    // literal `true`; anything else is rejected. The source's inverted
    // check is deliberately not reproduced.
    if !matches!(cond, Expr::BoolLit(true)) {
        return Err(GenError::unsupported(function.name, "while condition must be the literal `true`"));
    }

    let loop_flow = FlowContext::fresh_loop_context(ctx);
    let loop_scope = loop_flow
        .loop_scope
        .clone()
        .expect("fresh_loop_context always sets a loop scope");
    let inner_pc = loop_flow.pc_scope.reference().to_string();

    sink.line(format!("List<Bdd> {} = new ArrayList<>();", loop_scope.exits_list));
    sink.line(format!("boolean {} = false;", loop_scope.early_return_flag));
    sink.line(format!("Bdd {} = {};", inner_pc, flow.pc_scope.reference()));
    sink.line(format!("while (!{}.isConstFalse({})) {{", BDD_VAR, inner_pc));
    sink.push_indent();
    emit_stmt(ctx, &loop_flow, function, sink, body)?;
    sink.pop_indent();
    sink.line("}");

    sink.line(format!("if ({}) {{", loop_scope.early_return_flag));
    sink.push_indent();
    sink.line(format!(
        "{} = {}.orMany({});",
        flow.pc_scope.reference(),
        BDD_VAR,
        loop_scope.exits_list
    ));
    if let Some(branch_scope) = &flow.branch_scope {
        sink.line(format!("{} = true;", branch_scope.jumped_out_flag));
    }
    sink.pop_indent();
    sink.line("}");
    Ok(())
}

fn emit_if(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    cond: &Expr,
    then_branch: &Stmt,
    else_branch: &Stmt,
) -> GenResult<()> {
    if literal_type(cond) != Some(Type::Bool) {
        return Err(GenError::unsupported(function.name, "if condition must be boolean"));
    }

    let cond_temp = ctx.fresh_temp_var();
    let cond_text = emit_expr(ctx, flow, function.name, cond)?;
    sink.line(format!("PrimVS<Bdd, Boolean> {} = {};", cond_temp, cond_text));

    let then_flow = flow.fresh_branch_sub_context(ctx);
    let else_flow = flow.fresh_branch_sub_context(ctx);
    let then_pc = then_flow.pc_scope.reference().to_string();
    let else_pc = else_flow.pc_scope.reference().to_string();
    sink.line(format!("Bdd {} = {}.trueCond({});", then_pc, BDD_VAR, cond_temp));
    sink.line(format!("Bdd {} = {}.falseCond({});", else_pc, BDD_VAR, cond_temp));
    sink.line(format!(
        "boolean {} = false;",
        then_flow.branch_scope.as_ref().expect("branch sub-context has a branch scope").jumped_out_flag
    ));
    sink.line(format!(
        "boolean {} = false;",
        else_flow.branch_scope.as_ref().expect("branch sub-context has a branch scope").jumped_out_flag
    ));

    sink.line(format!("if (!{}.isConstFalse({})) {{", BDD_VAR, then_pc));
    sink.push_indent();
    emit_stmt(ctx, &then_flow, function, sink, then_branch)?;
    sink.pop_indent();
    sink.line("}");

    sink.line(format!("if (!{}.isConstFalse({})) {{", BDD_VAR, else_pc));
    sink.push_indent();
    emit_stmt(ctx, &else_flow, function, sink, else_branch)?;
    sink.pop_indent();
    sink.line("}");

    if can_jump_out(then_branch) || can_jump_out(else_branch) {
        sink.line(format!("{} = {}.or({}, {});", flow.pc_scope.reference(), BDD_VAR, then_pc, else_pc));
        if let Some(branch_scope) = &flow.branch_scope {
            let then_flag = &then_flow.branch_scope.as_ref().expect("branch sub-context has a branch scope").jumped_out_flag;
            let else_flag = &else_flow.branch_scope.as_ref().expect("branch sub-context has a branch scope").jumped_out_flag;
            sink.line(format!(
                "{flag} = {flag} || {then_flag} || {else_flag};",
                flag = branch_scope.jumped_out_flag,
                then_flag = then_flag,
                else_flag = else_flag,
            ));
        }
    }
    Ok(())
}

fn emit_call(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: FuncMeta,
    sink: &mut Sink,
    callee: &crate::ir::Callee,
    args: &[Expr],
) -> GenResult<()> {
    if !callee.is_static || callee.can_receive {
        return Err(GenError::unsupported(
            function.name,
            format!("call to non-static or receive-capable callee `{}`", callee.name),
        ));
    }
    let mut rendered = vec![flow.pc_scope.reference().to_string()];
    for arg in args {
        rendered.push(emit_expr(ctx, flow, function.name, arg)?);
    }
    sink.line(format!("{}({});", callee.name, rendered.join(", ")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Callee, Lvalue};

    fn meta<'a>(name: &'a str, ty: &'a Type) -> FuncMeta<'a> {
        FuncMeta { name, return_ty: ty }
    }

    #[test]
    fn return_emits_merge2_then_kills_pc() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        emit_stmt(
            &mut ctx,
            &flow,
            meta("f", &Type::Int),
            &mut sink,
            &Stmt::Return(Some(Expr::IntLit(3))),
        )
        .unwrap();
        let out = sink.into_string();
        assert!(out.contains(&format!("{} = {}.merge2({}, ", RETURN_ACCUMULATOR, "ops_0", RETURN_ACCUMULATOR)));
        assert!(out.contains(&format!("{} = {}.constFalse();", flow.pc_scope.reference(), BDD_VAR)));
    }

    #[test]
    fn break_without_loop_scope_is_unsupported() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let result = emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &Stmt::Break);
        assert!(matches!(result, Err(GenError::Unsupported { .. })));
    }

    #[test]
    fn break_inside_loop_appends_to_exits_and_kills_pc() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_loop_context(&mut ctx);
        let mut sink = Sink::new();
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &Stmt::Break).unwrap();
        let out = sink.into_string();
        let loop_scope = flow.loop_scope.as_ref().unwrap();
        assert!(out.contains(&format!("{}.add({})", loop_scope.exits_list, flow.pc_scope.reference())));
        assert!(out.contains(&format!("{} = {}.constFalse();", flow.pc_scope.reference(), BDD_VAR)));
    }

    #[test]
    fn while_with_non_literal_true_condition_is_rejected() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::While {
            cond: Expr::VariableAccess {
                name: "cond".into(),
                ty: Type::Bool,
            },
            body: Box::new(Stmt::Break),
        };
        let result = emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt);
        assert!(matches!(result, Err(GenError::Unsupported { .. })));
    }

    #[test]
    fn while_true_with_break_emits_exits_list_and_epilogue() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::While {
            cond: Expr::BoolLit(true),
            body: Box::new(Stmt::Break),
        };
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt).unwrap();
        let out = sink.into_string();
        assert!(out.contains("new ArrayList<>()"));
        assert!(out.contains(".orMany("));
    }

    #[test]
    fn compound_stops_after_must_jump_out_child() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::Compound(vec![
            Stmt::Return(Some(Expr::IntLit(1))),
            Stmt::Return(Some(Expr::IntLit(2))),
        ]);
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt).unwrap();
        let out = sink.into_string();
        // Only one merge2 call: the second Return must not be emitted.
        assert_eq!(out.matches("merge2").count(), 1);
    }

    #[test]
    fn assign_rejects_type_mismatch() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::Assign {
            target: Lvalue::Variable {
                name: "x".into(),
                ty: Type::Int,
            },
            value: Expr::BoolLit(true),
        };
        let result = emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt);
        assert!(matches!(result, Err(GenError::Unsupported { .. })));
    }

    #[test]
    fn if_with_escaping_branch_declares_jumped_out_flags_before_use() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::If {
            cond: Expr::VariableAccess {
                name: "b".into(),
                ty: Type::Bool,
            },
            then_branch: Box::new(Stmt::Return(Some(Expr::IntLit(1)))),
            else_branch: Box::new(Stmt::Compound(vec![])),
        };
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt).unwrap();
        let out = sink.into_string();
        // Every `jumpedOutN` that is assigned or read must first appear
        // in a `boolean jumpedOutN = false;` declaration.
        for line in out.lines() {
            if let Some(pos) = line.find("jumpedOut") {
                let name_end = line[pos..]
                    .find(|c: char| !c.is_alphanumeric())
                    .map(|i| pos + i)
                    .unwrap_or(line.len());
                let name = &line[pos..name_end];
                let decl = format!("boolean {} = false;", name);
                assert!(out.contains(&decl), "missing declaration `{}` for use in `{}`\nfull output:\n{}", decl, line, out);
            }
        }
    }

    #[test]
    fn if_condition_accepts_comparison_and_logical_operators() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let cond = Expr::BinaryOp {
            op: crate::ir::BinOp::Lt,
            lhs: Box::new(Expr::VariableAccess {
                name: "x".into(),
                ty: Type::Int,
            }),
            rhs: Box::new(Expr::VariableAccess {
                name: "y".into(),
                ty: Type::Int,
            }),
        };
        let stmt = Stmt::If {
            cond,
            then_branch: Box::new(Stmt::Compound(vec![])),
            else_branch: Box::new(Stmt::Compound(vec![])),
        };
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt).unwrap();
    }

    #[test]
    fn call_prepends_path_constraint_as_first_argument() {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        let mut sink = Sink::new();
        let stmt = Stmt::FunctionCall {
            callee: Callee {
                name: "helper".into(),
                is_static: true,
                can_receive: false,
            },
            args: vec![Expr::IntLit(1)],
        };
        emit_stmt(&mut ctx, &flow, meta("f", &Type::Int), &mut sink, &stmt).unwrap();
        let out = sink.into_string();
        assert!(out.starts_with(&format!("helper({}, ", flow.pc_scope.reference())));
    }
}
