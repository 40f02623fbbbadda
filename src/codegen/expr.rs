//! Expression emitter (component G)
//!
//! Lifts literals, variable reads, indexed reads, and binary operations
//! into value-summary form under the current path constraint, per
//! §4.G.

use crate::error::{GenError, GenResult};
use crate::flow::FlowContext;
use crate::ir::{BinOp, Expr, Type};
use crate::mint::CompilationContext;

pub(crate) fn literal_type(expr: &Expr) -> Option<Type> {
    match expr {
        Expr::BoolLit(_) => Some(Type::Bool),
        Expr::IntLit(_) => Some(Type::Int),
        Expr::FloatLit(_) => Some(Type::Float),
        _ => expr.static_type().cloned(),
    }
}

fn is_primitive(ty: &Type) -> bool {
    matches!(ty, Type::Bool | Type::Int | Type::Float)
}

/// Emit `expr`'s target-level value-summary expression, guarded by the
/// current path constraint in `flow`.
pub fn emit_expr(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: &str,
    expr: &Expr,
) -> GenResult<String> {
    let pc = flow.pc_scope.reference();
    match expr {
        Expr::BoolLit(v) => {
            let ops = ctx.registry.register_for(&Type::Bool)?;
            Ok(format!("{}.guard(new PrimVS<>({}, {}), {})", ops, crate::mint::BDD_VAR, v, pc))
        }
        Expr::IntLit(v) => {
            let ops = ctx.registry.register_for(&Type::Int)?;
            Ok(format!("{}.guard(new PrimVS<>({}, {}), {})", ops, crate::mint::BDD_VAR, v, pc))
        }
        Expr::FloatLit(v) => {
            let ops = ctx.registry.register_for(&Type::Float)?;
            Ok(format!("{}.guard(new PrimVS<>({}, {}f), {})", ops, crate::mint::BDD_VAR, v, pc))
        }
        Expr::Default(ty) => emit_default(ctx, flow, function, ty),
        Expr::VariableAccess { name, ty } | Expr::LinearAccessRef { name, ty } => {
            let ops = ctx.registry.register_for(ty)?;
            Ok(format!("{}.guard({}, {})", ops, ctx.get_var(name), pc))
        }
        Expr::MapAccess { map, key, value_ty } => {
            let map_text = emit_expr(ctx, flow, function, map)?;
            let key_text = emit_expr(ctx, flow, function, key)?;
            let ops = ctx.registry.register_for(value_ty)?;
            Ok(format!("unwrapOrThrow({}.get({}, {}))", ops, map_text, key_text))
        }
        Expr::SeqAccess { seq, index, elem_ty } => {
            let seq_text = emit_expr(ctx, flow, function, seq)?;
            let index_text = emit_expr(ctx, flow, function, index)?;
            let ops = ctx.registry.register_for(elem_ty)?;
            Ok(format!("unwrapOrThrow({}.get({}, {}))", ops, seq_text, index_text))
        }
        Expr::Clone(inner) => emit_expr(ctx, flow, function, inner),
        Expr::BinaryOp { op, lhs, rhs } => emit_binary_op(ctx, flow, function, *op, lhs, rhs),
        Expr::Other(desc) => Ok(format!("// unsupported expression: {}", desc)),
    }
}

fn emit_default(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: &str,
    ty: &Type,
) -> GenResult<String> {
    let pc = flow.pc_scope.reference();
    match ty {
        Type::Bool => {
            let ops = ctx.registry.register_for(ty)?;
            Ok(format!("{}.guard(new PrimVS<>({}, false), {})", ops, crate::mint::BDD_VAR, pc))
        }
        Type::Int => {
            let ops = ctx.registry.register_for(ty)?;
            Ok(format!("{}.guard(new PrimVS<>({}, 0), {})", ops, crate::mint::BDD_VAR, pc))
        }
        Type::Float => {
            let ops = ctx.registry.register_for(ty)?;
            Ok(format!("{}.guard(new PrimVS<>({}, 0.0f), {})", ops, crate::mint::BDD_VAR, pc))
        }
        Type::Sequence(_) | Type::Map(_, _) => {
            let ops = ctx.registry.register_for(ty)?;
            Ok(format!("{}.guard({}.empty(), {})", ops, ops, pc))
        }
        Type::Null => Err(GenError::unsupported(function, "default value of type Null")),
        Type::NamedTuple(_) | Type::PositionalTuple(_) => {
            Err(GenError::unsupported(function, format!("default value of type {}", ty)))
        }
    }
}

fn emit_binary_op(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: &str,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
) -> GenResult<String> {
    if !op.is_supported() {
        return Err(GenError::unsupported(function, format!("binary operator {}", op)));
    }
    let lhs_ty = literal_type(lhs)
        .filter(|t| is_primitive(t))
        .ok_or_else(|| GenError::unsupported(function, "non-primitive left operand of binary op"))?;
    let rhs_ty = literal_type(rhs)
        .filter(|t| is_primitive(t))
        .ok_or_else(|| GenError::unsupported(function, "non-primitive right operand of binary op"))?;
    let _ = (lhs_ty, rhs_ty);

    let lhs_text = emit_expr(ctx, flow, function, lhs)?;
    let rhs_text = emit_expr(ctx, flow, function, rhs)?;
    Ok(format!(
        "({}).map2({}, {}, (a, b) -> a {} b)",
        lhs_text,
        rhs_text,
        crate::mint::BDD_VAR,
        op.symbol()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::CompilationContext;

    fn ctx_and_flow() -> (CompilationContext, FlowContext) {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        (ctx, flow)
    }

    #[test]
    fn int_literal_emits_single_guard_with_current_pc() {
        let (mut ctx, flow) = ctx_and_flow();
        let text = emit_expr(&mut ctx, &flow, "f", &Expr::IntLit(3)).unwrap();
        assert!(text.contains("guard("));
        assert!(text.contains(flow.pc_scope.reference()));
        assert!(text.contains("new PrimVS<>"));
    }

    #[test]
    fn default_sequence_uses_empty_and_guard() {
        let (mut ctx, flow) = ctx_and_flow();
        let text = emit_expr(&mut ctx, &flow, "f", &Expr::Default(Type::Sequence(Box::new(Type::Int)))).unwrap();
        assert!(text.contains(".empty()"));
        assert!(text.contains("guard("));
    }

    #[test]
    fn equality_operators_are_unsupported() {
        let (mut ctx, flow) = ctx_and_flow();
        let expr = Expr::BinaryOp {
            op: BinOp::Eq,
            lhs: Box::new(Expr::IntLit(1)),
            rhs: Box::new(Expr::IntLit(2)),
        };
        assert!(matches!(emit_expr(&mut ctx, &flow, "f", &expr), Err(GenError::Unsupported { .. })));
    }

    #[test]
    fn binary_op_emits_map2_with_operator_symbol() {
        let (mut ctx, flow) = ctx_and_flow();
        let expr = Expr::BinaryOp {
            op: BinOp::Add,
            lhs: Box::new(Expr::IntLit(1)),
            rhs: Box::new(Expr::IntLit(2)),
        };
        let text = emit_expr(&mut ctx, &flow, "f", &expr).unwrap();
        assert!(text.contains(".map2("));
        assert!(text.contains("a + b"));
    }

    #[test]
    fn map_access_is_not_reguarded() {
        let (mut ctx, flow) = ctx_and_flow();
        let expr = Expr::MapAccess {
            map: Box::new(Expr::VariableAccess {
                name: "m".into(),
                ty: Type::Map(Box::new(Type::Int), Box::new(Type::Bool)),
            }),
            key: Box::new(Expr::IntLit(0)),
            value_ty: Type::Bool,
        };
        let text = emit_expr(&mut ctx, &flow, "f", &expr).unwrap();
        assert!(text.starts_with("unwrapOrThrow("));
        assert!(text.contains(".get("));
    }
}
