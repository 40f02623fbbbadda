//! Lvalue mutation emitter (component F)
//!
//! For each lvalue shape, emits target code that materialises a guarded
//! snapshot, invokes a caller-supplied mutator, and writes back via a
//! merge with the complement predicate (§4.F). The mutator is taken as
//! a boxed closure per the "caller supplies a mutator" idiom the spec
//! calls out explicitly in §9's re-architecture guidance.

use crate::codegen::expr::emit_expr;
use crate::error::{GenError, GenResult};
use crate::flow::FlowContext;
use crate::ir::Lvalue;
use crate::mint::CompilationContext;
use crate::sink::Sink;
use crate::types::symbolic_of;

/// A caller-supplied callback that writes the mutation using the
/// temporary identifier (`&str`, the fourth argument) that holds the
/// guarded current value.
pub type WriteMutator<'a> =
    Box<dyn FnOnce(&mut CompilationContext, &FlowContext, &mut Sink, &str) -> GenResult<()> + 'a>;

/// Emit a guard/mutate/merge sequence for `lvalue`.
pub fn emit_mutation<'a>(
    ctx: &mut CompilationContext,
    flow: &FlowContext,
    function: &str,
    sink: &mut Sink,
    lvalue: &Lvalue,
    need_original_value: bool,
    write_mutator: WriteMutator<'a>,
) -> GenResult<()> {
    match lvalue {
        Lvalue::Variable { name, ty } => {
            let ops = ctx.registry.register_for(ty)?;
            let x = ctx.get_var(name);
            let g = ctx.fresh_temp_var();
            let pc = flow.pc_scope.reference().to_string();
            sink.line(format!("var {} = {}.guard({}, {});", g, ops, x, pc));
            write_mutator(ctx, flow, sink, &g)?;
            sink.line(format!(
                "{} = {}.merge2({}.guard({}, {}.not({})), {});",
                x,
                ops,
                ops,
                x,
                crate::mint::BDD_VAR,
                pc,
                g
            ));
            Ok(())
        }
        Lvalue::MapAccess { map, key, value_ty } => {
            let key_expr = key.clone();
            let value_ty = value_ty.clone();
            let function_owned = function.to_string();
            let inner: WriteMutator = Box::new(move |ctx, flow, sink, m_temp| {
                let idx = ctx.fresh_temp_var();
                let idx_text = emit_expr(ctx, flow, &function_owned, &key_expr)?;
                sink.line(format!("var {} = {};", idx, idx_text));

                let val = ctx.fresh_temp_var();
                let ops = ctx.registry.register_for(&value_ty)?;
                if need_original_value {
                    sink.line(format!(
                        "var {} = unwrapOrThrow({}.get({}, {}));",
                        val, ops, m_temp, idx
                    ));
                } else {
                    sink.line(format!("{} {};", symbolic_of(&value_ty, true)?, val));
                }

                write_mutator(ctx, flow, sink, &val)?;

                sink.line(format!("{} = {}.put({}, {}, {});", m_temp, ops, m_temp, idx, val));
                Ok(())
            });
            emit_mutation(ctx, flow, function, sink, map, true, inner)
        }
        Lvalue::SeqAccess { seq, index, elem_ty } => {
            let index_expr = index.clone();
            let elem_ty = elem_ty.clone();
            let function_owned = function.to_string();
            let inner: WriteMutator = Box::new(move |ctx, flow, sink, s_temp| {
                let idx = ctx.fresh_temp_var();
                let idx_text = emit_expr(ctx, flow, &function_owned, &index_expr)?;
                sink.line(format!("var {} = {};", idx, idx_text));

                let val = ctx.fresh_temp_var();
                let ops = ctx.registry.register_for(&elem_ty)?;
                if need_original_value {
                    sink.line(format!(
                        "var {} = unwrapOrThrow({}.get({}, {}));",
                        val, ops, s_temp, idx
                    ));
                } else {
                    sink.line(format!("{} {};", symbolic_of(&elem_ty, true)?, val));
                }

                write_mutator(ctx, flow, sink, &val)?;

                sink.line(format!(
                    "{} = unwrapOrThrow({}.set({}, {}, {}));",
                    s_temp, ops, s_temp, idx, val
                ));
                Ok(())
            });
            emit_mutation(ctx, flow, function, sink, seq, true, inner)
        }
        Lvalue::NamedTupleAccess { .. } => {
            Err(GenError::unsupported(function, "named-tuple lvalue"))
        }
        Lvalue::TupleAccess { .. } => Err(GenError::unsupported(function, "positional-tuple lvalue")),
        Lvalue::Invalid(detail) => Err(GenError::invalid_lvalue(function, detail.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Expr, Type};

    fn ctx_and_flow() -> (CompilationContext, FlowContext) {
        let mut ctx = CompilationContext::new("Gen");
        let flow = FlowContext::fresh_func_context(&mut ctx);
        (ctx, flow)
    }

    #[test]
    fn variable_mutation_guards_then_merges_with_complement() {
        let (mut ctx, flow) = ctx_and_flow();
        let mut sink = Sink::new();
        let lvalue = Lvalue::Variable {
            name: "x".into(),
            ty: Type::Int,
        };
        emit_mutation(
            &mut ctx,
            &flow,
            "f",
            &mut sink,
            &lvalue,
            false,
            Box::new(|_, _, sink, temp| {
                sink.line(format!("{} = {};", temp, temp));
                Ok(())
            }),
        )
        .unwrap();
        let out = sink.into_string();
        let pc = flow.pc_scope.reference();
        assert!(out.contains(&format!("guard(v_x, {})", pc)));
        assert!(out.contains(&format!("merge2(")));
        assert!(out.contains(&format!("guard(v_x, {}.not({}))", crate::mint::BDD_VAR, pc)));
    }

    #[test]
    fn seq_access_mutation_wraps_set_in_unwrap_or_throw() {
        let (mut ctx, flow) = ctx_and_flow();
        let mut sink = Sink::new();
        let lvalue = Lvalue::SeqAccess {
            seq: Box::new(Lvalue::Variable {
                name: "s".into(),
                ty: Type::Sequence(Box::new(Type::Int)),
            }),
            index: Expr::IntLit(0),
            elem_ty: Type::Int,
        };
        emit_mutation(
            &mut ctx,
            &flow,
            "f",
            &mut sink,
            &lvalue,
            false,
            Box::new(|_, _, _, _| Ok(())),
        )
        .unwrap();
        let out = sink.into_string();
        assert!(out.contains("unwrapOrThrow("));
        assert!(out.contains(".set("));
    }

    #[test]
    fn tuple_lvalues_are_unsupported() {
        let (mut ctx, flow) = ctx_and_flow();
        let mut sink = Sink::new();
        let lvalue = Lvalue::TupleAccess {
            tuple: Box::new(Lvalue::Variable {
                name: "t".into(),
                ty: Type::Int,
            }),
            index: 0,
        };
        let result = emit_mutation(&mut ctx, &flow, "f", &mut sink, &lvalue, false, Box::new(|_, _, _, _| Ok(())));
        assert!(matches!(result, Err(GenError::Unsupported { .. })));
    }
}
