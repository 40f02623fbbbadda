//! Function and module emitter (component I)
//!
//! Top-level declaration dispatch, function signature/body emission,
//! and the operator-table registry epilogue (§4.I). This is the only
//! module that owns the class header/footer and decides where the
//! registry's constants land in the output.

use crate::codegen::stmt::emit_stmt;
use crate::codegen::FuncMeta;
use crate::config::CompilationJob;
use crate::error::{GenError, GenResult};
use crate::flow::FlowContext;
use crate::ir::{Decl, Function, Type};
use crate::mint::{CompilationContext, RETURN_ACCUMULATOR};
use crate::sink::Sink;
use crate::types::symbolic_of;

/// Lower every declaration in `job.global` into the body of one class,
/// returning the full rendered source.
pub fn emit_module(job: &CompilationJob) -> GenResult<String> {
    let mut ctx = CompilationContext::new(job.main_class_name.clone());
    let mut sink = Sink::new();

    if job.emit_prologue_comment {
        sink.line(format!("// generated from {} — do not edit by hand", job.file_name));
    }
    sink.line(format!("public class {} {{", job.main_class_name));
    sink.push_indent();

    for decl in &job.global.decls {
        match decl {
            Decl::Function(function) => emit_function(&mut ctx, &mut sink, function)?,
            Decl::Skipped(detail) => sink.line(format!("// skipped: {}", detail)),
        }
        sink.newline();
    }

    emit_registry_epilogue(&ctx, &mut sink);

    sink.pop_indent();
    sink.line("}");
    Ok(sink.into_string())
}

fn emit_function(ctx: &mut CompilationContext, sink: &mut Sink, function: &Function) -> GenResult<()> {
    let span = tracing::debug_span!("emit_function", name = %function.name);
    let _enter = span.enter();

    // Invariant 2: only static, non-receive-capable, non-foreign
    // functions reach the emitter.
    if function.owner.is_some() {
        return Err(GenError::unsupported(&function.name, "methods (non-static owner) are not supported"));
    }
    if function.can_receive {
        return Err(GenError::unsupported(&function.name, "receive-capable functions are not supported"));
    }
    if function.is_foreign {
        return Err(GenError::unsupported(&function.name, "foreign functions are not supported"));
    }

    let return_symbolic = symbolic_of(&function.return_ty, false)?;
    let mut params = vec!["Bdd bdd".to_string()];
    for param in &function.params {
        params.push(format!("{} {}", symbolic_of(&param.ty, true)?, ctx.get_var(&param.name)));
    }

    sink.line(format!(
        "private static {} {}({}) {{",
        return_symbolic,
        function.name,
        params.join(", ")
    ));
    sink.push_indent();

    for local in &function.locals {
        let ops = ctx.registry.register_for(&local.ty)?;
        sink.line(format!(
            "{} {} = {}.guard({}.empty(), bdd);",
            symbolic_of(&local.ty, true)?,
            ctx.get_var(&local.name),
            ops,
            ops
        ));
    }

    if function.return_ty != Type::Null {
        let ops = ctx.registry.register_for(&function.return_ty)?;
        sink.line(format!(
            "{} {} = {}.empty();",
            symbolic_of(&function.return_ty, true)?,
            RETURN_ACCUMULATOR,
            ops
        ));
    }

    let flow = FlowContext::fresh_func_context(ctx);
    let meta = FuncMeta {
        name: &function.name,
        return_ty: &function.return_ty,
    };
    emit_stmt(ctx, &flow, meta, sink, &function.body)?;

    if function.return_ty != Type::Null {
        sink.line(format!("return {};", RETURN_ACCUMULATOR));
    }

    sink.pop_indent();
    sink.line("}");
    Ok(())
}

fn emit_registry_epilogue(ctx: &CompilationContext, sink: &mut Sink) {
    for entry in ctx.registry.entries() {
        sink.line(format!(
            "private static final {} {} = {};",
            entry.ops_type, entry.index, entry.ops_ctor
        ));
    }
}
