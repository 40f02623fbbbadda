//! Value-summary code generator
//!
//! Lowers a typed, tree-shaped statement/expression IR into target
//! source where every runtime value is a value summary guarded by a
//! BDD path constraint, per the module layout in `SPEC_FULL.md`.
//!
//! The only public surface is [`generate`]/[`generate_to`] plus the
//! `ir`/`config`/`error` types needed to build a job and interpret a
//! failure; every component module is crate-private.

mod analysis;
mod codegen;
pub mod config;
pub mod error;
mod flow;
pub mod ir;
mod mint;
mod registry;
mod sink;
mod types;

pub use config::CompilationJob;
pub use error::{GenError, GenResult};

/// Generate the full target source for `job`, as a `String`.
pub fn generate(job: &config::CompilationJob) -> error::GenResult<String> {
    let span = tracing::debug_span!("generate", file = %job.file_name, class = %job.main_class_name);
    let _enter = span.enter();
    codegen::function::emit_module(job)
}

/// Generate the full target source for `job`, streaming it straight
/// into `w`. File handling is left to the caller (out of scope per
/// `SPEC_FULL.md`'s Non-goals).
pub fn generate_to<W: std::io::Write>(job: &config::CompilationJob, w: &mut W) -> error::GenResult<()> {
    let source = generate(job)?;
    w.write_all(source.as_bytes())
        .map_err(|e| error::GenError::unsupported(&job.main_class_name, format!("write failed: {}", e)))
}
