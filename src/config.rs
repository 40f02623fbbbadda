//! Compilation job configuration
//!
//! The minimal external collaborator surface a host compiler must
//! supply alongside the IR: a file name (for the prologue comment) and
//! the name of the generated class (§6 Input).

use crate::ir::GlobalScope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationJob {
    pub file_name: String,
    pub main_class_name: String,
    pub global: GlobalScope,
    /// Whether to emit the reserved-imports prologue comment (§6 Output
    /// item 1). Defaults to `true`; a host embedding the generator into
    /// a larger pipeline that writes its own imports can suppress it.
    #[serde(default = "default_true")]
    pub emit_prologue_comment: bool,
}

fn default_true() -> bool {
    true
}

impl CompilationJob {
    pub fn new(file_name: impl Into<String>, main_class_name: impl Into<String>, global: GlobalScope) -> Self {
        Self {
            file_name: file_name.into(),
            main_class_name: main_class_name.into(),
            global,
            emit_prologue_comment: true,
        }
    }

    /// Decode a job from the JSON a host front end hands across the
    /// process boundary.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
