//! Operator-table registry (component C)
//!
//! Deduplicates `(opsTypeText, opsCtorText)` requests so that one
//! target-level constant serves every call site of the same type shape,
//! preserving first-insertion order for deterministic epilogue output.
//! Mirrors the constant-pool idiom of a module builder's string table.

use crate::error::GenResult;
use crate::ir::Type;
use rustc_hash::FxHashMap;

/// Index of a registered operator-table request. Renders as `ops_<i>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorTableIndex(pub u32);

impl std::fmt::Display for OperatorTableIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ops_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Request {
    ops_type: String,
    ops_ctor: String,
}

/// A registered `(opsTypeText, opsCtorText)` entry, in registration
/// order, as it will be emitted in the epilogue.
#[derive(Debug, Clone)]
pub struct OperatorTableEntry {
    pub index: OperatorTableIndex,
    pub ops_type: String,
    pub ops_ctor: String,
}

/// The deduplicating registry described in §4.C.
#[derive(Debug, Default)]
pub struct OperatorTableRegistry {
    order: Vec<Request>,
    index_of: FxHashMap<Request, OperatorTableIndex>,
}

impl OperatorTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request, returning its stable index. Idempotent:
    /// repeated requests with an equal key return the same index.
    pub fn register(&mut self, ops_type: impl Into<String>, ops_ctor: impl Into<String>) -> OperatorTableIndex {
        let req = Request {
            ops_type: ops_type.into(),
            ops_ctor: ops_ctor.into(),
        };
        if let Some(&idx) = self.index_of.get(&req) {
            return idx;
        }
        let idx = OperatorTableIndex(self.order.len() as u32);
        self.index_of.insert(req.clone(), idx);
        self.order.push(req);
        idx
    }

    /// Register the operator table for a type shape, recursively
    /// registering any dependent element/value ops first so emission
    /// order stays definition-before-use, and return the constant name
    /// to reference at the call site.
    pub fn register_for(&mut self, ty: &Type) -> GenResult<String> {
        let ops_type = crate::types::ops_type_of(ty)?;
        let ops_ctor = crate::types::ops_ctor_of(ty, self)?;
        Ok(self.register(ops_type, ops_ctor).to_string())
    }

    /// All registered entries, in first-insertion (== emission) order.
    pub fn entries(&self) -> Vec<OperatorTableEntry> {
        self.order
            .iter()
            .enumerate()
            .map(|(i, req)| OperatorTableEntry {
                index: OperatorTableIndex(i as u32),
                ops_type: req.ops_type.clone(),
                ops_ctor: req.ops_ctor.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut reg = OperatorTableRegistry::new();
        let a = reg.register("PrimVS.Ops<Bdd, Integer>", "new PrimVS.Ops<>(bdd)");
        let b = reg.register("PrimVS.Ops<Bdd, Integer>", "new PrimVS.Ops<>(bdd)");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn distinct_requests_get_distinct_dense_indices() {
        let mut reg = OperatorTableRegistry::new();
        let a = reg.register("PrimVS.Ops<Bdd, Integer>", "new PrimVS.Ops<>(bdd)");
        let b = reg.register("PrimVS.Ops<Bdd, Boolean>", "new PrimVS.Ops<>(bdd)");
        assert_ne!(a, b);
        assert_eq!(a.0, 0);
        assert_eq!(b.0, 1);
    }

    #[test]
    fn index_renders_as_ops_name() {
        let idx = OperatorTableIndex(3);
        assert_eq!(idx.to_string(), "ops_3");
    }

    #[test]
    fn register_for_sequence_registers_element_ops_first() {
        let mut reg = OperatorTableRegistry::new();
        let name = reg.register_for(&Type::Sequence(Box::new(Type::Int))).unwrap();
        // element ops (Integer) registered before the list ops that uses it
        let entries = reg.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ops_type, "PrimVS.Ops<Bdd, Integer>");
        assert!(entries[1].ops_ctor.contains(&entries[0].index.to_string()));
        assert_eq!(name, entries[1].index.to_string());
    }
}
