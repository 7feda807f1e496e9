//! Module - the container for named types and callable declarations.
//!
//! A [`Module`] owns two name-keyed caches: struct definitions and function
//! declarations. Insertion is the only mutation either cache supports, and
//! both get-or-create operations are idempotent: asking for a name that
//! already exists returns the existing definition rather than redeclaring
//! it. Callers needing concurrent lowering should confine each module to a
//! single writer; the builder API enforces this by holding `&mut Module`.

use rustc_hash::FxHashMap;

use crate::ty::{FnSig, StructDef, StructRef, Type};

/// A function declaration: a canonical name paired with its signature.
#[derive(Debug, PartialEq, Eq)]
pub struct FuncDecl {
    name: String,
    sig: FnSig,
}

impl FuncDecl {
    /// The declared name of this callable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared signature.
    pub fn sig(&self) -> &FnSig {
        &self.sig
    }
}

/// Shared handle to a [`FuncDecl`].
pub type FuncRef = std::rc::Rc<FuncDecl>;

/// A host module: the namespace that named struct types and callable
/// declarations are inserted into.
#[derive(Debug)]
pub struct Module {
    name: String,
    target: String,
    structs: FxHashMap<String, StructRef>,
    functions: FxHashMap<String, FuncRef>,
}

impl Module {
    /// Create an empty module for the given target descriptor
    /// (e.g. `"hlx1.3-compute"`).
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            structs: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The textual target descriptor this module is compiled for.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the struct type registered under `name`, or create it with the
    /// given fields. An existing name wins; `fields` are not re-checked.
    pub fn get_or_create_struct(&mut self, name: &str, fields: &[Type]) -> StructRef {
        if let Some(existing) = self.structs.get(name) {
            return existing.clone();
        }
        log::debug!("module {}: declaring struct type {name}", self.name);
        let def: StructRef = std::rc::Rc::new(StructDef::new(name, fields.to_vec()));
        self.structs.insert(name.to_string(), def.clone());
        def
    }

    /// Look up a struct type by name without creating it.
    pub fn struct_type(&self, name: &str) -> Option<&StructRef> {
        self.structs.get(name)
    }

    /// Number of named struct types declared so far.
    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    /// Get the callable declared under `name`, or declare it with the given
    /// signature. A prior declaration with the same name is assumed to carry
    /// a matching signature; the mangling scheme guarantees this and it is
    /// not re-validated here.
    pub fn get_or_declare_function(&mut self, name: &str, sig: FnSig) -> FuncRef {
        if let Some(existing) = self.functions.get(name) {
            debug_assert_eq!(
                existing.sig, sig,
                "redeclaration of {name} with a different signature"
            );
            return existing.clone();
        }
        log::debug!("module {}: declaring callable {name}: {sig}", self.name);
        let decl: FuncRef = std::rc::Rc::new(FuncDecl {
            name: name.to_string(),
            sig,
        });
        self.functions.insert(name.to_string(), decl.clone());
        decl
    }

    /// Look up a declared callable by name.
    pub fn function(&self, name: &str) -> Option<&FuncRef> {
        self.functions.get(name)
    }

    /// Number of callables declared so far.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn struct_creation_is_idempotent() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let a = m.get_or_create_struct("hlx.types.Handle", &[Type::Ptr]);
        let b = m.get_or_create_struct("hlx.types.Handle", &[Type::Ptr]);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(m.struct_count(), 1);
    }

    #[test]
    fn existing_struct_name_wins() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let a = m.get_or_create_struct("s", &[Type::Float]);
        // Same name with different fields returns the original definition.
        let b = m.get_or_create_struct("s", &[Type::Double, Type::Double]);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(b.fields(), &[Type::Float]);
    }

    #[test]
    fn function_declaration_is_idempotent() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let sig = FnSig::new(vec![Type::int(32), Type::Float], Type::Float);
        let a = m.get_or_declare_function("hlx.op.unary.f32", sig.clone());
        let b = m.get_or_declare_function("hlx.op.unary.f32", sig);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(m.function_count(), 1);
    }

    #[test]
    fn modules_do_not_share_definitions() {
        let mut m1 = Module::new("a", "hlx1.0-compute");
        let mut m2 = Module::new("b", "hlx1.0-compute");
        let s1 = m1.get_or_create_struct("s", &[Type::Float]);
        let s2 = m2.get_or_create_struct("s", &[Type::Float]);
        assert!(!Rc::ptr_eq(&s1, &s2));
    }
}
