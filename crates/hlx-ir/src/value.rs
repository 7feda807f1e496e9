//! Values and call expressions.
//!
//! [`Value`] is the small set of typed operands the lowering pipeline
//! passes around: integer/float/struct constants and SSA temporaries.
//! [`CallInst`] is a constructed call against a declared callable, carrying
//! the call-site attributes the caller attached.

use bitflags::bitflags;

use crate::module::FuncRef;
use crate::ty::Type;

/// A typed operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer constant of the given type.
    ConstInt { ty: Type, value: i64 },
    /// A floating-point constant of the given type.
    ConstFloat { ty: Type, value: f64 },
    /// A constant aggregate of the given struct type.
    ConstStruct { ty: Type, fields: Vec<Value> },
    /// An SSA temporary produced by an earlier instruction.
    Temp { ty: Type, id: u32 },
}

impl Value {
    /// Integer constant.
    pub fn const_int(ty: Type, value: i64) -> Self {
        Value::ConstInt { ty, value }
    }

    /// Floating-point constant.
    pub fn const_float(ty: Type, value: f64) -> Self {
        Value::ConstFloat { ty, value }
    }

    /// Constant aggregate.
    pub fn const_struct(ty: Type, fields: Vec<Value>) -> Self {
        Value::ConstStruct { ty, fields }
    }

    /// SSA temporary with an explicit id.
    pub fn temp(ty: Type, id: u32) -> Self {
        Value::Temp { ty, id }
    }

    /// The type of this value.
    pub fn ty(&self) -> &Type {
        match self {
            Value::ConstInt { ty, .. }
            | Value::ConstFloat { ty, .. }
            | Value::ConstStruct { ty, .. }
            | Value::Temp { ty, .. } => ty,
        }
    }
}

bitflags! {
    /// Side-effect attributes attached to a call site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CallAttrs: u8 {
        /// The call reads and writes no memory.
        const NO_MEMORY_ACCESS = 1;
        /// The call may read memory but never writes it.
        const READ_ONLY_MEMORY = 1 << 1;
        /// The call never returns to its caller.
        const NO_RETURN = 1 << 2;
        /// The call must not be duplicated by transformations.
        const NO_DUPLICATE = 1 << 3;
    }
}

/// A constructed call expression.
#[derive(Debug, PartialEq)]
pub struct CallInst {
    callee: FuncRef,
    args: Vec<Value>,
    name: String,
    attrs: CallAttrs,
}

impl CallInst {
    /// Construct a call against a declared callable. No attributes are set;
    /// the builder attaches them afterwards.
    pub fn new(callee: FuncRef, args: Vec<Value>, name: impl Into<String>) -> Self {
        Self {
            callee,
            args,
            name: name.into(),
            attrs: CallAttrs::empty(),
        }
    }

    pub fn callee(&self) -> &FuncRef {
        &self.callee
    }

    pub fn callee_name(&self) -> &str {
        self.callee.name()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The name given to the call's result value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The callee's declared return type.
    pub fn result_type(&self) -> &Type {
        &self.callee.sig().ret
    }

    pub fn attrs(&self) -> CallAttrs {
        self.attrs
    }

    /// Mark the call as accessing no memory.
    pub fn set_does_not_access_memory(&mut self) {
        self.attrs |= CallAttrs::NO_MEMORY_ACCESS;
    }

    /// Mark the call as only reading memory.
    pub fn set_only_reads_memory(&mut self) {
        self.attrs |= CallAttrs::READ_ONLY_MEMORY;
    }

    /// Mark the call as never returning.
    pub fn set_does_not_return(&mut self) {
        self.attrs |= CallAttrs::NO_RETURN;
    }

    /// Mark the call as non-duplicatable.
    pub fn set_cannot_duplicate(&mut self) {
        self.attrs |= CallAttrs::NO_DUPLICATE;
    }

    pub fn does_not_access_memory(&self) -> bool {
        self.attrs.contains(CallAttrs::NO_MEMORY_ACCESS)
    }

    pub fn only_reads_memory(&self) -> bool {
        self.attrs.contains(CallAttrs::READ_ONLY_MEMORY)
    }

    pub fn does_not_return(&self) -> bool {
        self.attrs.contains(CallAttrs::NO_RETURN)
    }

    pub fn cannot_duplicate(&self) -> bool {
        self.attrs.contains(CallAttrs::NO_DUPLICATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use crate::ty::FnSig;

    fn call_fixture() -> CallInst {
        let mut m = Module::new("m", "hlx1.0-compute");
        let sig = FnSig::new(vec![Type::int(32), Type::Float], Type::Float);
        let callee = m.get_or_declare_function("hlx.op.unary.f32", sig);
        CallInst::new(
            callee,
            vec![
                Value::const_int(Type::int(32), 13),
                Value::const_float(Type::Float, 0.5),
            ],
            "sin",
        )
    }

    #[test]
    fn value_types() {
        assert_eq!(Value::const_int(Type::int(32), 7).ty(), &Type::int(32));
        assert_eq!(Value::const_float(Type::Half, 1.0).ty(), &Type::Half);
        assert_eq!(Value::temp(Type::Double, 3).ty(), &Type::Double);
    }

    #[test]
    fn call_starts_with_no_attrs() {
        let call = call_fixture();
        assert_eq!(call.attrs(), CallAttrs::empty());
        assert_eq!(call.callee_name(), "hlx.op.unary.f32");
        assert_eq!(call.result_type(), &Type::Float);
        assert_eq!(call.name(), "sin");
    }

    #[test]
    fn attr_setters_accumulate() {
        let mut call = call_fixture();
        call.set_does_not_access_memory();
        call.set_cannot_duplicate();
        assert!(call.does_not_access_memory());
        assert!(call.cannot_duplicate());
        assert!(!call.only_reads_memory());
        assert!(!call.does_not_return());
    }
}
