//! The operation builder.
//!
//! [`OpBuilder`] is the entry point of the engine: it resolves an
//! operation against the module's target version and stage, synthesizes
//! the callable's signature and canonical name, declares the callable, and
//! constructs the call with its side-effect attributes attached.
//!
//! Validation runs to completion before any synthesis, so a failed request
//! leaves the module untouched: no type, no declaration, nothing.

use hlx_ir::{CallInst, Module, StructRef, Type, Value};

use crate::abi::{self, ResourceClass};
use crate::attrs::{self, OpAttrs};
use crate::catalog::{OpCode, OverloadParam};
use crate::error::OpError;
use crate::mangle;
use crate::overload::classify;
use crate::signature;
use crate::stage::{Stage, StageMask};
use crate::target::TargetContext;
use crate::version::{Version, pick_latest};

/// Builds operation calls against one host module.
///
/// Holding `&mut Module` for the builder's lifetime makes the module
/// single-writer by construction, which is what the get-or-create caches
/// require; no internal locking is involved.
pub struct OpBuilder<'m> {
    module: &'m mut Module,
    version: Version,
    stage: Stage,
}

impl<'m> OpBuilder<'m> {
    /// Create a builder for `module`, resolving its target descriptor
    /// once. The descriptor was validated when the module was constructed;
    /// a malformed descriptor or unknown stage panics here rather than
    /// surfacing as a per-call error.
    pub fn new(module: &'m mut Module) -> Self {
        let TargetContext { version, stage } = TargetContext::parse(module.target());
        Self {
            module,
            version,
            stage,
        }
    }

    /// The resolved target version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The resolved target stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Resolve and construct a call to `op`.
    ///
    /// `args` become the call arguments after the discriminator; `name`
    /// names the call's result; `ret_ty` supplies the overload type for
    /// operations overloaded on their return value and is ignored
    /// otherwise. On error the module is left unmodified.
    pub fn try_create_op(
        &mut self,
        op: OpCode,
        args: &[Value],
        name: &str,
        ret_ty: Option<&Type>,
    ) -> Result<CallInst, OpError> {
        let prop = op.property();

        let overload_ty: Option<Type> = match prop.overload_param {
            OverloadParam::Ret => match ret_ty {
                Some(ty) => Some(ty.clone()),
                None => return Err(OpError::OverloadTypeUnknown { op }),
            },
            OverloadParam::Arg(index) => match args.get(index as usize) {
                Some(value) => Some(value.ty().clone()),
                None => {
                    return Err(OpError::ArgumentCountMismatch {
                        op,
                        got: args.len(),
                    });
                }
            },
            OverloadParam::None => None,
        };

        let kind = classify(overload_ty.as_ref());

        let valid_kinds = *pick_latest(prop.overloads, self.version)
            .ok_or(OpError::NoApplicableVersion {
                op,
                version: self.version,
            })?;
        if !valid_kinds.is_empty() && !valid_kinds.intersects(kind) {
            return Err(OpError::InvalidOverloadType { op, kind });
        }

        let valid_stages = *pick_latest(prop.stages, self.version)
            .ok_or(OpError::NoApplicableVersion {
                op,
                version: self.version,
            })?;
        if valid_stages == StageMask::WITHDRAWN {
            return Err(OpError::OperationRemoved { op });
        }
        if !valid_stages.contains(self.stage.mask()) {
            return Err(OpError::InvalidStage {
                op,
                stage: self.stage,
            });
        }

        // Everything is validated; synthesis below may now populate the
        // module's type and callable namespaces.
        let sig = signature::function_type(prop, self.module, overload_ty.as_ref());
        let fn_name = mangle::overload_name(prop.class, kind, overload_ty.as_ref());
        log::trace!("resolved {op} at {} as {fn_name}: {sig}", self.version);
        let callee = self.module.get_or_declare_function(&fn_name, sig);

        let mut call_args = Vec::with_capacity(args.len() + 1);
        call_args.push(Value::const_int(Type::int(32), u32::from(op) as i64));
        call_args.extend_from_slice(args);

        let mut call = CallInst::new(callee, call_args, name);
        self.apply_attrs(&mut call, op);
        Ok(call)
    }

    /// Like [`Self::try_create_op`], for callers whose usage is correct by
    /// construction (e.g. machine-generated lowering code). Any resolution
    /// failure is a programming error and panics.
    pub fn create_op(
        &mut self,
        op: OpCode,
        args: &[Value],
        name: &str,
        ret_ty: Option<&Type>,
    ) -> CallInst {
        match self.try_create_op(op, args, name, ret_ty) {
            Ok(call) => call,
            Err(err) => panic!("invalid arguments for operation: {err}"),
        }
    }

    fn apply_attrs(&self, call: &mut CallInst, op: OpCode) {
        let resolved = attrs::resolve(op, self.version);
        if resolved.contains(OpAttrs::NO_MEMORY_ACCESS) {
            call.set_does_not_access_memory();
        }
        if resolved.contains(OpAttrs::READ_ONLY_MEMORY) {
            call.set_only_reads_memory();
        }
        if resolved.contains(OpAttrs::NO_RETURN) {
            call.set_does_not_return();
        }
        if resolved.contains(OpAttrs::NO_DUPLICATE) {
            call.set_cannot_duplicate();
        }
    }

    /// The four-element result composite for `elem`.
    pub fn result_quad_type(&mut self, elem: &Type) -> StructRef {
        abi::result_quad(self.module, elem)
    }

    /// The constant-buffer row composite for `elem`.
    pub fn buffer_quad_type(&mut self, elem: &Type) -> StructRef {
        abi::buffer_quad(self.module, elem)
    }

    /// The opaque resource handle type.
    pub fn handle_type(&mut self) -> StructRef {
        abi::handle_type(self.module)
    }

    /// A constant resource-binding record.
    pub fn resource_binding_const(
        &mut self,
        lower_bound: u32,
        upper_bound: u32,
        space: u32,
        class: ResourceClass,
    ) -> Value {
        let ty = Type::Struct(abi::resource_binding(self.module));
        Value::const_struct(
            ty,
            vec![
                Value::const_int(Type::int(32), lower_bound as i64),
                Value::const_int(Type::int(32), upper_bound as i64),
                Value::const_int(Type::int(32), space as i64),
                Value::const_int(Type::int(8), u8::from(class) as i64),
            ],
        )
    }

    /// A constant resource-properties record.
    pub fn resource_properties_const(&mut self, word0: u32, word1: u32) -> Value {
        let ty = Type::Struct(abi::resource_properties(self.module));
        Value::const_struct(
            ty,
            vec![
                Value::const_int(Type::int(32), word0 as i64),
                Value::const_int(Type::int(32), word1 as i64),
            ],
        )
    }
}
