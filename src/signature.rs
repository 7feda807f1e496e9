//! Signature synthesis.
//!
//! Builds the concrete function signature for an operation from its
//! catalog record: a leading i32 discriminator, then one parameter per
//! catalog slot with placeholders substituted — the overload slot becomes
//! the resolved overload type, ABI slots become get-or-create calls into
//! the `hlx.types.` factories.

use hlx_ir::{FnSig, Module, Type};

use crate::abi;
use crate::catalog::{OpProperty, ParamKind};

/// Materialize one parameter slot. `overload` is required whenever the slot
/// references the overload type; the catalog guarantees non-overloaded
/// operations never contain such slots.
fn slot_type(kind: ParamKind, module: &mut Module, overload: Option<&Type>) -> Type {
    let overload_ty =
        || -> Type { overload.expect("overload slot in a fixed signature").clone() };
    match kind {
        ParamKind::Void => Type::Void,
        ParamKind::Half => Type::Half,
        ParamKind::Float => Type::Float,
        ParamKind::Double => Type::Double,
        ParamKind::I1 => Type::int(1),
        ParamKind::I8 => Type::int(8),
        ParamKind::I16 => Type::int(16),
        ParamKind::I32 => Type::int(32),
        ParamKind::I64 => Type::int(64),
        ParamKind::Overload => overload_ty(),
        ParamKind::Handle => Type::Struct(abi::handle_type(module)),
        ParamKind::ResBinding => Type::Struct(abi::resource_binding(module)),
        ParamKind::ResProps => Type::Struct(abi::resource_properties(module)),
        ParamKind::SplitDouble => Type::Struct(abi::split_double(module)),
        ParamKind::I32Carry => Type::Struct(abi::binary_with_carry(module)),
        ParamKind::ResultQuadOverload => Type::Struct(abi::result_quad(module, &overload_ty())),
        ParamKind::ResultQuadHalf => Type::Struct(abi::result_quad(module, &Type::Half)),
        ParamKind::ResultQuadFloat => Type::Struct(abi::result_quad(module, &Type::Float)),
        ParamKind::ResultQuadDouble => Type::Struct(abi::result_quad(module, &Type::Double)),
        ParamKind::ResultQuadI16 => Type::Struct(abi::result_quad(module, &Type::int(16))),
        ParamKind::ResultQuadI32 => Type::Struct(abi::result_quad(module, &Type::int(32))),
        ParamKind::ResultQuadI64 => Type::Struct(abi::result_quad(module, &Type::int(64))),
        ParamKind::BufQuadOverload => Type::Struct(abi::buffer_quad(module, &overload_ty())),
        ParamKind::BufQuadHalf => Type::Struct(abi::buffer_quad(module, &Type::Half)),
        ParamKind::BufQuadFloat => Type::Struct(abi::buffer_quad(module, &Type::Float)),
        ParamKind::BufQuadDouble => Type::Struct(abi::buffer_quad(module, &Type::Double)),
        ParamKind::BufQuadI16 => Type::Struct(abi::buffer_quad(module, &Type::int(16))),
        ParamKind::BufQuadI32 => Type::Struct(abi::buffer_quad(module, &Type::int(32))),
        ParamKind::BufQuadI64 => Type::Struct(abi::buffer_quad(module, &Type::int(64))),
    }
}

/// The full signature of an operation callable: return type and parameter
/// list, with the i32 discriminator injected as the first parameter.
pub fn function_type(prop: &OpProperty, module: &mut Module, overload: Option<&Type>) -> FnSig {
    let ret = slot_type(prop.ret, module, overload);
    let mut params = Vec::with_capacity(prop.params.len() + 1);
    params.push(Type::int(32));
    for &kind in prop.params {
        params.push(slot_type(kind, module, overload));
    }
    FnSig::new(params, ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OpCode;

    fn module() -> Module {
        Module::new("m", "hlx1.0-compute")
    }

    #[test]
    fn discriminator_is_first_parameter() {
        let mut m = module();
        let sig = function_type(OpCode::Sin.property(), &mut m, Some(&Type::Float));
        assert_eq!(sig.params[0], Type::int(32));
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.ret, Type::Float);
    }

    #[test]
    fn overload_slots_substitute_the_overload_type() {
        let mut m = module();
        let sig = function_type(OpCode::FMax.property(), &mut m, Some(&Type::Double));
        assert_eq!(sig.params, vec![Type::int(32), Type::Double, Type::Double]);
        assert_eq!(sig.ret, Type::Double);
    }

    #[test]
    fn abi_slots_are_parameterized_by_the_overload() {
        let mut m = module();
        let sig = function_type(OpCode::BufferLoad.property(), &mut m, Some(&Type::int(32)));
        let quad = sig.ret.as_struct().expect("struct return");
        assert_eq!(quad.name(), "hlx.types.ResultQuad.i32");
        // handle, index, offset after the discriminator
        assert_eq!(sig.params.len(), 4);
        assert_eq!(
            sig.params[1].as_struct().expect("handle").name(),
            "hlx.types.Handle"
        );
    }

    #[test]
    fn fixed_abi_slots_ignore_the_overload() {
        let mut m = module();
        let sig = function_type(OpCode::SamplePos.property(), &mut m, None);
        assert_eq!(
            sig.ret.as_struct().expect("struct return").name(),
            "hlx.types.ResultQuad.f32"
        );
    }

    #[test]
    fn fixed_signatures_need_no_overload() {
        let mut m = module();
        let sig = function_type(OpCode::AddWithCarry.property(), &mut m, None);
        assert_eq!(
            sig.ret.as_struct().expect("struct return").name(),
            "hlx.types.I32Carry"
        );
        assert_eq!(sig.params, vec![Type::int(32), Type::int(32), Type::int(32)]);
    }

    #[test]
    fn buffer_quad_return_follows_element_width() {
        let mut m = module();
        let sig = function_type(OpCode::ConstBufLoad.property(), &mut m, Some(&Type::Half));
        let row = sig.ret.as_struct().expect("struct return");
        assert_eq!(row.name(), "hlx.types.BufQuad.f16.8");
        assert_eq!(row.fields().len(), 8);
    }

    #[test]
    #[should_panic(expected = "overload slot in a fixed signature")]
    fn overload_slot_without_overload_is_fatal() {
        let mut m = module();
        function_type(OpCode::Sin.property(), &mut m, None);
    }
}
