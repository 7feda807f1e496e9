//! ABI composite types.
//!
//! Certain HLX operations take or return fixed-shape aggregate types from
//! the `hlx.types.` namespace. Every factory here is get-or-create-by-name
//! against the module's type namespace: requesting the same name twice
//! returns the existing definition, never a duplicate. The two
//! element-parameterized families (`ResultQuad`, `BufQuad`) derive their
//! name from the element's classification so distinct element types get
//! distinct, stably-named composites.

use hlx_ir::{Module, StructRef, Type};
use num_enum::IntoPrimitive;

use crate::overload::classify;

/// Namespace prefix for every ABI composite type.
pub const TYPE_NAME_PREFIX: &str = "hlx.types.";

const RESULT_QUAD_PREFIX: &str = "hlx.types.ResultQuad.";
const BUF_QUAD_PREFIX: &str = "hlx.types.BufQuad.";

/// Resource class stored in the last field of a resource binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum ResourceClass {
    ShaderResource = 0,
    UnorderedAccess = 1,
    ConstantBuffer = 2,
    Sampler = 3,
}

/// Name suffix for an element type: the primitive token, or the declared
/// name when the element is itself a named user type.
fn element_suffix(elem: &Type) -> String {
    match elem {
        Type::Struct(def) => def.name().to_string(),
        _ => classify(Some(elem)).primitive_suffix().to_string(),
    }
}

/// `{elem, elem, elem, elem, i32}` — a four-element result plus status word.
pub fn result_quad(module: &mut Module, elem: &Type) -> StructRef {
    let name = format!("{RESULT_QUAD_PREFIX}{}", element_suffix(elem));
    module.get_or_create_struct(
        &name,
        &[
            elem.clone(),
            elem.clone(),
            elem.clone(),
            elem.clone(),
            Type::int(32),
        ],
    )
}

/// A constant-buffer row of `elem`. Field count depends on element width:
/// two 64-bit elements fill a row, eight 16-bit elements do (named with an
/// extra `.8` to disambiguate from minimum-precision layouts), four
/// otherwise.
pub fn buffer_quad(module: &mut Module, elem: &Type) -> StructRef {
    let mut name = format!("{BUF_QUAD_PREFIX}{}", element_suffix(elem));
    if elem.is_64_bit() {
        return module.get_or_create_struct(&name, &[elem.clone(), elem.clone()]);
    }
    if elem.is_16_bit() {
        name.push_str(".8");
        return module.get_or_create_struct(&name, &vec![elem.clone(); 8]);
    }
    module.get_or_create_struct(&name, &vec![elem.clone(); 4])
}

/// `{ptr}` — an opaque resource handle.
pub fn handle_type(module: &mut Module) -> StructRef {
    module.get_or_create_struct("hlx.types.Handle", &[Type::Ptr])
}

/// `{lower_bound: i32, upper_bound: i32, space: i32, class: i8}`.
pub fn resource_binding(module: &mut Module) -> StructRef {
    module.get_or_create_struct(
        "hlx.types.ResBinding",
        &[Type::int(32), Type::int(32), Type::int(32), Type::int(8)],
    )
}

/// `{i32, i32}` — two opaque property words.
pub fn resource_properties(module: &mut Module) -> StructRef {
    module.get_or_create_struct("hlx.types.ResProps", &[Type::int(32), Type::int(32)])
}

/// `{i32, i32}` — the high and low halves of a split double.
pub fn split_double(module: &mut Module) -> StructRef {
    module.get_or_create_struct("hlx.types.SplitDouble", &[Type::int(32), Type::int(32)])
}

/// `{i32, i1}` — a 32-bit result with its carry flag.
pub fn binary_with_carry(module: &mut Module) -> StructRef {
    module.get_or_create_struct("hlx.types.I32Carry", &[Type::int(32), Type::int(1)])
}
