//! Canonical operation names.
//!
//! Every declared callable is named `hlx.op.<class>` for void-overloaded
//! operations and `hlx.op.<class>.<suffix>` otherwise. The suffix is a pure
//! function of the overload kind and type, so repeated resolution of the
//! same operation+overload pair produces the same name and reuses the same
//! declaration.

use hlx_ir::Type;

use crate::overload::OverloadKind;

/// Namespace prefix for every declared operation callable.
pub const OP_NAME_PREFIX: &str = "hlx.op.";

/// The mangled-name suffix for an overload: the primitive token for
/// primitive kinds, the declared composite name for user-defined and object
/// kinds, and a best-effort rendering of the type for anything else.
pub(crate) fn type_suffix(kind: OverloadKind, ty: Option<&Type>) -> String {
    if kind == OverloadKind::USER_DEFINED || kind == OverloadKind::OBJECT {
        return match ty {
            Some(Type::Struct(def)) => def.name().to_string(),
            Some(other) => other.to_string(),
            None => OverloadKind::VOID.primitive_suffix().to_string(),
        };
    }
    match kind.primitive_suffix_checked() {
        Some(token) => token.to_string(),
        None => match ty {
            Some(other) => other.to_string(),
            None => OverloadKind::VOID.primitive_suffix().to_string(),
        },
    }
}

/// The canonical name of the callable for `class` overloaded at `kind`/`ty`.
pub fn overload_name(class: &str, kind: OverloadKind, ty: Option<&Type>) -> String {
    if kind == OverloadKind::VOID {
        return format!("{OP_NAME_PREFIX}{class}");
    }
    format!("{OP_NAME_PREFIX}{class}.{}", type_suffix(kind, ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlx_ir::Module;

    #[test]
    fn void_overload_has_no_suffix() {
        assert_eq!(
            overload_name("barrier", OverloadKind::VOID, None),
            "hlx.op.barrier"
        );
    }

    #[test]
    fn primitive_suffixes() {
        assert_eq!(
            overload_name("unary", OverloadKind::FLOAT, Some(&Type::Float)),
            "hlx.op.unary.f32"
        );
        assert_eq!(
            overload_name("binaryInt", OverloadKind::I64, Some(&Type::int(64))),
            "hlx.op.binaryInt.i64"
        );
    }

    #[test]
    fn user_defined_uses_declared_name() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let payload = m.get_or_create_struct("app.Payload", &[Type::Float]);
        assert_eq!(
            overload_name(
                "trace",
                OverloadKind::USER_DEFINED,
                Some(&Type::Struct(payload))
            ),
            "hlx.op.trace.app.Payload"
        );
    }

    #[test]
    fn pointer_falls_back_to_rendering() {
        // A pointer overload carries no declared name; the mangler renders
        // the type itself.
        assert_eq!(
            overload_name("trace", OverloadKind::USER_DEFINED, Some(&Type::Ptr)),
            "hlx.op.trace.ptr"
        );
    }

    #[test]
    fn undefined_kind_renders_the_type() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let empty = m.get_or_create_struct("odd", &[]);
        assert_eq!(
            overload_name("weird", OverloadKind::empty(), Some(&Type::Struct(empty))),
            "hlx.op.weird.%odd"
        );
    }

    #[test]
    fn same_inputs_mangle_identically() {
        let a = overload_name("unary", OverloadKind::HALF, Some(&Type::Half));
        let b = overload_name("unary", OverloadKind::HALF, Some(&Type::Half));
        assert_eq!(a, b);
    }
}
