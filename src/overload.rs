//! Overload classification.
//!
//! Every overloaded HLX operation is parameterized by a single overload
//! type. [`OverloadKind`] is the abstract category of that type, represented
//! as a bitmask so the catalog can OR kinds together into validity masks.
//! [`classify`] maps a concrete [`Type`] to its kind.

use bitflags::bitflags;
use std::fmt::{self, Display, Formatter};

use hlx_ir::Type;

bitflags! {
    /// Abstract overload category. Single bits are produced by
    /// [`classify`]; unions of bits form the validity masks stored in the
    /// catalog. The empty set is the `Undefined` classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OverloadKind: u16 {
        const VOID = 1;
        const HALF = 1 << 1;
        const FLOAT = 1 << 2;
        const DOUBLE = 1 << 3;
        const I1 = 1 << 4;
        const I8 = 1 << 5;
        const I16 = 1 << 6;
        const I32 = 1 << 7;
        const I64 = 1 << 8;
        /// A user-defined composite type, named by its declaration.
        const USER_DEFINED = 1 << 9;
        /// An opaque object type. Never produced by classification; used
        /// only as validity-mask vocabulary.
        const OBJECT = 1 << 10;
    }
}

impl OverloadKind {
    const SUFFIX_TOKENS: &'static [(OverloadKind, &'static str)] = &[
        (OverloadKind::VOID, "void"),
        (OverloadKind::HALF, "f16"),
        (OverloadKind::FLOAT, "f32"),
        (OverloadKind::DOUBLE, "f64"),
        (OverloadKind::I1, "i1"),
        (OverloadKind::I8, "i8"),
        (OverloadKind::I16, "i16"),
        (OverloadKind::I32, "i32"),
        (OverloadKind::I64, "i64"),
    ];

    /// Canonical suffix token for a single primitive kind, as it appears in
    /// mangled operation names and ABI type names, or `None` for
    /// user-defined, object, and multi-bit kinds.
    pub fn primitive_suffix_checked(self) -> Option<&'static str> {
        Self::SUFFIX_TOKENS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, token)| *token)
    }

    /// Like [`Self::primitive_suffix_checked`], for callers that know the
    /// kind is primitive. Anything else is a catalog-authoring bug.
    pub fn primitive_suffix(self) -> &'static str {
        self.primitive_suffix_checked()
            .unwrap_or_else(|| unreachable!("no primitive suffix for overload kind {self}"))
    }
}

impl Display for OverloadKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "undefined");
        }
        let mut first = true;
        for (_, flag) in self.iter_names() {
            if !first {
                write!(f, "|")?;
            }
            first = false;
            if flag == OverloadKind::USER_DEFINED {
                write!(f, "udt")?;
            } else if flag == OverloadKind::OBJECT {
                write!(f, "obj")?;
            } else {
                write!(f, "{}", flag.primitive_suffix())?;
            }
        }
        Ok(())
    }
}

/// Classify a type as an overload kind. `None` (no type) classifies as
/// `VOID`, matching a non-overloaded signature.
///
/// A struct classifies by recursively classifying its first field: a packed
/// aggregate of same-width-class elements takes the class of its element.
/// An empty struct, and any shape with no mapping, is the empty
/// (`Undefined`) kind.
///
/// Integer widths other than 1/8/16/32/64 cannot appear in the trusted
/// catalog or in overload positions; hitting one is fatal rather than a
/// recoverable error.
pub fn classify(ty: Option<&Type>) -> OverloadKind {
    let Some(ty) = ty else {
        return OverloadKind::VOID;
    };
    match ty {
        Type::Void => OverloadKind::VOID,
        Type::Half => OverloadKind::HALF,
        Type::Float => OverloadKind::FLOAT,
        Type::Double => OverloadKind::DOUBLE,
        Type::Int(bits) => match bits {
            1 => OverloadKind::I1,
            8 => OverloadKind::I8,
            16 => OverloadKind::I16,
            32 => OverloadKind::I32,
            64 => OverloadKind::I64,
            other => unreachable!("unsupported overload integer width i{other}"),
        },
        Type::Ptr => OverloadKind::USER_DEFINED,
        Type::Struct(def) => match def.fields().first() {
            Some(first) => classify(Some(first)),
            None => OverloadKind::empty(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlx_ir::Module;

    #[test]
    fn primitives_map_directly() {
        assert_eq!(classify(Some(&Type::Void)), OverloadKind::VOID);
        assert_eq!(classify(Some(&Type::Half)), OverloadKind::HALF);
        assert_eq!(classify(Some(&Type::Float)), OverloadKind::FLOAT);
        assert_eq!(classify(Some(&Type::Double)), OverloadKind::DOUBLE);
        assert_eq!(classify(Some(&Type::int(1))), OverloadKind::I1);
        assert_eq!(classify(Some(&Type::int(8))), OverloadKind::I8);
        assert_eq!(classify(Some(&Type::int(16))), OverloadKind::I16);
        assert_eq!(classify(Some(&Type::int(32))), OverloadKind::I32);
        assert_eq!(classify(Some(&Type::int(64))), OverloadKind::I64);
    }

    #[test]
    fn absent_type_is_void() {
        assert_eq!(classify(None), OverloadKind::VOID);
    }

    #[test]
    fn pointer_is_user_defined() {
        assert_eq!(classify(Some(&Type::Ptr)), OverloadKind::USER_DEFINED);
    }

    #[test]
    fn struct_takes_class_of_first_field() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let packed = m.get_or_create_struct("packed", &[Type::Half, Type::Half, Type::Half]);
        assert_eq!(classify(Some(&Type::Struct(packed))), OverloadKind::HALF);
    }

    #[test]
    fn nested_struct_unwraps_recursively() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let inner = m.get_or_create_struct("inner", &[Type::int(32), Type::int(32)]);
        let outer = m.get_or_create_struct("outer", &[Type::Struct(inner), Type::int(32)]);
        assert_eq!(classify(Some(&Type::Struct(outer))), OverloadKind::I32);
    }

    #[test]
    fn empty_struct_is_undefined() {
        let mut m = Module::new("m", "hlx1.0-compute");
        let empty = m.get_or_create_struct("empty", &[]);
        assert_eq!(classify(Some(&Type::Struct(empty))), OverloadKind::empty());
    }

    #[test]
    #[should_panic(expected = "unsupported overload integer width")]
    fn unsupported_width_is_fatal() {
        classify(Some(&Type::int(24)));
    }

    #[test]
    fn suffix_tokens() {
        assert_eq!(OverloadKind::HALF.primitive_suffix(), "f16");
        assert_eq!(OverloadKind::I64.primitive_suffix(), "i64");
        assert_eq!(OverloadKind::VOID.primitive_suffix(), "void");
    }

    #[test]
    fn mask_display() {
        let mask = OverloadKind::FLOAT | OverloadKind::DOUBLE;
        assert_eq!(mask.to_string(), "f32|f64");
        assert_eq!(OverloadKind::empty().to_string(), "undefined");
        assert_eq!(OverloadKind::USER_DEFINED.to_string(), "udt");
    }
}
