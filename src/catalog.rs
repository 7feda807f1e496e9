//! The static operation catalog.
//!
//! Every HLX operation is described by one [`OpProperty`] record: its base
//! name, mangling class, parameter-kind list, which position determines the
//! overload type, and three version-indexed tables (overload validity,
//! stage validity, side-effect attributes). The whole catalog is expanded
//! from the single declarative `op_catalog!` table below into immutable
//! static data; nothing here is mutated at runtime.
//!
//! Table invariants (checked by tests, relied on by the resolver): every
//! version-indexed sequence is sorted ascending by version, overload and
//! stage tables are non-empty, and an operation's overload-determining
//! position actually names an `Overload` placeholder.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{self, Display, Formatter};

use crate::attrs::OpAttrs;
use crate::overload::OverloadKind;
use crate::stage::StageMask;
use crate::version::{Version, Versioned};

/// A parameter or return slot in an operation signature. Primitive kinds
/// map directly to IR types; `Overload` substitutes the resolved overload
/// type; the quad kinds substitute an ABI composite parameterized either by
/// the overload type or by the fixed element they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Void,
    Half,
    Float,
    Double,
    I1,
    I8,
    I16,
    I32,
    I64,
    /// The resolved overload type.
    Overload,
    Handle,
    ResBinding,
    ResProps,
    SplitDouble,
    I32Carry,
    ResultQuadOverload,
    ResultQuadHalf,
    ResultQuadFloat,
    ResultQuadDouble,
    ResultQuadI16,
    ResultQuadI32,
    ResultQuadI64,
    BufQuadOverload,
    BufQuadHalf,
    BufQuadFloat,
    BufQuadDouble,
    BufQuadI16,
    BufQuadI32,
    BufQuadI64,
}

/// Which position of a call determines the overload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadParam {
    /// Fixed, non-overloaded signature.
    None,
    /// The explicit return type requested by the caller.
    Ret,
    /// The type of the argument at this zero-based position.
    Arg(u8),
}

/// Static catalog record for one operation.
#[derive(Debug)]
pub struct OpProperty {
    /// Canonical base name.
    pub name: &'static str,
    /// Mangling class; operations sharing a class share declarations.
    pub class: &'static str,
    /// Return slot.
    pub ret: ParamKind,
    /// Parameter slots, excluding the leading i32 discriminator.
    pub params: &'static [ParamKind],
    /// Which position determines the overload type.
    pub overload_param: OverloadParam,
    /// Overload validity per version, ascending. Replacement semantics.
    pub overloads: &'static [Versioned<OverloadKind>],
    /// Stage validity per version, ascending. Replacement semantics.
    pub stages: &'static [Versioned<StageMask>],
    /// Attribute rules per version, ascending. Cumulative semantics.
    pub attrs: &'static [Versioned<OpAttrs>],
}

const FLT16_32: OverloadKind = OverloadKind::HALF.union(OverloadKind::FLOAT);
const FLT_ANY: OverloadKind = FLT16_32.union(OverloadKind::DOUBLE);
const FLT32_64: OverloadKind = OverloadKind::FLOAT.union(OverloadKind::DOUBLE);
const INT32_64: OverloadKind = OverloadKind::I32.union(OverloadKind::I64);
const INT_WIDE: OverloadKind = OverloadKind::I16.union(INT32_64);
const NUM_ANY: OverloadKind = FLT_ANY.union(INT_WIDE);
const LOAD_ELEMS: OverloadKind = FLT16_32.union(OverloadKind::I16).union(OverloadKind::I32);
/// Mask carried by fixed-signature operations: the classification of "no
/// overload type".
const FIXED: OverloadKind = OverloadKind::VOID;

const COMPUTE_LIKE: StageMask = StageMask::COMPUTE
    .union(StageMask::LIBRARY)
    .union(StageMask::MESH)
    .union(StageMask::TASK);

macro_rules! op_catalog {
    ($(
        $(#[$meta:meta])*
        $code:literal $variant:ident = $name:literal class $class:literal {
            ret: $ret:ident,
            params: [$($param:ident),* $(,)?],
            overload: $ovp:expr,
            overloads: [$(($omaj:literal, $omin:literal) => $omask:expr),+ $(,)?],
            stages: [$(($smaj:literal, $smin:literal) => $smask:expr),+ $(,)?],
            attrs: [$(($amaj:literal, $amin:literal) => $amask:expr),* $(,)?] $(,)?
        }
    )+) => {
        /// An operation in the HLX catalog. The numeric value is the
        /// discriminator injected as the first argument of every call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
        #[repr(u32)]
        pub enum OpCode {
            $($(#[$meta])* $variant = $code,)+
        }

        impl OpCode {
            /// Every operation in the catalog.
            pub const ALL: &'static [OpCode] = &[$(OpCode::$variant),+];

            /// The operation's canonical base name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(OpCode::$variant => $name,)+
                }
            }

            /// The operation's static catalog record. Total by
            /// construction: the enum is closed and the table complete.
            pub fn property(self) -> &'static OpProperty {
                match self {
                    $(OpCode::$variant => {
                        static PROP: OpProperty = OpProperty {
                            name: $name,
                            class: $class,
                            ret: ParamKind::$ret,
                            params: &[$(ParamKind::$param),*],
                            overload_param: $ovp,
                            overloads: &[$(Versioned::new(
                                Version::new($omaj, $omin), $omask)),+],
                            stages: &[$(Versioned::new(
                                Version::new($smaj, $smin), $smask)),+],
                            attrs: &[$(Versioned::new(
                                Version::new($amaj, $amin), $amask)),*],
                        };
                        &PROP
                    })+
                }
            }
        }
    };
}

op_catalog! {
    /// Sine of the input.
    13 Sin = "Sin" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Cosine of the input.
    14 Cos = "Cos" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Tangent of the input.
    15 Tan = "Tan" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Base-2 exponential.
    16 Exp = "Exp" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Base-2 logarithm.
    17 Log = "Log" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Square root.
    18 Sqrt = "Sqrt" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Reciprocal square root.
    19 Rsqrt = "Rsqrt" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Fractional part of the input.
    20 Frac = "Frac" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Clamp to [0, 1]. Double support arrived with version 1.2.
    21 Saturate = "Saturate" class "unary" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32, (1, 2) => FLT_ANY],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// True if the input is NaN.
    24 IsNaN = "IsNaN" class "isSpecialFloat" {
        ret: I1,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// True if the input is infinite.
    25 IsInf = "IsInf" class "isSpecialFloat" {
        ret: I1,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// True if the input is finite.
    26 IsFinite = "IsFinite" class "isSpecialFloat" {
        ret: I1,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Reverse the bits of the input. 16-bit support arrived with 1.2.
    30 BitReverse = "BitReverse" class "unaryBits" {
        ret: Overload,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => INT32_64, (1, 2) => INT_WIDE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Population count; always returns i32.
    31 CountBits = "CountBits" class "countBits" {
        ret: I32,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => INT32_64, (1, 2) => INT_WIDE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Floating-point maximum.
    35 FMax = "FMax" class "binary" {
        ret: Overload,
        params: [Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT_ANY],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Floating-point minimum.
    36 FMin = "FMin" class "binary" {
        ret: Overload,
        params: [Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT_ANY],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Signed integer maximum.
    37 IMax = "IMax" class "binaryInt" {
        ret: Overload,
        params: [Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => INT32_64, (1, 2) => INT_WIDE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Signed integer minimum.
    38 IMin = "IMin" class "binaryInt" {
        ret: Overload,
        params: [Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => INT32_64, (1, 2) => INT_WIDE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Fused multiply-add. Integer support arrived with 1.2.
    46 Mad = "Mad" class "tertiary" {
        ret: Overload,
        params: [Overload, Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT32_64, (1, 2) => FLT32_64.union(OverloadKind::I32)],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// IEEE-754 fused multiply-add, double precision only.
    47 Fma = "Fma" class "tertiary" {
        ret: Overload,
        params: [Overload, Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => OverloadKind::DOUBLE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Two-component dot product.
    54 Dot2 = "Dot2" class "dot2" {
        ret: Overload,
        params: [Overload, Overload, Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Three-component dot product.
    55 Dot3 = "Dot3" class "dot3" {
        ret: Overload,
        params: [Overload, Overload, Overload, Overload, Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Four-component dot product.
    56 Dot4 = "Dot4" class "dot4" {
        ret: Overload,
        params: [Overload, Overload, Overload, Overload, Overload, Overload, Overload, Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => FLT16_32],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Create a resource handle from index-era binding data. Withdrawn in
    /// 1.6 in favour of `CreateHandleFromBinding`.
    57 CreateHandle = "CreateHandle" class "createHandle" {
        ret: Handle,
        params: [I8, I32, I32, I1],
        overload: OverloadParam::None,
        overloads: [(1, 0) => FIXED],
        stages: [(1, 0) => StageMask::ALL, (1, 6) => StageMask::WITHDRAWN],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS, (1, 3) => OpAttrs::READ_ONLY_MEMORY],
    }
    /// Load one row from a constant buffer.
    59 ConstBufLoad = "ConstBufLoad" class "constBufLoad" {
        ret: BufQuadOverload,
        params: [Handle, I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 0) => NUM_ANY],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::READ_ONLY_MEMORY],
    }
    /// Load four elements from a typed buffer.
    68 BufferLoad = "BufferLoad" class "bufferLoad" {
        ret: ResultQuadOverload,
        params: [Handle, I32, I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 0) => LOAD_ELEMS],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::READ_ONLY_MEMORY],
    }
    /// Store four elements to a typed buffer.
    69 BufferStore = "BufferStore" class "bufferStore" {
        ret: Void,
        params: [Handle, I32, I32, Overload, Overload, Overload, Overload, I8],
        overload: OverloadParam::Arg(3),
        overloads: [(1, 0) => LOAD_ELEMS],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [],
    }
    /// Sample position for a given sample index; fixed f32 result quad.
    72 SamplePos = "SamplePos" class "samplePos" {
        ret: ResultQuadFloat,
        params: [Handle, I32],
        overload: OverloadParam::None,
        overloads: [(1, 0) => FIXED],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Execution and memory barrier.
    80 Barrier = "Barrier" class "barrier" {
        ret: Void,
        params: [I32],
        overload: OverloadParam::None,
        overloads: [(1, 0) => FIXED],
        stages: [(1, 0) => COMPUTE_LIKE],
        attrs: [(1, 0) => OpAttrs::NO_DUPLICATE],
    }
    /// Conditionally discard the current fragment.
    82 Discard = "Discard" class "discard" {
        ret: Void,
        params: [I1],
        overload: OverloadParam::None,
        overloads: [(1, 0) => FIXED],
        stages: [(1, 0) => StageMask::FRAGMENT],
        attrs: [],
    }
    /// Dispatch-global thread id component.
    93 ThreadId = "ThreadId" class "threadId" {
        ret: Overload,
        params: [I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 0) => OverloadKind::I32],
        stages: [(1, 0) => COMPUTE_LIKE],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Thread-group id component.
    94 GroupId = "GroupId" class "groupId" {
        ret: Overload,
        params: [I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 0) => OverloadKind::I32],
        stages: [(1, 0) => COMPUTE_LIKE],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Assemble a double from two 32-bit halves.
    101 MakeDouble = "MakeDouble" class "makeDouble" {
        ret: Overload,
        params: [I32, I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 0) => OverloadKind::DOUBLE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Split a double into its 32-bit halves.
    102 SplitDouble = "SplitDouble" class "splitDouble" {
        ret: SplitDouble,
        params: [Overload],
        overload: OverloadParam::Arg(0),
        overloads: [(1, 0) => OverloadKind::DOUBLE],
        stages: [(1, 0) => StageMask::ALL],
        attrs: [(1, 0) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Index of the current lane within its wave. Introduced in 1.1.
    111 LaneIndex = "LaneIndex" class "laneIndex" {
        ret: I32,
        params: [],
        overload: OverloadParam::None,
        overloads: [(1, 1) => FIXED],
        stages: [(1, 1) => StageMask::ALL],
        attrs: [(1, 1) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Pack two f16 values into an i32. Introduced in 1.2.
    130 Pack2xF16 = "Pack2xF16" class "pack2xF16" {
        ret: I32,
        params: [Half, Half],
        overload: OverloadParam::None,
        overloads: [(1, 2) => FIXED],
        stages: [(1, 2) => StageMask::ALL],
        attrs: [(1, 2) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Load from a raw buffer with per-component alignment. Introduced in
    /// 1.2.
    139 RawBufferLoad = "RawBufferLoad" class "rawBufferLoad" {
        ret: ResultQuadOverload,
        params: [Handle, I32, I32, I8, I32],
        overload: OverloadParam::Ret,
        overloads: [(1, 2) => NUM_ANY],
        stages: [(1, 2) => StageMask::ALL],
        attrs: [(1, 2) => OpAttrs::READ_ONLY_MEMORY],
    }
    /// Store to a raw buffer with per-component alignment. Introduced in
    /// 1.2.
    140 RawBufferStore = "RawBufferStore" class "rawBufferStore" {
        ret: Void,
        params: [Handle, I32, I32, Overload, Overload, Overload, Overload, I8, I32],
        overload: OverloadParam::Arg(3),
        overloads: [(1, 2) => NUM_ANY],
        stages: [(1, 2) => StageMask::ALL],
        attrs: [],
    }
    /// Reject the current ray-triangle intersection and stop the any-hit
    /// invocation.
    155 IgnoreHit = "IgnoreHit" class "ignoreHit" {
        ret: Void,
        params: [],
        overload: OverloadParam::None,
        overloads: [(1, 3) => FIXED],
        stages: [(1, 3) => StageMask::ANY_HIT],
        attrs: [(1, 3) => OpAttrs::NO_RETURN],
    }
    /// Accept the current hit and stop further traversal.
    156 AcceptHitAndEndSearch = "AcceptHitAndEndSearch" class "acceptHitAndEndSearch" {
        ret: Void,
        params: [],
        overload: OverloadParam::None,
        overloads: [(1, 3) => FIXED],
        stages: [(1, 3) => StageMask::ANY_HIT],
        attrs: [(1, 3) => OpAttrs::NO_RETURN],
    }
    /// 32-bit addition with carry-out. Introduced in 1.3.
    205 AddWithCarry = "AddWithCarry" class "addWithCarry" {
        ret: I32Carry,
        params: [I32, I32],
        overload: OverloadParam::None,
        overloads: [(1, 3) => FIXED],
        stages: [(1, 3) => StageMask::ALL],
        attrs: [(1, 3) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Attach resource properties to a handle. Introduced in 1.6.
    216 AnnotateHandle = "AnnotateHandle" class "annotateHandle" {
        ret: Handle,
        params: [Handle, ResProps],
        overload: OverloadParam::None,
        overloads: [(1, 6) => FIXED],
        stages: [(1, 6) => StageMask::ALL],
        attrs: [(1, 6) => OpAttrs::NO_MEMORY_ACCESS],
    }
    /// Create a resource handle from an explicit binding record.
    /// Introduced in 1.6, replacing `CreateHandle`.
    217 CreateHandleFromBinding = "CreateHandleFromBinding" class "createHandleFromBinding" {
        ret: Handle,
        params: [ResBinding, I32, I1],
        overload: OverloadParam::None,
        overloads: [(1, 6) => FIXED],
        stages: [(1, 6) => StageMask::ALL],
        attrs: [(1, 6) => OpAttrs::NO_MEMORY_ACCESS],
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
