//! Side-effect attribute resolution.
//!
//! Attribute rules are cumulative across versions: a flag introduced at
//! some version stays set at every later version, so resolution is a union
//! over all applicable rules rather than a pick of the latest one.

use bitflags::bitflags;

use crate::catalog::OpCode;
use crate::version::{Version, accumulate};

bitflags! {
    /// Side-effect flags an operation carries at a given version.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpAttrs: u8 {
        /// Reads and writes no memory.
        const NO_MEMORY_ACCESS = 1;
        /// May read memory, never writes it.
        const READ_ONLY_MEMORY = 1 << 1;
        /// Never returns to the caller.
        const NO_RETURN = 1 << 2;
        /// Must not be duplicated by transformations.
        const NO_DUPLICATE = 1 << 3;
    }
}

/// All attribute flags `op` carries at `version`.
pub fn resolve(op: OpCode, version: Version) -> OpAttrs {
    accumulate(op.property().attrs, version)
}
