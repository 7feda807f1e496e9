//! Host IR substrate for the HLX lowering pipeline.
//!
//! This crate provides the small value/type system the operation builder in
//! the `hlx` crate works against: first-class [`Type`]s, a [`Module`] that
//! owns name-keyed caches of struct types and callable declarations, typed
//! [`Value`] operands, and [`CallInst`] call expressions with call-site
//! [`CallAttrs`].
//!
//! The module is the unit of ownership: all named definitions live in its
//! caches, so processing independent modules never shares or leaks
//! definitions between them.

mod module;
mod ty;
mod value;

pub use module::{FuncDecl, FuncRef, Module};
pub use ty::{FnSig, StructDef, StructRef, Type};
pub use value::{CallAttrs, CallInst, Value};
