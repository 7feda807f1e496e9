//! Resolution and construction of HLX operation calls.
//!
//! The HLX backend lowers a portable shading IR to the HLX instruction
//! set, whose operations are exposed as calls to generic callables named
//! `hlx.op.<class>[.<suffix>]` with an i32 discriminator as their first
//! argument. This crate is the engine that resolves such a call: it picks
//! the overload type, validates it and the target stage against the
//! version-indexed catalog tables, synthesizes the exact signature
//! (including the `hlx.types.` ABI composites), mangles the canonical
//! callable name, declares the callable in the host module, and attaches
//! the operation's cumulative side-effect attributes to the call.
//!
//! # Example
//!
//! ```
//! use hlx::{OpBuilder, OpCode};
//! use hlx_ir::{Module, Type, Value};
//!
//! let mut module = Module::new("demo", "hlx1.3-compute");
//! let mut builder = OpBuilder::new(&mut module);
//!
//! let x = Value::const_float(Type::Float, 0.5);
//! let call = builder.try_create_op(OpCode::Sin, &[x], "s", None)?;
//!
//! assert_eq!(call.callee_name(), "hlx.op.unary.f32");
//! assert!(call.does_not_access_memory());
//! # Ok::<(), hlx::OpError>(())
//! ```
//!
//! Resolution is a pure function of the catalog, the module's target, and
//! the request; its only side effects are idempotent insertions of named
//! types and callables into the module. All recoverable failures are
//! reported as [`OpError`] with no module mutation.

mod abi;
mod attrs;
mod builder;
mod catalog;
mod error;
mod mangle;
mod overload;
mod signature;
mod stage;
mod target;
mod version;

pub use abi::{ResourceClass, TYPE_NAME_PREFIX};
pub use attrs::{OpAttrs, resolve as resolve_attrs};
pub use builder::OpBuilder;
pub use catalog::{OpCode, OpProperty, OverloadParam, ParamKind};
pub use error::OpError;
pub use mangle::{OP_NAME_PREFIX, overload_name};
pub use overload::{OverloadKind, classify};
pub use stage::{Stage, StageMask};
pub use target::TargetContext;
pub use version::{Version, Versioned, accumulate, pick_latest};
