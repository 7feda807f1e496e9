//! Error types for operation resolution.
//!
//! Every variant is recoverable and reported to the immediate caller with
//! no module mutation. Contract violations (unknown stage at construction,
//! unsupported integer widths in classification) panic instead; see the
//! module docs of `overload` and `target`.

use thiserror::Error;

use crate::catalog::OpCode;
use crate::overload::OverloadKind;
use crate::stage::Stage;
use crate::version::Version;

/// A recoverable failure while resolving an operation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpError {
    /// An overloaded operation was requested without a determinable
    /// overload type.
    #[error("cannot create {op} operation: overloaded on unknown return type")]
    OverloadTypeUnknown { op: OpCode },

    /// Too few arguments to reach the overload-determining position.
    #[error("cannot create {op} operation: wrong number of arguments ({got} given)")]
    ArgumentCountMismatch { op: OpCode, got: usize },

    /// The target version predates every entry in an overload or stage
    /// table.
    #[error("cannot create {op} operation: no applicable entry for version {version}")]
    NoApplicableVersion { op: OpCode, version: Version },

    /// The classified overload kind is not in the version-applicable
    /// validity mask.
    #[error("cannot create {op} operation: invalid overload type {kind}")]
    InvalidOverloadType { op: OpCode, kind: OverloadKind },

    /// The operation has been withdrawn as of the applicable stage-table
    /// entry.
    #[error("cannot create {op} operation: operation has been withdrawn")]
    OperationRemoved { op: OpCode },

    /// The target stage is not in the version-applicable stage mask.
    #[error("cannot create {op} operation: invalid stage {stage}")]
    InvalidStage { op: OpCode, stage: Stage },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_operation_name() {
        let err = OpError::InvalidOverloadType {
            op: OpCode::Sin,
            kind: OverloadKind::I32,
        };
        assert_eq!(
            err.to_string(),
            "cannot create Sin operation: invalid overload type i32"
        );

        let err = OpError::NoApplicableVersion {
            op: OpCode::LaneIndex,
            version: Version::new(1, 0),
        };
        assert_eq!(
            err.to_string(),
            "cannot create LaneIndex operation: no applicable entry for version 1.0"
        );

        let err = OpError::InvalidStage {
            op: OpCode::Discard,
            stage: Stage::Compute,
        };
        assert_eq!(
            err.to_string(),
            "cannot create Discard operation: invalid stage compute"
        );
    }
}
