//! Target context.
//!
//! The host module carries a textual target descriptor of the form
//! `hlx<major>.<minor>-<stage>` (e.g. `hlx1.3-compute`). The descriptor is
//! validated when the module is constructed by earlier stages of the
//! pipeline, so the builder resolves it exactly once and treats a
//! malformed descriptor or unrecognized stage as a fatal usage error
//! rather than a per-call failure.

use crate::stage::Stage;
use crate::version::Version;

/// The resolved (version, stage) pair an operation builder works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetContext {
    pub version: Version,
    pub stage: Stage,
}

impl TargetContext {
    /// Parse a target descriptor. Panics on a malformed descriptor or an
    /// unknown stage; both are programming-contract violations.
    pub fn parse(descriptor: &str) -> Self {
        let rest = descriptor
            .strip_prefix("hlx")
            .unwrap_or_else(|| panic!("malformed target descriptor '{descriptor}'"));
        let (version_part, stage_part) = rest
            .split_once('-')
            .unwrap_or_else(|| panic!("malformed target descriptor '{descriptor}'"));
        let (major, minor) = version_part
            .split_once('.')
            .unwrap_or_else(|| panic!("malformed target version in '{descriptor}'"));
        let major: u32 = major
            .parse()
            .unwrap_or_else(|_| panic!("malformed target version in '{descriptor}'"));
        let minor: u32 = minor
            .parse()
            .unwrap_or_else(|_| panic!("malformed target version in '{descriptor}'"));
        let stage = Stage::from_name(stage_part).unwrap_or_else(|| {
            panic!("unknown execution stage '{stage_part}' in target descriptor '{descriptor}'")
        });
        Self {
            version: Version::new(major, minor),
            stage,
        }
    }
}
