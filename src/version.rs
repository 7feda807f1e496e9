//! Version-indexed table resolution.
//!
//! Catalog tables are sequences of [`Versioned`] records sorted ascending
//! by version. Two resolution modes exist and are deliberately kept as two
//! distinctly named functions: [`pick_latest`] implements *replacement*
//! semantics (each record supersedes the previous one), [`accumulate`]
//! implements *cumulative* semantics (payloads union up across versions).
//! Swapping one for the other is a semantic bug, not a refactor.

use bitflags::Flags;
use std::fmt::{self, Display, Formatter};

/// A target version, ordered lexicographically by (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A payload tagged with the version it applies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Versioned<T> {
    pub since: Version,
    pub payload: T,
}

impl<T> Versioned<T> {
    #[inline]
    pub const fn new(since: Version, payload: T) -> Self {
        Self { since, payload }
    }
}

/// Most-recent-applicable resolution: the last record whose version is at
/// or before `target`, or `None` if `target` predates every record.
///
/// `records` must be sorted ascending by `since`.
pub fn pick_latest<T>(records: &[Versioned<T>], target: Version) -> Option<&T> {
    records
        .iter()
        .rev()
        .find(|r| r.since <= target)
        .map(|r| &r.payload)
}

/// Cumulative resolution: the union of every payload whose version is at or
/// before `target`. A flag introduced at version N stays set at all later
/// versions.
pub fn accumulate<F: Flags + Copy>(records: &[Versioned<F>], target: Version) -> F {
    records
        .iter()
        .filter(|r| r.since <= target)
        .fold(F::empty(), |acc, r| acc.union(r.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::OpAttrs;
    use crate::overload::OverloadKind;

    const V1_0: Version = Version::new(1, 0);
    const V1_1: Version = Version::new(1, 1);
    const V1_2: Version = Version::new(1, 2);
    const V1_5: Version = Version::new(1, 5);

    fn overload_table() -> [Versioned<OverloadKind>; 2] {
        [
            Versioned::new(V1_0, OverloadKind::FLOAT.union(OverloadKind::DOUBLE)),
            Versioned::new(
                V1_2,
                OverloadKind::FLOAT
                    .union(OverloadKind::DOUBLE)
                    .union(OverloadKind::I32),
            ),
        ]
    }

    #[test]
    fn version_ordering() {
        assert!(Version::new(1, 0) < Version::new(1, 1));
        assert!(Version::new(1, 9) < Version::new(2, 0));
        assert_eq!(Version::new(1, 3).to_string(), "1.3");
    }

    #[test]
    fn latest_returns_most_recent_applicable() {
        let table = overload_table();
        assert_eq!(
            pick_latest(&table, V1_5),
            Some(&(OverloadKind::FLOAT | OverloadKind::DOUBLE | OverloadKind::I32))
        );
    }

    #[test]
    fn latest_is_replacement_not_union() {
        // Resolving between two entries returns exactly the earlier mask.
        let table = overload_table();
        let mask = pick_latest(&table, V1_1).copied().unwrap();
        assert_eq!(mask, OverloadKind::FLOAT | OverloadKind::DOUBLE);
        assert!(!mask.contains(OverloadKind::I32));
    }

    #[test]
    fn latest_is_none_when_target_predates_all() {
        let table = [Versioned::new(V1_2, OverloadKind::FLOAT)];
        assert_eq!(pick_latest(&table, V1_0), None);
    }

    #[test]
    fn latest_exact_boundary_matches() {
        let table = overload_table();
        assert_eq!(
            pick_latest(&table, V1_2),
            Some(&(OverloadKind::FLOAT | OverloadKind::DOUBLE | OverloadKind::I32))
        );
    }

    #[test]
    fn accumulate_unions_all_applicable() {
        let table = [
            Versioned::new(V1_0, OpAttrs::NO_MEMORY_ACCESS),
            Versioned::new(V1_2, OpAttrs::READ_ONLY_MEMORY),
        ];
        assert_eq!(accumulate(&table, V1_0), OpAttrs::NO_MEMORY_ACCESS);
        assert_eq!(
            accumulate(&table, V1_5),
            OpAttrs::NO_MEMORY_ACCESS | OpAttrs::READ_ONLY_MEMORY
        );
    }

    #[test]
    fn accumulate_is_monotonic() {
        let table = [
            Versioned::new(V1_0, OpAttrs::NO_DUPLICATE),
            Versioned::new(V1_2, OpAttrs::READ_ONLY_MEMORY),
        ];
        let mut previous = OpAttrs::empty();
        for minor in 0..8 {
            let at = accumulate(&table, Version::new(1, minor));
            assert!(at.contains(previous), "flag lost at 1.{minor}");
            previous = at;
        }
    }

    #[test]
    fn accumulate_empty_before_first_entry() {
        let table = [Versioned::new(V1_2, OpAttrs::NO_RETURN)];
        assert_eq!(accumulate(&table, V1_0), OpAttrs::empty());
    }
}
