//! Execution stages.
//!
//! An HLX program is compiled for exactly one execution stage. Operations
//! carry version-indexed [`StageMask`]s describing where they are legal;
//! [`StageMask::WITHDRAWN`] is the reserved sentinel marking an operation
//! as withdrawn from the instruction set.

use bitflags::bitflags;
use std::fmt::{self, Display, Formatter};

/// The execution stage a module is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Fragment,
    Compute,
    Library,
    RayGeneration,
    Intersection,
    AnyHit,
    ClosestHit,
    Miss,
    Callable,
    Mesh,
    Task,
}

impl Stage {
    /// Parse a stage from its target-descriptor spelling.
    pub fn from_name(name: &str) -> Option<Stage> {
        Some(match name {
            "vertex" => Stage::Vertex,
            "tesscontrol" => Stage::TessControl,
            "tesseval" => Stage::TessEval,
            "geometry" => Stage::Geometry,
            "fragment" => Stage::Fragment,
            "compute" => Stage::Compute,
            "library" => Stage::Library,
            "raygeneration" => Stage::RayGeneration,
            "intersection" => Stage::Intersection,
            "anyhit" => Stage::AnyHit,
            "closesthit" => Stage::ClosestHit,
            "miss" => Stage::Miss,
            "callable" => Stage::Callable,
            "mesh" => Stage::Mesh,
            "task" => Stage::Task,
            _ => return None,
        })
    }

    /// The target-descriptor spelling of this stage.
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::TessControl => "tesscontrol",
            Stage::TessEval => "tesseval",
            Stage::Geometry => "geometry",
            Stage::Fragment => "fragment",
            Stage::Compute => "compute",
            Stage::Library => "library",
            Stage::RayGeneration => "raygeneration",
            Stage::Intersection => "intersection",
            Stage::AnyHit => "anyhit",
            Stage::ClosestHit => "closesthit",
            Stage::Miss => "miss",
            Stage::Callable => "callable",
            Stage::Mesh => "mesh",
            Stage::Task => "task",
        }
    }

    /// This stage's bit in a [`StageMask`].
    pub const fn mask(self) -> StageMask {
        match self {
            Stage::Vertex => StageMask::VERTEX,
            Stage::TessControl => StageMask::TESS_CONTROL,
            Stage::TessEval => StageMask::TESS_EVAL,
            Stage::Geometry => StageMask::GEOMETRY,
            Stage::Fragment => StageMask::FRAGMENT,
            Stage::Compute => StageMask::COMPUTE,
            Stage::Library => StageMask::LIBRARY,
            Stage::RayGeneration => StageMask::RAY_GENERATION,
            Stage::Intersection => StageMask::INTERSECTION,
            Stage::AnyHit => StageMask::ANY_HIT,
            Stage::ClosestHit => StageMask::CLOSEST_HIT,
            Stage::Miss => StageMask::MISS,
            Stage::Callable => StageMask::CALLABLE,
            Stage::Mesh => StageMask::MESH,
            Stage::Task => StageMask::TASK,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// Bitmask of execution stages an operation is legal in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageMask: u32 {
        const VERTEX = 1;
        const TESS_CONTROL = 1 << 1;
        const TESS_EVAL = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
        const COMPUTE = 1 << 5;
        const LIBRARY = 1 << 6;
        const RAY_GENERATION = 1 << 7;
        const INTERSECTION = 1 << 8;
        const ANY_HIT = 1 << 9;
        const CLOSEST_HIT = 1 << 10;
        const MISS = 1 << 11;
        const CALLABLE = 1 << 12;
        const MESH = 1 << 13;
        const TASK = 1 << 14;
        /// Every real stage.
        const ALL = (1 << 15) - 1;
        /// Reserved sentinel: the operation has been withdrawn from the
        /// instruction set as of this table entry. Compared by full
        /// equality, never by intersection.
        const WITHDRAWN = 1 << 31;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_names() {
        for stage in [
            Stage::Vertex,
            Stage::TessControl,
            Stage::TessEval,
            Stage::Geometry,
            Stage::Fragment,
            Stage::Compute,
            Stage::Library,
            Stage::RayGeneration,
            Stage::Intersection,
            Stage::AnyHit,
            Stage::ClosestHit,
            Stage::Miss,
            Stage::Callable,
            Stage::Mesh,
            Stage::Task,
        ] {
            assert_eq!(Stage::from_name(stage.name()), Some(stage));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Stage::from_name("kernel"), None);
        assert_eq!(Stage::from_name(""), None);
        assert_eq!(Stage::from_name("Compute"), None);
    }

    #[test]
    fn all_covers_every_stage_bit() {
        for stage in [Stage::Vertex, Stage::Compute, Stage::Task, Stage::Miss] {
            assert!(StageMask::ALL.contains(stage.mask()));
        }
    }

    #[test]
    fn withdrawn_is_disjoint_from_all() {
        assert!(!StageMask::ALL.intersects(StageMask::WITHDRAWN));
        assert_ne!(StageMask::WITHDRAWN, StageMask::ALL);
    }
}
