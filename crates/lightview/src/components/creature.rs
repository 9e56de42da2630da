use glam::IVec2;
use crate::api::types::Direction;

/// Walking state of a light-carrying creature.
///
/// Only consumed by the extended placement mode, which shifts the light
/// center by `walk_offset` while the creature moves between tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureMotion {
    /// Sub-tile pixel offset of the current step.
    pub walk_offset: IVec2,
    /// Direction of the current step.
    pub direction: Direction,
}

impl CreatureMotion {
    pub fn new(walk_offset: IVec2, direction: Direction) -> Self {
        Self {
            walk_offset,
            direction,
        }
    }

    /// A creature standing still facing `direction`.
    pub fn standing(direction: Direction) -> Self {
        Self::new(IVec2::ZERO, direction)
    }

    pub fn is_walking(&self) -> bool {
        self.walk_offset != IVec2::ZERO
    }
}
