//! The kinematic collision body the motor moves once per tick.

use std::ops::{BitOr, BitOrAssign};

use glam::Vec3;

/// Which sides of the body touched geometry during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    /// Floor contact (a walkable surface below).
    pub const BELOW: Self = Self(1 << 0);
    /// Ceiling contact.
    pub const ABOVE: Self = Self(1 << 1);
    /// Wall contact.
    pub const SIDES: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Swept-move collaborator. One `move_by` call per motor tick resolves the
/// displacement against level geometry.
pub trait KinematicBody {
    /// Move by `displacement`, resolving collisions along the way.
    /// A disabled body does not move and reports no contacts.
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags;

    /// Whether the last move ended touching the floor.
    fn is_grounded(&self) -> bool;

    fn position(&self) -> Vec3;

    /// Teleport without collision (used while an ability owns the transform).
    fn set_position(&mut self, position: Vec3);

    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_and_query() {
        let flags = CollisionFlags::BELOW | CollisionFlags::SIDES;
        assert!(flags.contains(CollisionFlags::BELOW));
        assert!(flags.contains(CollisionFlags::SIDES));
        assert!(!flags.contains(CollisionFlags::ABOVE));
        assert!(!flags.contains(CollisionFlags::NONE));
        assert!(CollisionFlags::NONE.is_empty());
    }
}
