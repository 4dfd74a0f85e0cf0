use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::components::*;
use crate::config::TuningConfig;
use crate::controller::PlayerController;

// ---------------------------------------------------------------------------
// Player proportions
// ---------------------------------------------------------------------------

/// Capsule dimensions for the player body.
struct CharacterRig {
    collider_radius: f32,
    collider_height: f32,
}

fn default_rig() -> CharacterRig {
    CharacterRig {
        collider_radius: 0.5,
        collider_height: 2.0,
    }
}

/// Infinite floor at y = 0.
pub fn spawn_ground(world: &mut World) -> Entity {
    world.spawn((
        LocalTransform::new(Vec3::ZERO),
        Collider::Plane { normal: Vec3::Y, offset: 0.0 },
        Static,
    ))
}

/// Spawn a static box (axis-aligned). `pos` is the world-space center.
pub fn spawn_static_box(world: &mut World, pos: Vec3, half_extents: Vec3) -> Entity {
    world.spawn((
        LocalTransform::new(pos),
        Collider::Box { half_extents },
        Static,
    ))
}

/// Spawn a grabbable ledge. `rotation` orients the edge: local +X runs along
/// it and local +Z points over the top.
pub fn spawn_ledge(world: &mut World, pos: Vec3, rotation: Quat, half_width: f32) -> Entity {
    world.spawn((
        LocalTransform::new(pos).with_rotation(rotation),
        LedgeMarker::new(half_width),
    ))
}

/// Spawn the player: capsule body plus its controller, tuned by `config`.
/// Starts in `Idle`; the first tick reclassifies from physical facts.
pub fn spawn_player(world: &mut World, pos: Vec3, config: &TuningConfig) -> Entity {
    let rig = default_rig();
    world.spawn((
        LocalTransform::new(pos),
        CharacterCollider::new(rig.collider_radius, rig.collider_height),
        PlayerController::new(config),
        Player,
    ))
}
