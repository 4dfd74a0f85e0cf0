use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::config::TuningConfig;
use crate::scene::prefabs::{spawn_ground, spawn_ledge, spawn_player, spawn_static_box};

/// Wall the player can climb, with a ledge along its near top edge.
const WALL_CENTER: Vec3 = Vec3::new(0.0, 1.25, 6.0);
const WALL_HALF_EXTENTS: Vec3 = Vec3::new(3.0, 1.25, 1.0);

/// Build and populate the test scene. Returns the player entity.
pub fn load_test_scene(world: &mut World, config: &TuningConfig) -> Entity {
    spawn_ground(world);

    // Low blocks scattered around spawn
    for &(x, z, h) in &[(6.0_f32, -4.0_f32, 1.0_f32), (-6.0, 3.0, 3.5)] {
        spawn_static_box(world, Vec3::new(x, h / 2.0, z), Vec3::new(1.5, h / 2.0, 1.5));
    }

    spawn_static_box(world, WALL_CENTER, WALL_HALF_EXTENTS);
    let lip = WALL_CENTER + Vec3::new(0.0, WALL_HALF_EXTENTS.y, -WALL_HALF_EXTENTS.z);
    spawn_ledge(world, lip, Quat::IDENTITY, WALL_HALF_EXTENTS.x);

    spawn_player(world, Vec3::new(0.0, 1.0, 0.0), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LedgeMarker, LocalTransform, PlayerState};
    use crate::controller::PlayerController;
    use crate::engine::input::InputFrame;
    use crate::events::EventBus;
    use crate::systems::player_system;

    #[test]
    fn ledge_sits_on_the_wall_lip() {
        let mut world = World::new();
        load_test_scene(&mut world, &TuningConfig::default());
        let mut query = world.query::<(&LocalTransform, &LedgeMarker)>();
        let (_, (local, marker)) = query.iter().next().unwrap();
        assert_eq!(local.position, Vec3::new(0.0, 2.5, 5.0));
        assert_eq!(marker.half_width, 3.0);
    }

    #[test]
    fn player_settles_idle() {
        let mut world = World::new();
        let player = load_test_scene(&mut world, &TuningConfig::default());
        let mut bus = EventBus::new();
        for _ in 0..60 {
            player_system(&mut world, &InputFrame::default(), None, 1.0 / 60.0, &mut bus, None);
        }
        let controller = world.get::<&PlayerController>(player).unwrap();
        assert_eq!(controller.state(), PlayerState::Idle);
        assert!(controller.motor().is_grounded());
    }
}
