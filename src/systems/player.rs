use hecs::World;
use tracing::trace;

use crate::animation::{AnimationCallback, AnimationSink};
use crate::body::KinematicBody;
use crate::components::{CharacterCollider, LocalTransform, Player};
use crate::controller::PlayerController;
use crate::engine::input::InputFrame;
use crate::events::EventBus;
use crate::locomotion::CameraBasis;

use super::collision::{collect_static_shapes, CapsuleSweep};
use super::ledge::{collect_ledges, overlapping_ledges};

/// One fixed step for every player: controller tick against the static
/// geometry, ledge overlaps, facing written back to the transform, then the
/// tick's events and cues are published.
pub fn player_system(
    world: &mut World,
    frame: &InputFrame,
    camera: Option<&CameraBasis>,
    dt: f32,
    bus: &mut EventBus,
    mut animation: Option<&mut dyn AnimationSink>,
) {
    let statics = collect_static_shapes(world);
    let ledges = collect_ledges(world);

    for (entity, (_player, controller, transform, collider)) in world
        .query_mut::<(&Player, &mut PlayerController, &mut LocalTransform, &mut CharacterCollider)>()
    {
        {
            let mut body = CapsuleSweep::new(collider, transform, &statics);
            controller.tick(frame, camera, &mut body, dt);

            let touching = overlapping_ledges(&ledges, body.collider(), body.position());
            controller.touch_ledges(&mut body, &touching);
        }
        transform.rotation = controller.motor().facing();
        trace!(?entity, state = %controller.state(), position = ?transform.position, "player step");

        let sink = animation.as_mut().map(|sink| &mut **sink as &mut dyn AnimationSink);
        controller.flush(bus, sink);
    }
}

/// Deliver clip-finished notifications to every player.
pub fn animation_callback_system(world: &mut World, callbacks: &[AnimationCallback]) {
    if callbacks.is_empty() {
        return;
    }
    for (_entity, (_player, controller, transform, collider)) in world
        .query_mut::<(&Player, &mut PlayerController, &mut LocalTransform, &mut CharacterCollider)>()
    {
        {
            let mut body = CapsuleSweep::new(collider, transform, &[]);
            for &callback in callbacks {
                controller.on_animation(callback, &mut body);
            }
        }
        transform.rotation = controller.motor().facing();
    }
}
