use glam::Vec3;
use hecs::World;

use crate::abilities::LedgeContact;
use crate::components::{CharacterCollider, LedgeMarker, LocalTransform, Pose};

use super::collision::segment_box_closest;

/// A ledge's overlap volume plus what the climb needs to know about it.
#[derive(Debug, Clone, Copy)]
pub struct LedgeVolume {
    pub contact: LedgeContact,
    pub trigger_half_extents: Vec3,
}

impl LedgeVolume {
    /// Capsule (core segment + radius) against the oriented trigger box.
    pub fn overlaps(&self, collider: &CharacterCollider, center: Vec3) -> bool {
        let pose = self.contact.pose;
        let to_local = pose.rotation.inverse();
        let (bottom, top) = collider.segment(center);
        let a = to_local * (bottom - pose.position);
        let b = to_local * (top - pose.position);
        let (on_segment, on_box) = segment_box_closest(a, b, Vec3::ZERO, self.trigger_half_extents.abs());
        on_segment.distance(on_box) <= collider.radius
    }
}

pub fn collect_ledges(world: &World) -> Vec<LedgeVolume> {
    let mut query = world.query::<(&LocalTransform, &LedgeMarker)>();
    query
        .iter()
        .map(|(entity, (local, marker))| LedgeVolume {
            contact: LedgeContact {
                id: entity.to_bits().get(),
                pose: Pose::from(*local),
                half_width: marker.half_width,
                climb_up_offset: marker.climb_up_offset,
            },
            trigger_half_extents: marker.trigger_half_extents,
        })
        .collect()
}

pub fn overlapping_ledges(
    ledges: &[LedgeVolume],
    collider: &CharacterCollider,
    center: Vec3,
) -> Vec<LedgeContact> {
    ledges
        .iter()
        .filter(|ledge| ledge.overlaps(collider, center))
        .map(|ledge| ledge.contact)
        .collect()
}
