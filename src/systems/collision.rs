use glam::Vec3;
use hecs::World;

use crate::body::{CollisionFlags, KinematicBody};
use crate::components::{CharacterCollider, Collider, LocalTransform, Static};

/// Contact normals steeper than this count as floor (or ceiling, negated).
const WALKABLE_NORMAL_Y: f32 = 0.7;
/// Depenetration passes per substep.
const RESOLVE_ITERATIONS: usize = 4;
const MAX_SUBSTEPS: usize = 16;

/// World-space snapshot of one piece of static level geometry.
#[derive(Debug, Clone, Copy)]
pub enum StaticShape {
    Plane { normal: Vec3, offset: f32 },
    Box { center: Vec3, half_extents: Vec3 },
}

/// Gather every static collider so the character query can borrow the world
/// mutably afterwards.
pub fn collect_static_shapes(world: &World) -> Vec<StaticShape> {
    let mut query = world.query::<(&LocalTransform, &Collider, &Static)>();
    query
        .iter()
        .map(|(_entity, (local, collider, _))| match *collider {
            Collider::Plane { normal, offset } => StaticShape::Plane {
                normal: normal.normalize_or_zero(),
                offset,
            },
            Collider::Box { half_extents } => StaticShape::Box {
                center: local.position,
                half_extents,
            },
        })
        .collect()
}

pub(crate) fn closest_point_on_segment(a: Vec3, b: Vec3, p: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest pair (segment point, box point) between segment `a..b` and an
/// axis-aligned box. Two rounds of alternating clamps are exact for the
/// upright segments used here and close enough otherwise.
pub(crate) fn segment_box_closest(a: Vec3, b: Vec3, center: Vec3, half_extents: Vec3) -> (Vec3, Vec3) {
    let clamp = |p: Vec3| p.clamp(center - half_extents, center + half_extents);
    let mut on_segment = closest_point_on_segment(a, b, center);
    let mut on_box = clamp(on_segment);
    for _ in 0..2 {
        on_segment = closest_point_on_segment(a, b, on_box);
        on_box = clamp(on_segment);
    }
    (on_segment, on_box)
}

/// Push-out direction and depth for a capsule overlapping `shape`, or `None`.
/// The normal points from the shape toward the capsule.
fn capsule_contact(bottom: Vec3, top: Vec3, radius: f32, shape: &StaticShape) -> Option<(Vec3, f32)> {
    match *shape {
        StaticShape::Plane { normal, offset } => {
            let dist_top = top.dot(normal) - offset;
            let dist_bottom = bottom.dot(normal) - offset;
            let penetration = radius - dist_top.min(dist_bottom);
            (penetration > 0.0).then_some((normal, penetration))
        }
        StaticShape::Box { center, half_extents } => {
            let (on_segment, on_box) = segment_box_closest(bottom, top, center, half_extents);
            let diff = on_segment - on_box;
            let dist = diff.length();
            if dist > 1e-6 {
                let penetration = radius - dist;
                return (penetration > 0.0).then_some((diff / dist, penetration));
            }
            // Core segment is inside the box: leave through the nearest face.
            let local = on_segment - center;
            let mut best = (Vec3::Y, f32::MAX);
            for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                let along = local.dot(axis);
                let depth = half_extents.dot(axis) - along.abs() + radius;
                if depth < best.1 {
                    let sign = if along < 0.0 { -1.0 } else { 1.0 };
                    best = (axis * sign, depth);
                }
            }
            Some(best)
        }
    }
}

fn classify(normal: Vec3) -> CollisionFlags {
    if normal.y > WALKABLE_NORMAL_Y {
        CollisionFlags::BELOW
    } else if normal.y < -WALKABLE_NORMAL_Y {
        CollisionFlags::ABOVE
    } else {
        CollisionFlags::SIDES
    }
}

/// Kinematic capsule body over a snapshot of static geometry. Moves are split
/// into substeps no longer than half the radius, each followed by
/// depenetration, so fast moves (dash, ground pound) don't tunnel.
pub struct CapsuleSweep<'a> {
    collider: &'a mut CharacterCollider,
    transform: &'a mut LocalTransform,
    statics: &'a [StaticShape],
}

impl<'a> CapsuleSweep<'a> {
    pub fn new(
        collider: &'a mut CharacterCollider,
        transform: &'a mut LocalTransform,
        statics: &'a [StaticShape],
    ) -> Self {
        Self {
            collider,
            transform,
            statics,
        }
    }

    pub fn collider(&self) -> &CharacterCollider {
        self.collider
    }

    fn resolve(&mut self) -> CollisionFlags {
        let mut flags = CollisionFlags::NONE;
        for _ in 0..RESOLVE_ITERATIONS {
            let mut pushed = false;
            for shape in self.statics {
                let (bottom, top) = self.collider.segment(self.transform.position);
                if let Some((normal, depth)) = capsule_contact(bottom, top, self.collider.radius, shape) {
                    self.transform.position += normal * depth;
                    flags |= classify(normal);
                    pushed = true;
                }
            }
            if !pushed {
                break;
            }
        }
        flags
    }
}

impl KinematicBody for CapsuleSweep<'_> {
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags {
        if !self.collider.enabled {
            return CollisionFlags::NONE;
        }
        let distance = displacement.length();
        let max_step = (self.collider.radius * 0.5).max(1e-3);
        let substeps = ((distance / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let step = displacement / substeps as f32;

        let mut flags = CollisionFlags::NONE;
        for _ in 0..substeps {
            self.transform.position += step;
            flags |= self.resolve();
        }
        self.collider.grounded = flags.contains(CollisionFlags::BELOW);
        flags
    }

    fn is_grounded(&self) -> bool {
        self.collider.grounded
    }

    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.collider.enabled = enabled;
        if !enabled {
            self.collider.grounded = false;
        }
    }

    fn is_enabled(&self) -> bool {
        self.collider.enabled
    }
}
