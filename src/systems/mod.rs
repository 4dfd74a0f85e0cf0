mod animation;
mod collision;
mod ledge;
mod player;

pub use animation::ClipPlayer;
pub use collision::{collect_static_shapes, CapsuleSweep, StaticShape};
pub use ledge::{collect_ledges, overlapping_ledges, LedgeVolume};
pub use player::{animation_callback_system, player_system};
