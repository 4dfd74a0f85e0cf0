//! Ability modules. Each owns its trigger rule and timers and talks to the
//! motor only; abilities never reach into each other.

mod dash;
mod ground_pound;
mod jump;
mod ledge_climb;
mod timed;

pub use dash::DashAbility;
pub use ground_pound::GroundPoundAbility;
pub use jump::{JumpAbility, JumpKind};
pub use ledge_climb::{ledge_target, ClimbPath, LedgeClimbAbility, LedgeContact};
pub use timed::{Progress, Timed};
