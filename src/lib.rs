//! Character locomotion and ability controller for a third-person platformer.
//!
//! A [`motor::Motor`] owns velocity, facing and the authoritative
//! [`components::PlayerState`]; the abilities (jump, dash, ground pound,
//! ledge climb) drive it through a small write API and take exclusive
//! control while in one of the locking states. [`controller::PlayerController`]
//! ties them together in a fixed per-tick order and publishes
//! [`events::MotorEvent`]s to an [`events::EventBus`].
//!
//! The `systems` and `scene` modules run controllers inside a `hecs` world
//! against a capsule body and static geometry.

pub mod abilities;
pub mod animation;
pub mod body;
pub mod camera;
pub mod components;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod fsm;
pub mod locomotion;
pub mod motor;
pub mod scene;
pub mod systems;

pub use body::{CollisionFlags, KinematicBody};
pub use config::TuningConfig;
pub use controller::PlayerController;
pub use error::{ConfigError, ListenerError};
pub use events::{EventBus, MotorEvent, MotorListener};
pub use motor::Motor;
