use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::config::{parse_ron, read_ron};
use crate::error::ConfigError;

/// One tick of player input. `move_axis` and `sprint` are held values;
/// `jump`, `dash` and `ground_pound` are edge pulses, true only on the tick
/// the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    pub move_axis: Vec2,
    pub sprint: bool,
    pub jump: bool,
    pub dash: bool,
    pub ground_pound: bool,
}

impl InputFrame {
    /// Drop the edge pulses so they are consumed exactly once, even when a
    /// frame drives several fixed steps.
    pub fn clear_pulses(&mut self) {
        self.jump = false;
        self.dash = false;
        self.ground_pound = false;
    }

    /// Carry pulses from a frame that ran no simulation step.
    pub fn merge_pulses(&mut self, earlier: &InputFrame) {
        self.jump |= earlier.jump;
        self.dash |= earlier.dash;
        self.ground_pound |= earlier.ground_pound;
    }
}

/// A run of identical frames in an input script. Pulses fire on the first
/// frame of the step only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub frames: u32,
    pub move_axis: Vec2,
    pub sprint: bool,
    pub jump: bool,
    pub dash: bool,
    pub ground_pound: bool,
    /// Camera yaw change per frame, degrees.
    pub turn: f32,
}

/// What the script asks for on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedFrame {
    pub input: InputFrame,
    pub turn: f32,
}

/// Deterministic stand-in for a device: a list of steps, loadable from RON.
///
/// ```ron
/// (steps: [
///     (frames: 30, move_axis: (0.0, 1.0)),
///     (frames: 1, jump: true),
/// ])
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_ron(path)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        parse_ron(text, "<script>")
    }

    /// Total frames across all steps.
    pub fn len(&self) -> u32 {
        self.steps.iter().map(|s| s.frames).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn frame_at(&self, frame: u32) -> Option<ScriptedFrame> {
        let mut start = 0;
        for step in &self.steps {
            if frame < start + step.frames {
                let first = frame == start;
                return Some(ScriptedFrame {
                    input: InputFrame {
                        move_axis: step.move_axis,
                        sprint: step.sprint,
                        jump: first && step.jump,
                        dash: first && step.dash,
                        ground_pound: first && step.ground_pound,
                    },
                    turn: step.turn,
                });
            }
            start += step.frames;
        }
        None
    }

    /// Built-in tour of the test scene: walk into the wall and jump to grab
    /// the ledge, cross the wall top and drop off the far side, then sprint,
    /// jump and double jump, dash, and ground pound on open ground.
    pub fn demo() -> Self {
        let step = |frames, move_axis| ScriptStep {
            frames,
            move_axis,
            ..ScriptStep::default()
        };
        Self {
            steps: vec![
                step(20, Vec2::ZERO),
                // Spawn is 4.5 m short of the wall face; press into it.
                step(80, Vec2::new(0.0, 1.0)),
                ScriptStep {
                    jump: true,
                    ..step(90, Vec2::ZERO)
                },
                step(60, Vec2::new(0.0, 1.0)),
                ScriptStep {
                    sprint: true,
                    ..step(30, Vec2::new(1.0, 0.0))
                },
                ScriptStep {
                    jump: true,
                    ..step(20, Vec2::new(-1.0, 0.0))
                },
                ScriptStep {
                    jump: true,
                    ..step(40, Vec2::new(-1.0, 0.0))
                },
                ScriptStep {
                    dash: true,
                    ..step(60, Vec2::new(0.0, 1.0))
                },
                ScriptStep {
                    jump: true,
                    ..step(20, Vec2::ZERO)
                },
                ScriptStep {
                    ground_pound: true,
                    ..step(60, Vec2::ZERO)
                },
                ScriptStep {
                    turn: 1.5,
                    ..step(60, Vec2::ZERO)
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulses_fire_on_first_frame_only() {
        let script = InputScript::from_ron_str(
            "(steps: [(frames: 2), (frames: 3, jump: true, move_axis: (0.0, 1.0))])",
        )
        .unwrap();
        assert_eq!(script.len(), 5);
        assert!(!script.frame_at(1).unwrap().input.jump);
        let first = script.frame_at(2).unwrap().input;
        assert!(first.jump);
        assert_eq!(first.move_axis, Vec2::Y);
        let held = script.frame_at(3).unwrap().input;
        assert!(!held.jump);
        assert_eq!(held.move_axis, Vec2::Y);
        assert!(script.frame_at(5).is_none());
    }

    #[test]
    fn clear_pulses_keeps_held_values() {
        let mut frame = InputFrame {
            move_axis: Vec2::X,
            sprint: true,
            jump: true,
            dash: true,
            ground_pound: true,
        };
        frame.clear_pulses();
        assert_eq!(
            frame,
            InputFrame {
                move_axis: Vec2::X,
                sprint: true,
                ..InputFrame::default()
            }
        );
    }

    #[test]
    fn demo_script_is_not_empty() {
        let demo = InputScript::demo();
        assert!(!demo.is_empty());
        assert!(demo.frame_at(0).is_some());
    }

    #[test]
    fn bad_script_is_a_parse_error() {
        let err = InputScript::from_ron_str("(steps: [(frames: -1)])").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
