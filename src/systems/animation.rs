use tracing::{debug, trace};

use crate::animation::{AnimationCallback, AnimationCue, AnimationSink, AnimatorParams};
use crate::config::TuningConfig;

// ---------------------------------------------------------------------------
// Clip table
// ---------------------------------------------------------------------------

const JUMP_CLIP: f32 = 0.3;
const DASH_CLIP: f32 = 0.2;
/// Impact-and-recover part of the pound, played from touchdown.
const GROUND_POUND_CLIP: f32 = 0.5;

/// Planar distance covered between two foot contacts of the walk/run cycle.
const STRIDE_LENGTH: f32 = 1.5;
/// Below this planar speed the locomotion cycle is at rest.
const MIN_STRIDE_SPEED: f32 = 0.1;

/// Clip-finished notification each clip reports, if any.
fn end_callback(cue: AnimationCue) -> Option<AnimationCallback> {
    match cue {
        AnimationCue::GroundPound => Some(AnimationCallback::EndGroundPound),
        AnimationCue::LedgeClimb  => Some(AnimationCallback::EndLedgeClimb),
        _ => None,
    }
}

/// The pound clip holds its airborne loop until touchdown.
fn waits_for_ground(cue: AnimationCue) -> bool {
    cue == AnimationCue::GroundPound
}

// ---------------------------------------------------------------------------
// ClipPlayer
// ---------------------------------------------------------------------------

struct PlayingClip {
    cue: AnimationCue,
    remaining: f32,
    waiting_for_ground: bool,
}

/// Headless animator: plays triggered clips for a fixed length, reports the
/// end-of-clip callbacks the character waits on, and emits footsteps from
/// the locomotion cycle while grounded.
pub struct ClipPlayer {
    playing: Vec<PlayingClip>,
    params: AnimatorParams,
    triggered: usize,
    ledge_clip: f32,
    /// Planar distance since the last foot contact.
    stride: f32,
}

impl ClipPlayer {
    /// The ledge clip runs exactly as long as the configured climb.
    pub fn new(config: &TuningConfig) -> Self {
        Self {
            playing: Vec::new(),
            params: AnimatorParams::default(),
            triggered: 0,
            ledge_clip: config.ledge_climb.ledge_climb_duration,
            stride: 0.0,
        }
    }

    pub fn params(&self) -> AnimatorParams {
        self.params
    }

    /// Total cues received.
    pub fn triggered(&self) -> usize {
        self.triggered
    }

    pub fn is_playing(&self, cue: AnimationCue) -> bool {
        self.playing.iter().any(|clip| clip.cue == cue)
    }

    pub fn clip_length(&self, cue: AnimationCue) -> f32 {
        match cue {
            AnimationCue::Jump | AnimationCue::DoubleJump => JUMP_CLIP,
            AnimationCue::Dash        => DASH_CLIP,
            AnimationCue::GroundPound => GROUND_POUND_CLIP,
            AnimationCue::LedgeClimb  => self.ledge_clip,
        }
    }

    /// Advance every clip and the locomotion cycle; return callbacks for
    /// clips that just finished, then any footsteps.
    pub fn advance(&mut self, dt: f32) -> Vec<AnimationCallback> {
        let dt = dt.max(0.0);
        let grounded = self.params.grounded;
        let mut finished = Vec::new();
        self.playing.retain_mut(|clip| {
            if clip.waiting_for_ground {
                if !grounded {
                    return true;
                }
                clip.waiting_for_ground = false;
            }
            clip.remaining -= dt;
            if clip.remaining > 1e-5 {
                return true;
            }
            debug!(clip = clip.cue.name(), "clip finished");
            finished.extend(end_callback(clip.cue));
            false
        });

        if grounded && self.params.speed > MIN_STRIDE_SPEED {
            self.stride += self.params.speed * dt;
            while self.stride >= STRIDE_LENGTH {
                self.stride -= STRIDE_LENGTH;
                trace!("footstep");
                finished.push(AnimationCallback::Footstep);
            }
        } else {
            self.stride = 0.0;
        }
        finished
    }
}

impl AnimationSink for ClipPlayer {
    /// Retriggering a clip that is already playing restarts it.
    fn trigger(&mut self, cue: AnimationCue) {
        self.triggered += 1;
        self.playing.retain(|clip| clip.cue != cue);
        self.playing.push(PlayingClip {
            cue,
            remaining: self.clip_length(cue),
            waiting_for_ground: waits_for_ground(cue),
        });
        debug!(clip = cue.name(), "clip started");
    }

    fn set_parameters(&mut self, params: AnimatorParams) {
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgeClimbConfig;

    fn clips() -> ClipPlayer {
        ClipPlayer::new(&TuningConfig::default())
    }

    fn footsteps(callbacks: &[AnimationCallback]) -> usize {
        callbacks
            .iter()
            .filter(|c| **c == AnimationCallback::Footstep)
            .count()
    }

    fn landed() -> AnimatorParams {
        AnimatorParams {
            grounded: true,
            ..AnimatorParams::default()
        }
    }

    #[test]
    fn ground_pound_clip_reports_end() {
        let mut clips = clips();
        clips.set_parameters(landed());
        clips.trigger(AnimationCue::GroundPound);
        assert!(clips.advance(0.25).is_empty());
        assert_eq!(clips.advance(0.25), vec![AnimationCallback::EndGroundPound]);
        assert!(!clips.is_playing(AnimationCue::GroundPound));
    }

    #[test]
    fn ground_pound_clip_holds_until_touchdown() {
        let mut clips = clips();
        clips.trigger(AnimationCue::GroundPound);
        for _ in 0..10 {
            assert!(clips.advance(0.25).is_empty());
        }
        assert!(clips.is_playing(AnimationCue::GroundPound));

        clips.set_parameters(landed());
        assert!(clips.advance(0.25).is_empty());
        assert_eq!(clips.advance(0.25), vec![AnimationCallback::EndGroundPound]);
    }

    #[test]
    fn other_clips_play_in_the_air() {
        let mut clips = clips();
        clips.trigger(AnimationCue::Dash);
        assert!(clips.advance(0.2).is_empty());
        assert!(!clips.is_playing(AnimationCue::Dash));
    }

    #[test]
    fn jump_clip_ends_silently() {
        let mut clips = clips();
        clips.trigger(AnimationCue::Jump);
        assert!(clips.advance(1.0).is_empty());
        assert!(!clips.is_playing(AnimationCue::Jump));
    }

    #[test]
    fn retrigger_restarts_clip() {
        let mut clips = clips();
        clips.trigger(AnimationCue::LedgeClimb);
        clips.advance(0.75);
        clips.trigger(AnimationCue::LedgeClimb);
        assert!(clips.advance(0.5).is_empty());
        assert_eq!(clips.advance(0.5), vec![AnimationCallback::EndLedgeClimb]);
        assert_eq!(clips.triggered(), 2);
    }

    #[test]
    fn ledge_clip_follows_climb_duration() {
        let config = TuningConfig {
            ledge_climb: LedgeClimbConfig {
                ledge_climb_duration: 2.0,
            },
            ..TuningConfig::default()
        };
        let mut clips = ClipPlayer::new(&config);
        assert_eq!(clips.clip_length(AnimationCue::LedgeClimb), 2.0);

        clips.trigger(AnimationCue::LedgeClimb);
        assert!(clips.advance(1.5).is_empty());
        assert_eq!(clips.advance(0.5), vec![AnimationCallback::EndLedgeClimb]);
    }

    #[test]
    fn walking_produces_footsteps_per_stride() {
        let mut clips = clips();
        clips.set_parameters(AnimatorParams {
            speed: 6.0,
            grounded: true,
            ..AnimatorParams::default()
        });
        // 6 m/s for one second covers four strides.
        let mut total = 0;
        for _ in 0..4 {
            total += footsteps(&clips.advance(0.25));
        }
        assert_eq!(total, 4);
    }

    #[test]
    fn no_footsteps_in_the_air_or_standing() {
        let mut clips = clips();
        clips.set_parameters(AnimatorParams {
            speed: 5.0,
            grounded: false,
            ..AnimatorParams::default()
        });
        assert_eq!(footsteps(&clips.advance(2.0)), 0);

        clips.set_parameters(landed());
        assert_eq!(footsteps(&clips.advance(2.0)), 0);
    }

    #[test]
    fn parameters_are_kept() {
        let mut clips = clips();
        let params = AnimatorParams {
            speed: 3.0,
            grounded: true,
            ..AnimatorParams::default()
        };
        clips.set_parameters(params);
        assert_eq!(clips.params(), params);
    }
}
