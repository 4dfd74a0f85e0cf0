use std::path::PathBuf;

use clap::Parser;
use hecs::World;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hopper::camera::Camera;
use hopper::components::LocalTransform;
use hopper::config::TuningConfig;
use hopper::controller::PlayerController;
use hopper::engine::input::{InputFrame, InputScript};
use hopper::engine::time::FixedStep;
use hopper::events::{EffectsLog, EventBus, EventRecorder, MotorEvent};
use hopper::scene::test_scene::load_test_scene;
use hopper::systems::{animation_callback_system, player_system, ClipPlayer};

#[derive(Parser)]
#[command(name = "hopper", about = "Headless character controller playground")]
struct Args {
    /// Tuning overrides (RON); defaults apply for anything omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input script (RON); the built-in demo runs when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many frames even if the script continues
    #[arg(long)]
    frames: Option<u32>,

    /// Seconds per rendered frame fed to the fixed-step clock
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f32,

    /// Log every state change and clip
    #[arg(short, long)]
    verbose: bool,
}

const PHYSICS_DT: f32 = 1.0 / 60.0;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => match TuningConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "could not load tuning config");
                std::process::exit(1);
            }
        },
        None => TuningConfig::default(),
    };
    let script = match &args.script {
        Some(path) => match InputScript::load(path) {
            Ok(script) => script,
            Err(err) => {
                error!(%err, "could not load input script");
                std::process::exit(1);
            }
        },
        None => InputScript::demo(),
    };

    let mut world = World::new();
    let player = load_test_scene(&mut world, &config);

    let mut bus = EventBus::new();
    bus.subscribe(Box::new(EffectsLog::new()));
    let (recorder, log) = EventRecorder::new();
    bus.subscribe(Box::new(recorder));

    let mut clips = ClipPlayer::new(&config);
    let mut clock = FixedStep::new(PHYSICS_DT);
    let mut camera = Camera::new();
    let mut carried = InputFrame::default();

    let total = args.frames.map_or(script.len(), |cap| cap.min(script.len()));
    info!(frames = total, frame_dt = args.frame_dt, "running");

    for frame in 0..total {
        let Some(scripted) = script.frame_at(frame) else {
            break;
        };
        camera.look(scripted.turn, 0.0);
        let basis = camera.basis();

        let mut input = scripted.input;
        input.merge_pulses(&carried);

        let steps = clock.advance(args.frame_dt);
        for _ in 0..steps {
            player_system(&mut world, &input, Some(&basis), clock.step(), &mut bus, Some(&mut clips));
            let callbacks = clips.advance(clock.step());
            animation_callback_system(&mut world, &callbacks);
            input.clear_pulses();
        }
        carried = if steps == 0 { input } else { InputFrame::default() };
    }

    let events = log.borrow();
    let count = |wanted: MotorEvent| events.iter().filter(|e| **e == wanted).count();
    let transitions = events
        .iter()
        .filter(|e| matches!(e, MotorEvent::StateChanged { .. }))
        .count();
    info!(
        transitions,
        jumps = count(MotorEvent::Jump),
        double_jumps = count(MotorEvent::DoubleJump),
        dashes = count(MotorEvent::Dash),
        pounds = count(MotorEvent::GroundPoundLand),
        footsteps = count(MotorEvent::Footstep),
        clips = clips.triggered(),
        "events"
    );

    let state = world.get::<&PlayerController>(player).map(|pc| pc.state());
    let position = world
        .get::<&LocalTransform>(player)
        .map(|t| t.position)
        .unwrap_or_default();
    if let Ok(state) = state {
        info!(%state, ?position, "final");
    }
}
