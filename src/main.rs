//! Space Siege entry point
//!
//! Without a window backend linked in, the binary runs a headless game
//! driven by the autopilot and records the final score.

use std::path::Path;

use space_siege::audio::SilentAudio;
use space_siege::consts::SIM_DT;
use space_siege::platform::FrameClock;
use space_siege::renderer::{DrawList, render_frame};
use space_siege::settings::SETTINGS_FILE;
use space_siege::sim::{TickInput, autopilot_input};
use space_siege::{FrameOutcome, ScoreLog, Session, Settings};

/// Ten simulated minutes
const MAX_TICKS: u64 = 120 * 600;

fn main() {
    env_logger::init();
    log::info!("Space Siege (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = settings.seed.unwrap_or_else(rand::random);
    let store = ScoreLog::new(settings.score_file.clone());
    let mut session = Session::new(seed, settings, store, SilentAudio::new());
    let mut canvas = DrawList::default();
    let mut wall = FrameClock::new();

    // Headless frames are exactly one timestep long
    while session.state.time_ticks < MAX_TICKS && !session.state.mode.is_over() {
        let input = autopilot_input(&session.state);
        session.frame(&input, SIM_DT);
        session.audio_mut().backend_mut().finish_effects();
        render_frame(&session.state, session.settings(), &mut canvas);
    }

    if !session.state.mode.is_over() {
        log::warn!(
            "Stopped after {} ticks ({:.0}s) without a result",
            session.state.time_ticks,
            session.state.time_ticks as f32 * SIM_DT
        );
    }
    log::info!(
        "Final score {}, high score {}, {} frames drawn in {:?}",
        session.state.score,
        session.state.high_score,
        canvas.frames_presented,
        wall.restart()
    );

    let quit = TickInput {
        quit: true,
        ..Default::default()
    };
    if session.step(&quit) == FrameOutcome::Quit {
        log::info!("Quit");
    }
}
