//! A running game: simulation plus its audio and score log
//!
//! The simulation only queues events; this is where they turn into sound,
//! persisted scores and the quit signal.

use crate::audio::{AudioBackend, AudioDirector};
use crate::consts::SIM_DT;
use crate::highscores::ScoreStore;
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, SessionSummary, TickInput, tick};

/// What the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

pub struct Session<B: AudioBackend, S: ScoreStore> {
    pub state: GameState,
    store: S,
    audio: AudioDirector<B>,
    settings: Settings,
    clock: FrameClock,
    /// Summaries of every finished session, oldest first
    finished: Vec<SessionSummary>,
}

impl<B: AudioBackend, S: ScoreStore> Session<B, S> {
    pub fn new(seed: u64, settings: Settings, store: S, backend: B) -> Self {
        let mut state = GameState::new(seed);
        state.high_score = store.high_score();
        log::info!("Game initialized with seed: {}, high score {}", seed, state.high_score);
        let audio = AudioDirector::new(backend, &settings);
        Self {
            state,
            store,
            audio,
            settings,
            clock: FrameClock::new(),
            finished: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &AudioDirector<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioDirector<B> {
        &mut self.audio
    }

    pub fn finished(&self) -> &[SessionSummary] {
        &self.finished
    }

    /// Advance by a frame's worth of real time in fixed steps
    pub fn frame(&mut self, input: &TickInput, frame_dt: f32) -> FrameOutcome {
        let steps = self.clock.accumulate(frame_dt);
        for _ in 0..steps {
            if self.step(input) == FrameOutcome::Quit {
                return FrameOutcome::Quit;
            }
        }
        FrameOutcome::Continue
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self, input: &TickInput) -> FrameOutcome {
        tick(&mut self.state, input, SIM_DT);

        let mut outcome = FrameOutcome::Continue;
        for event in self.state.drain_events() {
            self.audio.handle(&event);
            match event {
                GameEvent::SessionOver(summary) => self.record(summary),
                GameEvent::Restarted => {
                    self.state.high_score = self.store.high_score();
                }
                GameEvent::QuitRequested => outcome = FrameOutcome::Quit,
                _ => {}
            }
        }
        outcome
    }

    fn record(&mut self, summary: SessionSummary) {
        self.store.append(summary.score);
        self.state.high_score = self
            .state
            .high_score
            .max(self.store.high_score())
            .max(summary.score);
        match serde_json::to_string(&summary) {
            Ok(json) => log::info!("Session summary: {json}"),
            Err(e) => log::warn!("Failed to serialize session summary: {e}"),
        }
        self.finished.push(summary);
    }
}
