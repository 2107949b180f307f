//! Session driver
//!
//! `Game` owns everything a frontend needs for one player: the simulation
//! state, the tick clock, queued input, the score files and audio. Frontends
//! feed it commands and frame time; it runs the countdown, the ticks and the
//! end-of-session pause, and records scores once a session ends.

use thiserror::Error;

use crate::audio::{self, AudioSink, PlaybackState, SoundEffect};
use crate::consts::{COUNTDOWN_MS, CRASH_PAUSE_MS, EXPLOSION_PAUSE_MS};
use crate::highscores::{DEFAULT_PLAYER_NAME, HighScoreStore, Leaderboard, LeaderboardStore};
use crate::platform::{Command, Delay, DelayStatus, FixedStep, InputQueue};
use crate::settings::{ConfigError, Settings};
use crate::sim::autopilot;
use crate::sim::{
    FrameView, GameMode, GamePhase, GameState, SpawnCapacityError, TerminationCause, TickInput,
    TickOutcome, tick,
};

/// Failure that stops a session
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Spawn(#[from] SpawnCapacityError),
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Waiting before the first tick
    Countdown(Delay),
    Running,
    /// Terminal outcome reached, showing the crash or explosion
    Ending(Delay),
    /// Scores recorded, waiting for restart or quit
    Finished,
    Quit,
}

/// Result of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub score: u64,
    pub elapsed_secs: u64,
    pub cause: Option<TerminationCause>,
    pub new_high_score: bool,
    /// Leaderboard rank (1-indexed); survival only
    pub leaderboard_rank: Option<usize>,
}

pub struct Game<S: AudioSink> {
    settings: Settings,
    state: GameState,
    clock: FixedStep,
    input: InputQueue,
    high_score: HighScoreStore,
    leaderboard: LeaderboardStore,
    music: PlaybackState,
    sink: S,
    player_name: String,
    autopilot: bool,
    stage: Stage,
    summary: Option<SessionSummary>,
}

impl<S: AudioSink> Game<S> {
    /// Validate settings, open the score files and start the first session
    pub fn new(settings: Settings, seed: u64, sink: S) -> Result<Self, GameError> {
        settings.validate()?;
        let state = GameState::new(settings.rules.clone(), seed)?;
        let music = settings
            .audio
            .music_dir
            .as_deref()
            .map(PlaybackState::from_dir)
            .unwrap_or_default();
        let mut game = Self {
            clock: FixedStep::new(state.tick_rate),
            state,
            input: InputQueue::new(),
            high_score: HighScoreStore::open(settings.high_score_path()),
            leaderboard: LeaderboardStore::open(settings.leaderboard_path()),
            music,
            sink,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            autopilot: false,
            stage: Stage::Running,
            summary: None,
            settings,
        };
        game.begin();
        Ok(game)
    }

    /// Name recorded on the leaderboard
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.to_string();
    }

    /// Let the computer steer
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn push_command(&mut self, command: Command) {
        self.input.push(command);
    }

    /// Queue the command bound to `key`. Returns false for unbound keys.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Command::from_key(key) {
            Some(command) => {
                self.push_command(command);
                true
            }
            None => false,
        }
    }

    /// Advance by one frame of real time
    pub fn update(&mut self, frame_dt: f32) -> Result<(), GameError> {
        let quit = self.input.quit_requested();

        match &mut self.stage {
            Stage::Countdown(delay) => match delay.poll(frame_dt, quit) {
                DelayStatus::Waiting => {
                    // Input before the first tick is dropped
                    self.input.drain();
                }
                DelayStatus::Done => {
                    self.input.drain();
                    self.clock.reset();
                    self.stage = Stage::Running;
                }
                DelayStatus::Cancelled => self.quit(),
            },
            Stage::Running => {
                if quit {
                    log::info!("Quit during session (score {})", self.state.score);
                    self.quit();
                } else {
                    self.run_ticks(frame_dt)?;
                }
            }
            Stage::Ending(delay) => match delay.poll(frame_dt, quit) {
                DelayStatus::Waiting => {}
                DelayStatus::Done => self.finish(),
                DelayStatus::Cancelled => {
                    self.finish();
                    self.quit();
                }
            },
            Stage::Finished => {
                if quit {
                    self.quit();
                } else if self.input.drain().restart {
                    self.restart()?;
                }
            }
            Stage::Quit => {}
        }
        Ok(())
    }

    fn run_ticks(&mut self, frame_dt: f32) -> Result<(), GameError> {
        for _ in 0..self.clock.advance(frame_dt) {
            if self.autopilot && self.state.phase == GamePhase::Playing {
                if let Some(direction) = autopilot::choose_direction(&self.state) {
                    self.input.push(Command::Turn(direction));
                }
            }
            let input = self.input.drain();
            let outcome = tick(&mut self.state, &input, self.clock.step())?;
            audio::play_events(&mut self.sink, &self.state.events, &self.settings);

            if input.restart {
                self.begin();
                return Ok(());
            }
            match outcome {
                TickOutcome::Terminated(cause) => {
                    self.on_terminated(cause);
                    return Ok(());
                }
                TickOutcome::Ate { .. } => self.clock.set_rate(self.state.tick_rate),
                TickOutcome::Moved | TickOutcome::Idle => {}
            }
        }
        Ok(())
    }

    fn on_terminated(&mut self, cause: TerminationCause) {
        if !self.settings.session_pauses {
            self.finish();
            return;
        }
        let ms = match cause {
            TerminationCause::Hazard => EXPLOSION_PAUSE_MS,
            TerminationCause::SelfCollision => CRASH_PAUSE_MS,
        };
        self.stage = Stage::Ending(Delay::from_millis(ms));
    }

    /// Record the finished session. Persistence failures are logged, not fatal.
    fn finish(&mut self) {
        let score = self.state.score;
        let elapsed_secs = self.state.elapsed_secs();
        let mode = self.state.rules.mode;

        let new_high_score = match self.high_score.submit(score) {
            Ok(new_best) => new_best,
            Err(e) => {
                log::warn!("Failed to save high score: {e}");
                false
            }
        };
        if new_high_score {
            self.sink
                .play_effect(SoundEffect::HighScore, self.settings.effective_sfx_volume());
        }

        let leaderboard_rank = if mode.records_leaderboard() {
            match self.leaderboard.record(&self.player_name, score, elapsed_secs) {
                Ok(rank) => rank,
                Err(e) => {
                    log::warn!("Failed to save leaderboard: {e}");
                    None
                }
            }
        } else {
            None
        };

        let summary = SessionSummary {
            mode,
            score,
            elapsed_secs,
            cause: self.state.outcome,
            new_high_score,
            leaderboard_rank,
        };
        log::info!(
            "Session finished: {} score {} in {}s (high score {})",
            mode.as_str(),
            score,
            elapsed_secs,
            self.high_score.best()
        );
        self.summary = Some(summary);
        self.stage = Stage::Finished;
    }

    /// Start over with a seed drawn from the finished session
    pub fn restart(&mut self) -> Result<(), GameError> {
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut self.state, &input, self.clock.step())?;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.clock = FixedStep::new(self.state.tick_rate);
        self.summary = None;
        self.stage = if self.settings.session_pauses {
            Stage::Countdown(Delay::from_millis(COUNTDOWN_MS))
        } else {
            Stage::Running
        };
        if !self.music.is_playing() {
            self.music.start(&mut self.sink, &self.settings);
        }
    }

    fn quit(&mut self) {
        self.music.stop(&mut self.sink);
        self.stage = Stage::Quit;
    }

    /// Backend notification that the current music track ended
    pub fn on_track_ended(&mut self) {
        self.music.on_track_ended(&mut self.sink, &self.settings);
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn is_quit(&self) -> bool {
        self.stage == Stage::Quit
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Summary of the last finished session, cleared on restart
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn view(&self) -> FrameView {
        self.state.view()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        self.leaderboard.board()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
