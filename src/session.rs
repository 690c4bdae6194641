//! Game session controller
//!
//! Owns the simulation state, the RNG, the held movement intents and the
//! two clocks. The host feeds it input events and elapsed time; it runs the
//! due ticks in order and hands every post-tick frame to a `Renderer`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::scheduler::{Scheduler, TimerTick};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, spawn, tick};

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Player input as reported by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Direction),
    Release(Direction),
    /// Only honored once the game is over
    Restart,
}

/// Draws a frame from a read-only view of the state
pub trait Renderer {
    type Error;

    fn render(&mut self, state: &GameState) -> Result<(), Self::Error>;
}

/// A running game session
pub struct Session<R> {
    state: GameState,
    rng: R,
    input: TickInput,
    scheduler: Scheduler,
    /// Events surfaced since the start of the current `update`
    events: Vec<GameEvent>,
}

impl Session<Pcg32> {
    /// Session with a PCG generator seeded from settings, or the clock
    pub fn seeded(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Starting session with seed {}", seed);
        Self::new(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session and start both clocks
    pub fn new(settings: &Settings, rng: R) -> Self {
        let mut scheduler = Scheduler::from_settings(settings);
        scheduler.start();
        Self {
            state: GameState::new(settings.play_area),
            rng,
            input: TickInput::default(),
            scheduler,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Apply one input event. Returns true if the session restarted.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Press(direction) => {
                if !self.state.game_over {
                    self.set_intent(direction, true);
                }
                false
            }
            InputEvent::Release(direction) => {
                self.set_intent(direction, false);
                false
            }
            InputEvent::Restart => {
                if !self.state.restart() {
                    return false;
                }
                self.input = TickInput::default();
                self.collect_events();
                true
            }
        }
    }

    fn set_intent(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.input.left = held,
            Direction::Right => self.input.right = held,
        }
    }

    /// Run a single timer callback. The sim tick always requests a frame,
    /// game over or not. Ignored once the session is torn down.
    pub fn on_timer<V: Renderer>(
        &mut self,
        timer: TimerTick,
        renderer: &mut V,
    ) -> Result<(), V::Error> {
        if !self.scheduler.is_running() {
            return Ok(());
        }
        match timer {
            TimerTick::Spawn => {
                spawn(&mut self.state, &mut self.rng);
                self.collect_events();
            }
            TimerTick::Sim => {
                tick(&mut self.state, &self.input);
                self.collect_events();
                renderer.render(&self.state)?;
            }
        }
        Ok(())
    }

    /// Take what the last step reported before the next tick clears it
    fn collect_events(&mut self) {
        for event in self.state.events.drain(..) {
            log_event(&event);
            self.events.push(event);
        }
    }

    /// Let `dt` of wall time pass, dispatching every tick that came due
    pub fn update<V: Renderer>(&mut self, dt: Duration, renderer: &mut V) -> Result<(), V::Error> {
        self.events.clear();
        for timer in self.scheduler.advance(dt) {
            self.on_timer(timer, renderer)?;
        }
        Ok(())
    }

    /// Stop both clocks. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.scheduler.is_running() {
            log::info!(
                "Session ended after {} ticks with score {}",
                self.state.time_ticks,
                self.state.score
            );
        }
        self.scheduler.stop();
    }
}

fn log_event(event: &GameEvent) {
    match *event {
        GameEvent::Spawned { id, kind } => log::debug!("Spawned {} #{}", kind.as_str(), id),
        GameEvent::Caught { kind, points } => log::debug!("Caught {} (+{})", kind.as_str(), points),
        GameEvent::BombHit { lives_left } => log::debug!("Bomb caught, {} lives left", lives_left),
        GameEvent::Missed { kind } => log::debug!("Missed {}", kind.as_str()),
        GameEvent::SpeedUp { multiplier } => log::debug!("Speed multiplier now {:.2}", multiplier),
        GameEvent::DifficultyUp { level } => log::debug!("Difficulty raised to {}", level),
        GameEvent::GameOver { score } => log::info!("Game over with score {}", score),
        GameEvent::Restarted => log::info!("Session restarted"),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
