//! Fruit Catcher - catch the falling fruit, dodge the bombs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collisions, scoring)
//! - `scheduler`: The two periodic clocks that drive the simulation
//! - `session`: Controller wiring input, timers and rendering to the sim
//! - `renderer`: Terminal frontend
//! - `settings`: Data-driven configuration

pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use scheduler::{Scheduler, TimerTick};
pub use session::{Direction, InputEvent, Renderer, Session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Logical play area (pixels)
    pub const PLAY_AREA_WIDTH: i32 = 800;
    pub const PLAY_AREA_HEIGHT: i32 = 600;

    /// Default timer cadences (milliseconds)
    pub const SIM_INTERVAL_MS: u64 = 20;
    pub const SPAWN_INTERVAL_MS: u64 = 1000;

    /// Basket geometry
    pub const BASKET_WIDTH: i32 = 100;
    pub const BASKET_HEIGHT: i32 = 30;
    /// Gap between the basket bottom and the play area bottom
    pub const BASKET_BOTTOM_MARGIN: i32 = 20;
    /// Horizontal distance moved per tick while an intent is held
    pub const BASKET_STEP: i32 = 15;

    /// Session start values
    pub const START_LIVES: i32 = 3;
    pub const START_DIFFICULTY: u32 = 5;
    pub const START_SPEED_MULTIPLIER: f32 = 1.0;

    /// Speed multiplier ramp: +0.01 every 100 ticks
    pub const SPEED_RAMP_INTERVAL_TICKS: u64 = 100;
    pub const SPEED_RAMP_STEP: f32 = 0.01;

    /// Base difficulty goes up by one per this many points
    pub const DIFFICULTY_SCORE_STEP: u32 = 500;

    /// Spawn parameters
    pub const SPAWN_EDGE_MARGIN: i32 = 50;
    pub const OBJECT_MIN_SIZE: i32 = 20;
    pub const OBJECT_MAX_SIZE: i32 = 40; // exclusive
    pub const BOMB_CHANCE_PERCENT: u32 = 25;
    pub const MIN_BASE_SPEED: i32 = 3;
}
