//! Periodic timers driving the simulation
//!
//! Two independent clocks: a fast simulation tick and a slow spawn tick.
//! The host loop feeds real elapsed time into `Scheduler::advance` and
//! dispatches whatever came due, one tick at a time, never overlapping.

use std::time::Duration;

use crate::consts::{SIM_INTERVAL_MS, SPAWN_INTERVAL_MS};
use crate::settings::Settings;

/// Maximum ticks released by a single `advance` call (prevents a spiral of
/// death after the host stalls)
pub const MAX_TICKS_PER_ADVANCE: usize = 64;

/// Which clock fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    Sim,
    Spawn,
}

/// A fixed-interval clock with its own accumulator
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl PeriodicTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting from zero. Starting a running timer changes nothing.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Stop and drop any pending time. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    fn accumulate(&mut self, dt: Duration) {
        if self.running {
            self.elapsed += dt;
        }
    }

    /// How long ago the next pending fire came due, if one has
    fn overdue(&self) -> Option<Duration> {
        if self.running && self.elapsed >= self.interval {
            Some(self.elapsed - self.interval)
        } else {
            None
        }
    }

    fn consume(&mut self) {
        self.elapsed -= self.interval;
    }

    /// Discard whole pending intervals, keeping the partial one
    fn drop_backlog(&mut self) {
        let interval = self.interval.as_nanos();
        let kept = self.elapsed.as_nanos() % interval;
        self.elapsed = Duration::from_nanos(kept as u64);
    }
}

/// The simulation and spawn clocks
#[derive(Debug, Clone)]
pub struct Scheduler {
    sim: PeriodicTimer,
    spawn: PeriodicTimer,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(SIM_INTERVAL_MS),
            Duration::from_millis(SPAWN_INTERVAL_MS),
        )
    }
}

impl Scheduler {
    /// Create a stopped scheduler
    pub fn new(sim_interval: Duration, spawn_interval: Duration) -> Self {
        Self {
            sim: PeriodicTimer::new(sim_interval),
            spawn: PeriodicTimer::new(spawn_interval),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_interval(), settings.spawn_interval())
    }

    pub fn start(&mut self) {
        self.sim.start();
        self.spawn.start();
    }

    /// Stop both clocks. Idempotent.
    pub fn stop(&mut self) {
        self.sim.stop();
        self.spawn.stop();
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running() || self.spawn.is_running()
    }

    /// Let `dt` pass and return the ticks that came due, earliest first.
    /// On an exact tie the simulation tick goes first.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerTick> {
        self.sim.accumulate(dt);
        self.spawn.accumulate(dt);

        let mut fired = Vec::new();
        loop {
            let next = match (self.sim.overdue(), self.spawn.overdue()) {
                (None, None) => break,
                (Some(_), None) => TimerTick::Sim,
                (None, Some(_)) => TimerTick::Spawn,
                // The larger overdue came due earlier
                (Some(sim), Some(spawn)) if spawn > sim => TimerTick::Spawn,
                (Some(_), Some(_)) => TimerTick::Sim,
            };

            if fired.len() == MAX_TICKS_PER_ADVANCE {
                log::warn!("Scheduler fell behind, dropping pending ticks");
                self.sim.drop_backlog();
                self.spawn.drop_backlog();
                break;
            }

            match next {
                TimerTick::Sim => self.sim.consume(),
                TimerTick::Spawn => self.spawn.consume(),
            }
            fired.push(next);
        }
        fired
    }
}
