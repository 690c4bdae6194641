//! Falling object spawner
//!
//! Called on its own (slower) clock. All randomness comes through the
//! injected `rng` so a seeded generator reproduces a run exactly.

use rand::Rng;

use super::rect::Rect;
use super::state::{FallingObject, GameEvent, GameState, ObjectKind};
use crate::consts::*;

/// Append one new falling object. Returns its ID, or `None` after game over.
pub fn spawn(state: &mut GameState, rng: &mut impl Rng) -> Option<u32> {
    if state.game_over {
        return None;
    }

    let x = rng.random_range(SPAWN_EDGE_MARGIN..spawn_x_limit(state.area.width));
    let size = rng.random_range(OBJECT_MIN_SIZE..OBJECT_MAX_SIZE);
    let kind = roll_kind(rng);
    let speed = roll_speed(rng, state.difficulty, state.speed_multiplier);

    let id = state.next_object_id();
    state.objects.push(FallingObject {
        id,
        // Starts fully above the visible area
        bounds: Rect::new(x, -size, size, size),
        kind,
        speed,
    });
    state.events.push(GameEvent::Spawned { id, kind });

    Some(id)
}

/// Exclusive upper bound for the spawn X, kept above the lower bound
fn spawn_x_limit(width: i32) -> i32 {
    (width - SPAWN_EDGE_MARGIN).max(SPAWN_EDGE_MARGIN + 1)
}

/// One in four objects is a bomb; the rest split evenly between fruits
fn roll_kind(rng: &mut impl Rng) -> ObjectKind {
    if rng.random_range(0..100) < BOMB_CHANCE_PERCENT {
        ObjectKind::Bomb
    } else {
        ObjectKind::FRUITS[rng.random_range(0..ObjectKind::FRUITS.len())]
    }
}

/// Base speed from `[3, 3 + difficulty / 2)`, scaled by the multiplier and truncated
fn roll_speed(rng: &mut impl Rng, difficulty: u32, multiplier: f32) -> i32 {
    let spread = (difficulty / 2).max(1) as i32;
    let base = rng.random_range(MIN_BASE_SPEED..MIN_BASE_SPEED + spread);
    ((base as f32 * multiplier) as i32).max(1)
}
