//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Randomness only through an injected `rand::Rng`
//! - Stable iteration order (insertion order, resolved newest first)
//! - No rendering, timer or platform dependencies

pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use spawn::spawn;
pub use state::{Basket, FallingObject, GameEvent, GameState, ObjectKind, PlayArea};
pub use tick::{TickInput, tick};
