//! Terminal rendering module
//!
//! Translates a read-only `GameState` into terminal draw commands. Visual
//! resources live here only; the simulation never sees them.

pub mod terminal;

pub use terminal::TerminalRenderer;

use crossterm::style::Color;

use crate::sim::ObjectKind;

/// How a falling object is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub glyph: char,
    pub color: Color,
}

impl Appearance {
    /// Total mapping from kind to visual treatment
    pub fn of(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Apple => Self {
                glyph: '●',
                color: Color::Red,
            },
            ObjectKind::Banana => Self {
                glyph: '●',
                color: Color::Yellow,
            },
            ObjectKind::Grape => Self {
                glyph: '●',
                color: Color::Magenta,
            },
            ObjectKind::Bomb => Self {
                glyph: '✹',
                color: Color::DarkGrey,
            },
        }
    }
}
