//! Crossterm frontend
//!
//! Row 0 is the HUD; the rest of the terminal shows the play area scaled
//! down from logical pixels to character cells.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::Appearance;
use crate::session::Renderer;
use crate::sim::{GameState, Rect};

const C_BORDER: Color = Color::DarkBlue;
const C_BASKET: Color = Color::DarkYellow;
const C_SCORE: Color = Color::White;
const C_LIVES: Color = Color::Red;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const GAME_OVER_TEXT: &str = "Game over! Press R to restart";

/// Draws frames onto a terminal-like writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self { out, cols, rows }
    }

    /// Track a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Rows available to the play area (below the HUD)
    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(1).max(1)
    }

    /// Map a logical rectangle to (col, row, width) in cells.
    /// `None` when it lies entirely outside the visible area.
    fn to_cells(&self, rect: &Rect, state: &GameState) -> Option<(u16, u16, u16)> {
        let area = state.area;
        if rect.bottom() <= 0 || rect.top() >= area.height {
            return None;
        }
        let cols = i64::from(self.cols.max(1));
        let rows = i64::from(self.field_rows());

        let col = i64::from(rect.left().max(0)) * cols / i64::from(area.width);
        let row = i64::from(rect.top().max(0)) * rows / i64::from(area.height);
        let width = (i64::from(rect.width()) * cols / i64::from(area.width)).max(1);

        let col = col.min(cols - 1) as u16;
        let row = (row.min(rows - 1) + 1) as u16;
        let width = width.min(cols - i64::from(col)) as u16;
        Some((col, row, width))
    }

    fn draw_hud(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_SCORE))?;
        self.out.queue(Print(format!("Score: {:>5}", state.score)))?;

        self.out.queue(cursor::MoveTo(16, 0))?;
        self.out.queue(style::SetForegroundColor(C_LIVES))?;
        let hearts = "♥".repeat(state.lives.max(0) as usize);
        self.out.queue(Print(format!("Lives: {hearts}")))?;

        let hint = "← → : Move   Q : Quit";
        let col = self.cols.saturating_sub(hint.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(col, 0))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }

    fn draw_floor(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(Print("─".repeat(self.cols as usize)))?;
        Ok(())
    }

    fn draw_objects(&mut self, state: &GameState) -> std::io::Result<()> {
        for obj in &state.objects {
            let Some((col, row, _)) = self.to_cells(&obj.bounds, state) else {
                continue;
            };
            let look = Appearance::of(obj.kind);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(look.color))?;
            self.out.queue(Print(look.glyph))?;
        }
        Ok(())
    }

    fn draw_basket(&mut self, state: &GameState) -> std::io::Result<()> {
        if let Some((col, row, width)) = self.to_cells(&state.basket.bounds, state) {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(C_BASKET))?;
            self.out.queue(Print("▀".repeat(width as usize)))?;
        }
        Ok(())
    }

    fn draw_game_over(&mut self) -> std::io::Result<()> {
        let col = (self.cols / 2).saturating_sub(GAME_OVER_TEXT.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, self.rows / 2))?;
        self.out.queue(style::SetForegroundColor(C_GAME_OVER))?;
        self.out.queue(Print(GAME_OVER_TEXT))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    /// Render one complete frame
    fn render(&mut self, state: &GameState) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_hud(state)?;
        self.draw_floor()?;
        self.draw_objects(state)?;
        self.draw_basket(state)?;

        if state.game_over {
            self.draw_game_over()?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
