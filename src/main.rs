//! Fruit Catcher entry point
//!
//! Sets up the terminal, reads keys on a dedicated thread and drives the
//! session clocks from wall time.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use fruit_catcher::renderer::TerminalRenderer;
use fruit_catcher::{Direction, InputEvent, Session, Settings};

/// How often the host loop wakes to feed elapsed time to the clocks
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A direction counts as held for this long after its last press/repeat event.
/// The OS key-repeat rate refreshes it before it runs out.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Catch the falling fruit, dodge the bombs.
#[derive(Debug, Parser)]
#[command(name = "fruit-catcher", version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

/// Last press/repeat seen per direction. Covers terminals that never send
/// release events.
#[derive(Default)]
struct HeldKeys {
    left: Option<Instant>,
    right: Option<Instant>,
}

impl HeldKeys {
    fn slot(&mut self, direction: Direction) -> &mut Option<Instant> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    fn touch(&mut self, direction: Direction, now: Instant) {
        *self.slot(direction) = Some(now);
    }

    fn clear(&mut self, direction: Direction) {
        *self.slot(direction) = None;
    }

    /// Directions whose hold window ran out; they are cleared
    fn expire(&mut self, now: Instant) -> Vec<Direction> {
        let mut expired = Vec::new();
        for direction in [Direction::Left, Direction::Right] {
            let slot = self.slot(direction);
            if slot.is_some_and(|seen| now.duration_since(seen) > HOLD_WINDOW) {
                *slot = None;
                expired.push(direction);
            }
        }
        expired
    }
}

fn direction_of(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings.validate()?;

    if cli.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    log::info!("Fruit Catcher starting...");

    let out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;

    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let mut renderer = TerminalRenderer::new(out, cols, rows);
    let result = in_alternate_screen(&mut renderer, |renderer| {
        // Blocking reads live on their own thread so the game loop never waits on I/O
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });
        run(renderer, &rx, &settings)
    });
    let _ = terminal::disable_raw_mode();

    result
}

/// Switch to the alternate screen, run `play`, then always put the screen
/// back, even when switching over failed halfway
fn in_alternate_screen<W, F>(renderer: &mut TerminalRenderer<W>, play: F) -> anyhow::Result<()>
where
    W: Write,
    F: FnOnce(&mut TerminalRenderer<W>) -> anyhow::Result<()>,
{
    let mut keyboard_enhanced = false;
    let result =
        enter_screen(renderer.writer(), &mut keyboard_enhanced).and_then(|()| play(renderer));

    let out = renderer.writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = out.flush();

    result
}

fn enter_screen<W: Write>(out: &mut W, keyboard_enhanced: &mut bool) -> anyhow::Result<()> {
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide).context("hiding cursor")?;

    // Key-release events where the terminal supports them
    *keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(())
}

fn run<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut session = Session::seeded(settings);
    let mut held = HeldKeys::default();
    let mut last = Instant::now();

    loop {
        let now = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if kind != KeyEventKind::Release && is_quit(code, modifiers) {
                        session.teardown();
                        return Ok(());
                    }
                    if let Some(direction) = direction_of(code) {
                        if kind == KeyEventKind::Release {
                            held.clear(direction);
                            session.handle_input(InputEvent::Release(direction));
                        } else {
                            held.touch(direction, now);
                            session.handle_input(InputEvent::Press(direction));
                        }
                    } else if kind == KeyEventKind::Press
                        && matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
                    {
                        session.handle_input(InputEvent::Restart);
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        // Repeat events keep a held key fresh; silence means it was let go
        for direction in held.expire(now) {
            session.handle_input(InputEvent::Release(direction));
        }

        if let Err(error) = session.update(now.duration_since(last), renderer) {
            session.teardown();
            return Err(error).context("drawing frame");
        }
        last = now;

        thread::sleep(POLL_INTERVAL);
    }
}
