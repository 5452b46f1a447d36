//! The blocking terminal loop: draw a frame, read a key, feed the engine.
//!
//! The terminal is put into raw mode on an alternate screen for the whole
//! run; `TerminalGuard` restores it on every exit path, including panics.

use std::io::{self, Write};

use core::types::UiRequest;
use core::Game;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::{cursor, execute, terminal};

use crate::outcome_banner;
use crate::render;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until any key press arrives; other terminal events are ignored.
fn wait_for_key() -> Result<crossterm::event::KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    }
}

pub fn run(mut game: Game) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();

    while game.running() {
        render::draw_frame(&mut out, &game)?;

        if let Some(outcome) = game.outcome() {
            render::draw_end_screen(&mut out, &game, outcome_banner(outcome))?;
            wait_for_key()?;
            break;
        }

        let key = wait_for_key()?;
        let Some(action) = crate::input::decode(key, game.inventory_open()) else {
            continue;
        };

        if let Some(UiRequest::ShowHelp) = game.handle_action(action) {
            render::draw_help(&mut out)?;
            wait_for_key()?;
        }
    }

    out.flush()?;
    Ok(())
}
