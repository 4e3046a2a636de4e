//! Terminal runner (default binary).
//!
//! Fixed-step loop: render, wait for input until the next tick, then apply at
//! most one command and advance the game by one step. Of several key presses
//! within one step the first wins, except that pause and reset replace a
//! queued move.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::core::GameSnapshot;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;
use blockfall::{logging, queue_command, Config, Session};

fn main() -> Result<()> {
    let config = Config::from_env();
    config.validate()?;
    let _log = logging::init(config.log_path.as_deref(), config.log_level)?;
    info!("starting: seed {}, tick {} ms", config.seed, config.tick_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Restore the terminal before reporting any error from the loop.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut session = Session::new(config.seed);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = config.tick_duration();
    let mut next_tick = Instant::now() + tick;

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        let mut command: Option<GameAction> = None;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        session.request_quit();
                    } else if let Some(action) = handle_key_event(key) {
                        command = queue_command(command, action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if session.should_quit() {
                info!(
                    "quit with score {} ({} lines)",
                    session.game().score(),
                    session.game().lines()
                );
                return Ok(());
            }
        }

        session.step(command);

        let now = Instant::now();
        next_tick += tick;
        if next_tick < now {
            // Behind schedule: no catch-up steps.
            next_tick = now + tick;
        }
    }
}
