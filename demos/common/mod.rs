//! Common terminal utilities for the demos.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::time::Duration;

/// Event handling result that controls the event loop
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Runs an interactive demo with a full-screen terminal UI.
///
/// This function handles all the boilerplate:
/// - Terminal raw mode, alternate screen and mouse capture
/// - Panic hook for terminal cleanup
/// - Event loop that redraws after every handled event
///
/// # Arguments
///
/// * `state` - The demo state, owned by the loop
/// * `draw` - Closure that repaints the whole screen from the state
/// * `handler` - Closure that handles key and mouse events and returns whether to continue or exit
pub fn run_interactive_example<S, D, H>(mut state: S, draw: D, mut handler: H) -> Result<()>
where
    D: Fn(&mut S) -> Result<()>,
    H: FnMut(&mut S, &Event) -> Result<KeyAction>,
{
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    stdout().execute(crossterm::cursor::Hide)?;

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let result = event_loop(&mut state, &draw, &mut handler);
    cleanup_terminal();
    result
}

fn event_loop<S, D, H>(state: &mut S, draw: &D, handler: &mut H) -> Result<()>
where
    D: Fn(&mut S) -> Result<()>,
    H: FnMut(&mut S, &Event) -> Result<KeyAction>,
{
    draw(state)?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match handler(state, &event)? {
                KeyAction::Continue => draw(state)?,
                KeyAction::Exit => return Ok(()),
            }
        }
    }
}

/// Cleans up terminal state (mouse capture, cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(DisableMouseCapture);
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
