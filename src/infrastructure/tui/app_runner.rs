use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::infrastructure::render::SharedSurface;
use crate::infrastructure::tui::widgets::framebuffer_view;
use crate::interface_adapter::controller::{SimAction, SimulatorController};
use crate::interface_adapter::port::{ConsoleRegistry, PtyPort};

/// How long to wait for a key before polling the child again.
const TICK: Duration = Duration::from_millis(16);

/// Map a key press to a simulator action. Keys are not forwarded to the
/// child, so only the quit keys mean anything.
fn key_to_action(key: KeyEvent) -> Option<SimAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(SimAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SimAction::Quit)
        }
        _ => None,
    }
}

fn status_text(exit_code: Option<i32>, bytes: usize) -> String {
    match exit_code {
        Some(code) => format!("exited ({code}) | {bytes} bytes | q: quit"),
        None => format!("running | {bytes} bytes | q: quit"),
    }
}

/// Main TUI event loop.
///
/// Initializes crossterm raw mode + alternate screen, creates the ratatui Terminal,
/// runs the poll -> draw -> input loop, and cleans up on exit.
pub fn run<P: PtyPort, R: ConsoleRegistry>(
    mut controller: SimulatorController<P, R>,
    surface: SharedSurface,
    scale: u16,
) -> anyhow::Result<()> {
    // === Initialization ===
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // === Main loop ===
    let result = main_loop(&mut terminal, &mut controller, &surface, scale);

    // === Cleanup (always runs) ===
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
    let shutdown = controller.shutdown();

    result?;
    shutdown?;
    Ok(())
}

fn main_loop<P: PtyPort, R: ConsoleRegistry>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut SimulatorController<P, R>,
    surface: &SharedSurface,
    scale: u16,
) -> anyhow::Result<()> {
    loop {
        // 1. Child output into the console
        controller.dispatch(SimAction::PollOutput)?;

        // 2. Draw
        let title = controller.console_name().to_string();
        let status = status_text(controller.exit_code(), controller.bytes_written());
        terminal.draw(|frame| {
            let area = frame.area();
            let pixels = surface.lock();
            framebuffer_view::render(frame, area, &pixels, scale, &title, &status);
        })?;

        // 3. Input
        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match key_to_action(key) {
                Some(SimAction::Quit) => return Ok(()),
                Some(action) => controller.dispatch(action)?,
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            key_to_action(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(SimAction::Quit)
        );
        assert_eq!(
            key_to_action(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(SimAction::Quit)
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SimAction::Quit)
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_to_action(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(key_to_action(press(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(key), None);
    }

    #[test]
    fn status_reports_exit_code() {
        assert_eq!(status_text(None, 5), "running | 5 bytes | q: quit");
        assert_eq!(status_text(Some(1), 0), "exited (1) | 0 bytes | q: quit");
    }
}
