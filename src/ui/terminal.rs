use {
    crate::state::{App, DateField},
    crossterm::event::{self, Event, KeyCode},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::time::Duration,
};

/// Idle redraw interval; every key event redraws immediately after dispatch.
const TICK: Duration = Duration::from_millis(250);

/// Run the dashboard event loop
///
/// Synchronous request/response per interaction: each key event mutates the
/// state (which re-filters and re-aggregates before returning), then the next
/// frame is drawn before another event is read.
pub fn run_ui(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Enable raw mode for keyboard input
    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps the dashboard isolated from stderr logs
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    while !app.should_quit {
        let area = terminal.size()?;
        terminal.draw(|f| {
            if let Err(e) = crate::ui::layout::render_layout(f, area, app) {
                log::error!("Layout render error: {}", e);
            }
        })?;

        // Check for keyboard input (non-blocking)
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key.code);
            }
        }
    }

    // Cleanup - restore terminal state
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char('s') => app.focus_date(DateField::Start),
        KeyCode::Char('e') => app.focus_date(DateField::End),
        KeyCode::Left => app.nudge_focused_date(false),
        KeyCode::Right => app.nudge_focused_date(true),
        KeyCode::Char('a') => app.select_all_stores(),
        KeyCode::Char('n') => app.clear_stores(),
        KeyCode::Char('r') => app.reset_selection(),
        KeyCode::Up => app.scroll_table(-1),
        KeyCode::Down => app.scroll_table(1),
        KeyCode::PageUp => app.scroll_table(-10),
        KeyCode::PageDown => app.scroll_table(10),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.toggle_store((digit - 1) as usize);
            }
        }
        _ => {
            // Remaining keys are no-ops
        }
    }
}
