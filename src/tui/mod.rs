//! TUI module for interactive tree browsing.

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

pub use app::App;

/// Run the browser until the user quits, restoring the terminal afterwards.
pub fn run(mut app: App, tick_rate: Duration) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app, tick_rate);
    restore_terminal(&mut terminal)?;
    result
}

/// Draw, collect events for one tick, then advance the navigator.
pub fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| {
            app.set_viewport(ui::tree_viewport(frame.area()));
            ui::render(app, frame);
        })?;

        event::handle_events(app, tick_rate)?;

        let now = Instant::now();
        app.tick(now.duration_since(last_tick).as_secs_f32());
        last_tick = now;
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableFocusChange)?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
