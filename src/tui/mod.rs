mod app;
pub mod theme;
mod ui;

pub use app::{App, SectionPane};
pub use theme::Theme;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Run the interactive search view until the user quits.
///
/// Every key press is handled synchronously: the query is updated and the
/// filter pass runs before the next frame is drawn.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            app.handle_key(key);
            if app.should_quit() {
                log::debug!("Quit with query {:?}", app.query);
                return Ok(());
            }
        }
    }
}
