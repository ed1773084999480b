pub mod app;
pub mod ui;

use std::{error::Error, io};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use crate::config::Config;
use crate::storage::FileStorage;
use app::{App, InputField, InputMode, View};
use ui::ui;

pub fn run_tui(config: &Config, start_view: View) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let storage = FileStorage::open(config.db_path.clone());
    info!(path = %storage.path().display(), "starting tui");
    let mut app = App::new(Box::new(storage), config.prefers_dark);
    app.view = start_view;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Mouse(mouse) if app.input_mode == InputMode::Normal => app.handle_mouse(mouse),
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.status = None;
                match app.input_mode {
                    InputMode::Normal => match (app.view, key.code) {
                        (_, KeyCode::Char('q')) => return Ok(()),
                        (_, KeyCode::Char('m')) => app.toggle_dark_mode(),
                        (_, KeyCode::Char('v')) => app.toggle_view(),
                        (View::Board, KeyCode::Char('a')) => app.add_note(),
                        (View::Board, KeyCode::Char('e')) | (View::Board, KeyCode::Enter) => app.start_edit(InputField::NoteText),
                        (View::Board, KeyCode::Char('t')) => app.start_edit(InputField::NoteDue),
                        (View::Board, KeyCode::Char(' ')) => app.toggle_selected_note(),
                        (View::Board, KeyCode::Char('d')) | (View::Board, KeyCode::Delete) => app.delete_selected_note(),
                        (View::Board, KeyCode::Tab) => app.select_next_note(),
                        (View::Board, KeyCode::Left) => app.nudge_selected_note(-1, 0),
                        (View::Board, KeyCode::Right) => app.nudge_selected_note(1, 0),
                        (View::Board, KeyCode::Up) => app.nudge_selected_note(0, -1),
                        (View::Board, KeyCode::Down) => app.nudge_selected_note(0, 1),
                        (View::Tasks, KeyCode::Char('i')) | (View::Tasks, KeyCode::Char('a')) => app.start_edit(InputField::NewTask),
                        (View::Tasks, KeyCode::Down) | (View::Tasks, KeyCode::Char('j')) => app.next_task(),
                        (View::Tasks, KeyCode::Up) | (View::Tasks, KeyCode::Char('k')) => app.previous_task(),
                        (View::Tasks, KeyCode::Char('J')) => app.move_selected_task(1),
                        (View::Tasks, KeyCode::Char('K')) => app.move_selected_task(-1),
                        (View::Tasks, KeyCode::Char(' ')) => app.toggle_selected_task(),
                        (View::Tasks, KeyCode::Char('d')) | (View::Tasks, KeyCode::Delete) => app.delete_selected_task(),
                        _ => {}
                    },
                    InputMode::Editing => match key.code {
                        KeyCode::Enter => app.handle_input(),
                        KeyCode::Esc => app.cancel_input(),
                        KeyCode::Char(c) => {
                            app.input_buffer.push(c);
                        }
                        KeyCode::Backspace => {
                            app.input_buffer.pop();
                        }
                        _ => {}
                    },
                }
            }
            _ => {}
        }
    }
}
