use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, InputField, InputMode, View};
use crate::models::{NoteColor, StickyNote, CELL_HEIGHT_PX, CELL_WIDTH_PX, NOTE_HEIGHT, NOTE_WIDTH};

struct Theme {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
}

fn theme(dark: bool) -> Theme {
    if dark {
        Theme {
            background: Color::Rgb(17, 24, 39),
            text: Color::Rgb(243, 244, 246),
            muted: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(250, 204, 21),
        }
    } else {
        Theme {
            background: Color::Rgb(240, 249, 255),
            text: Color::Rgb(31, 41, 55),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(59, 130, 246),
        }
    }
}

/// Fill and border colours for a note.
fn note_colors(color: NoteColor, dark: bool) -> (Color, Color) {
    match (color, dark) {
        (NoteColor::Yellow, false) => (Color::Rgb(254, 240, 138), Color::Rgb(250, 204, 21)),
        (NoteColor::Pink, false) => (Color::Rgb(251, 207, 232), Color::Rgb(244, 114, 182)),
        (NoteColor::Green, false) => (Color::Rgb(187, 247, 208), Color::Rgb(74, 222, 128)),
        (NoteColor::Blue, false) => (Color::Rgb(191, 219, 254), Color::Rgb(96, 165, 250)),
        (NoteColor::Purple, false) => (Color::Rgb(233, 213, 255), Color::Rgb(192, 132, 252)),
        (NoteColor::Yellow, true) => (Color::Rgb(161, 98, 7), Color::Rgb(202, 138, 4)),
        (NoteColor::Pink, true) => (Color::Rgb(190, 24, 93), Color::Rgb(219, 39, 119)),
        (NoteColor::Green, true) => (Color::Rgb(21, 128, 61), Color::Rgb(22, 163, 74)),
        (NoteColor::Blue, true) => (Color::Rgb(29, 78, 216), Color::Rgb(37, 99, 235)),
        (NoteColor::Purple, true) => (Color::Rgb(126, 34, 206), Color::Rgb(147, 51, 234)),
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let t = theme(app.dark_mode);
    f.render_widget(Block::default().style(Style::default().bg(t.background)), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    let mode = if app.dark_mode { "☀ light (m)" } else { "☾ dark (m)" };
    let title = Line::from(vec![
        Span::styled("To-Do List", Style::default().fg(t.text).add_modifier(Modifier::BOLD)),
        Span::styled(format!("   {}", mode), Style::default().fg(t.muted)),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    match app.view {
        View::Board => draw_board(f, app, chunks[1], &t),
        View::Tasks => draw_tasks(f, app, chunks[1], &t),
    }

    let help_text = match (app.input_mode, app.view) {
        (InputMode::Editing, _) => "Enter: Save | Esc: Cancel",
        (InputMode::Normal, View::Board) => "q: Quit | a: Add | e: Edit | t: Due | Space: Done | d: Del | Tab: Next | Arrows: Move | Mouse: Drag | m: Dark | v: Tasks",
        (InputMode::Normal, View::Tasks) => "q: Quit | i: New | Space: Done | d: Del | J/K: Move | Mouse: Drag to reorder | m: Dark | v: Board",
    };
    let help_line = match &app.status {
        Some(status) => Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(Color::Red)),
            Span::raw("  "),
            Span::styled(help_text, Style::default().fg(t.muted)),
        ]),
        None => Line::from(Span::styled(help_text, Style::default().fg(t.muted))),
    };
    let help = Paragraph::new(help_line).block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(t.muted)));
    f.render_widget(help, chunks[2]);

    if app.input_mode == InputMode::Editing && app.input_field != InputField::NewTask {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);
        let title = match app.input_field {
            InputField::NoteText => "Edit Note",
            InputField::NoteDue => "Due Date (YYYY-MM-DD, empty clears)",
            _ => "Edit",
        };
        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }
}

/// Whole cells covered by a pixel offset, bounded to the `i32` range so the
/// sums in `note_rect` stay in `i64`.
fn px_to_cells(px: f64, cell_px: f64) -> i64 {
    (px / cell_px).floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i64
}

/// Screen rectangle of a note clipped to `area`, or `None` when fully outside.
pub fn note_rect(note: &StickyNote, area: Rect) -> Option<Rect> {
    let left = i64::from(area.x) + px_to_cells(note.x, CELL_WIDTH_PX);
    let top = i64::from(area.y) + px_to_cells(note.y, CELL_HEIGHT_PX);
    let width = (NOTE_WIDTH / CELL_WIDTH_PX).ceil() as i64;
    let height = (NOTE_HEIGHT / CELL_HEIGHT_PX).ceil() as i64;

    let x0 = left.max(i64::from(area.x));
    let y0 = top.max(i64::from(area.y));
    let x1 = (left + width).min(i64::from(area.x) + i64::from(area.width));
    let y1 = (top + height).min(i64::from(area.y) + i64::from(area.height));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

fn draw_board(f: &mut Frame, app: &mut App, area: Rect, t: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.muted))
        .title(format!("Board ({} notes)", app.notes.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.board_area = inner;

    for note in app.notes.by_z() {
        let Some(rect) = note_rect(note, inner) else { continue };
        let (fill, border) = note_colors(note.color, app.dark_mode);
        let selected = app.selected_note.as_deref() == Some(note.id.as_str());
        let text_style = if note.completed {
            Style::default().fg(t.text).add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
        } else {
            Style::default().fg(t.text).add_modifier(Modifier::BOLD)
        };

        let mut lines = vec![Line::from(Span::styled(note.display_text().to_string(), text_style))];
        if let Some(due) = note.due_date {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("📅 {}", due.format("%b %-d, %Y")), Style::default().fg(t.text))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(if note.completed { "[x]" } else { "[ ]" }, Style::default().fg(t.text))));

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(fill))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(if selected { BorderType::Double } else { BorderType::Rounded })
                    .border_style(Style::default().fg(border).bg(fill)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(card, rect);
    }
}

fn draw_tasks(f: &mut Frame, app: &mut App, area: Rect, t: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let typing = app.input_mode == InputMode::Editing && app.input_field == InputField::NewTask;
    let input = if typing {
        Paragraph::new(app.input_buffer.as_str()).style(Style::default().fg(t.text))
    } else {
        Paragraph::new("What needs to be done? (i)").style(Style::default().fg(t.muted))
    };
    let input_border = if typing { t.accent } else { t.muted };
    f.render_widget(
        input.block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(input_border))),
        chunks[0],
    );

    let dragging = app.reorder.source();
    let target = app.reorder.target();
    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let mut style = if task.completed {
                Style::default().fg(t.muted).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(t.text)
            };
            if dragging == Some(i) {
                style = style.add_modifier(Modifier::DIM);
            }
            let grip = if target == Some(i) && dragging.is_some() { "▸ " } else { "⠿ " };
            ListItem::new(Line::from(vec![
                Span::styled(grip, Style::default().fg(t.muted)),
                Span::raw(if task.completed { "[x] " } else { "[ ] " }),
                Span::styled(task.text.clone(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.muted))
        .title(format!("Tasks ({} left)", app.tasks.tasks().iter().filter(|task| !task.completed).count()));
    app.task_area = block.inner(chunks[1]);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(t.accent));
    f.render_stateful_widget(list, chunks[1], &mut app.task_state);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
