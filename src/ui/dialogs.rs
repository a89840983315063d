use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use crate::input::form::{FormField, TaskForm};
use crate::models::{Quadrant, TaskId};

/// Action behind a confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(TaskId),
}

pub enum DialogType {
    /// New-task or edit-task form
    TaskForm(TaskForm),
    /// Yes / no confirmation
    Confirm {
        title: String,
        message: String,
        yes_selected: bool,
        action: ConfirmAction,
    },
}

/// Render the dialog centered over the board
pub fn render_dialog(f: &mut Frame, dialog: &DialogType) {
    let area = match dialog {
        DialogType::TaskForm(_) => centered_rect(60, 50, f.area()),
        DialogType::Confirm { .. } => centered_rect(50, 30, f.area()),
    };

    f.render_widget(Clear, area);

    match dialog {
        DialogType::TaskForm(form) => render_task_form(f, area, form),
        DialogType::Confirm {
            title,
            message,
            yes_selected,
            ..
        } => render_confirm_dialog(f, area, title, message, *yes_selected),
    }
}

fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm) {
    let title = if form.is_edit() { "  Edit task  " } else { "  New task  " };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(136, 192, 208)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // text
            Constraint::Length(3), // deadline
            Constraint::Length(3), // quadrant
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let now = Instant::now();
    let text_block = field_block(" Task ", form, FormField::Text, now);
    let text_inner = text_block.inner(chunks[0]);
    f.render_widget(text_block, chunks[0]);
    f.render_widget(form.text_area(), text_inner);

    let deadline_block = field_block(" Deadline ", form, FormField::Deadline, now);
    let deadline_inner = deadline_block.inner(chunks[1]);
    f.render_widget(deadline_block, chunks[1]);
    f.render_widget(form.deadline_area(), deadline_inner);

    // Existing tasks change quadrant by moving, not through the form
    if !form.is_edit() {
        let quadrant_block = field_block(" Quadrant ", form, FormField::Quadrant, now);
        let spans: Vec<Span> = Quadrant::ALL
            .into_iter()
            .flat_map(|q| {
                let style = if q == form.quadrant {
                    Style::default()
                        .fg(Color::Black)
                        .bg(quadrant_color(q))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(quadrant_color(q))
                };
                [
                    Span::styled(format!(" {} {} ", q.index() + 1, q.label()), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)).block(quadrant_block), chunks[2]);
    }

    let hints = Paragraph::new("Enter save · Tab next field · Esc cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(129, 161, 193)));
    f.render_widget(hints, chunks[4]);
}

/// Focused fields are highlighted; a field that failed validation flashes red
fn field_block(title: &str, form: &TaskForm, field: FormField, now: Instant) -> Block<'static> {
    let border = if form.is_flashing(field, now) {
        Color::Red
    } else if form.focus == field {
        Color::White
    } else {
        Color::DarkGray
    };

    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .border_type(ratatui::widgets::BorderType::Rounded)
}

/// Render a yes / no confirmation
fn render_confirm_dialog(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    yes_selected: bool,
) {
    let block = Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(235, 203, 139)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // message
            Constraint::Length(3), // buttons
        ])
        .split(inner);

    let message_text = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(216, 222, 233)));
    f.render_widget(message_text, chunks[0]);

    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let no_style = if !yes_selected {
        Style::default()
            .bg(Color::Rgb(191, 97, 106))
            .fg(Color::Rgb(46, 52, 64))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(191, 97, 106))
            .add_modifier(Modifier::DIM)
    };
    let no_button = Paragraph::new("[ n ] No")
        .style(no_style)
        .alignment(Alignment::Center);
    f.render_widget(no_button, button_chunks[1]);

    let yes_style = if yes_selected {
        Style::default()
            .bg(Color::Rgb(163, 190, 140))
            .fg(Color::Rgb(46, 52, 64))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(163, 190, 140))
            .add_modifier(Modifier::DIM)
    };
    let yes_button = Paragraph::new("[ y ] Yes")
        .style(yes_style)
        .alignment(Alignment::Center);
    f.render_widget(yes_button, button_chunks[2]);
}

/// Accent color per quadrant
pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::UrgentImportant => Color::Rgb(191, 97, 106),
        Quadrant::UrgentNotImportant => Color::Rgb(235, 203, 139),
        Quadrant::NotUrgentImportant => Color::Rgb(129, 161, 193),
        Quadrant::NotUrgentNotImportant => Color::Rgb(163, 190, 140),
    }
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
