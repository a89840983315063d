use crate::app::Mode;
use crate::view::BoardView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title, date and board-wide counters
pub fn render_header(f: &mut Frame, area: Rect, view: &BoardView) {
    let stats = &view.stats;
    let overdue_style = if stats.overdue > 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let due_style = if stats.due_today > 0 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let line = Line::from(vec![
        Span::styled(
            " Eisenhower Matrix ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} ", view.today.format("%a %Y-%m-%d"))),
        Span::raw("│ "),
        Span::styled(format!("{} due today", stats.due_today), due_style),
        Span::raw(" │ "),
        Span::styled(format!("{} overdue", stats.overdue), overdue_style),
        Span::raw(" │ "),
        Span::styled(
            format!("{} active · {} completed", stats.active_total(), stats.completed),
            Style::default().fg(Color::Gray),
        ),
    ]);

    f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}

/// Mode badge with key hints, or the drag banner while moving a task
pub fn render_footer(f: &mut Frame, area: Rect, mode: Mode, view: &BoardView) {
    let (mode_text, mode_color) = match mode {
        Mode::Normal => ("NORMAL", Color::Green),
        Mode::Drag => ("MOVE", Color::Yellow),
        Mode::Dialog => ("EDIT", Color::Magenta),
        Mode::Help => ("HELP", Color::Blue),
    };

    let hints = match (mode, view.drag_banner.as_deref()) {
        (Mode::Drag, Some(banner)) => format!(" {} │ Enter drop · Esc cancel", banner),
        (Mode::Drag, None) => " Enter drop · Esc cancel".to_string(),
        (Mode::Dialog, _) => " Enter save · Esc cancel".to_string(),
        (Mode::Help, _) => " Esc close help".to_string(),
        (Mode::Normal, _) => {
            " a add · e edit · x done · d delete · m move · c completed · ? help · q quit".to_string()
        }
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode_text),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(hints),
    ]);

    f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}
