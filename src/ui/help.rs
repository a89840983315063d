use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::dialogs::centered_rect;

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(description.to_string()),
    ])
}

/// Key help overlay
pub fn render(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys (Esc or ? to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(inner);

    let navigation = vec![
        heading("Navigation"),
        Line::from(""),
        binding("j, ↓", "next task"),
        binding("k, ↑", "previous task"),
        binding("h, ←", "left quadrant"),
        binding("l, →", "right quadrant"),
        binding("J", "less urgent row"),
        binding("K", "more urgent row"),
        binding("1-4", "jump to quadrant"),
        binding("Tab", "next pane"),
        binding("Shift-Tab", "previous pane"),
    ];

    let tasks = vec![
        heading("Tasks"),
        Line::from(""),
        binding("a, n", "add task"),
        binding("e, Enter", "edit task"),
        binding("x, Space", "complete / restore"),
        binding("r", "restore completed"),
        binding("d", "delete task"),
        binding("m", "pick up to move"),
        binding("c", "show / hide completed"),
        binding("R", "reload from disk"),
        binding("q", "quit"),
    ];

    let other = vec![
        heading("Moving"),
        Line::from(""),
        binding("h j k l", "choose target"),
        binding("1-4", "target quadrant"),
        binding("Enter, m", "drop"),
        binding("Esc", "cancel"),
        binding("mouse", "drag a row onto a quadrant"),
        Line::from(""),
        heading("Form"),
        Line::from(""),
        binding("Tab", "next field"),
        binding("Enter", "save"),
        binding("Esc", "cancel"),
        binding("Ctrl-U", "clear field"),
        Line::from("Deadline: YYYY-MM-DD, today,"),
        Line::from("tomorrow or +N days"),
    ];

    let nav_widget = Paragraph::new(navigation)
        .block(Block::default().borders(Borders::RIGHT))
        .wrap(Wrap { trim: false });
    let task_widget = Paragraph::new(tasks)
        .block(Block::default().borders(Borders::RIGHT))
        .wrap(Wrap { trim: false });
    let other_widget = Paragraph::new(other).wrap(Wrap { trim: false });

    f.render_widget(nav_widget, columns[0]);
    f.render_widget(task_widget, columns[1]);
    f.render_widget(other_widget, columns[2]);
}
