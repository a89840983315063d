use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::dialogs::quadrant_color;
use super::layout::{self, BoardLayout};
use crate::board::Countdown;
use crate::view::{BoardView, CompletedView, QuadrantBody, QuadrantView, TaskRow};

/// Draw the four quadrants and, if visible, the completed list
pub fn render(f: &mut Frame, board_layout: &BoardLayout, view: &BoardView) {
    for quadrant in &view.quadrants {
        render_quadrant(f, board_layout.quadrants[quadrant.quadrant.index()], quadrant);
    }

    if let (Some(area), Some(completed)) = (board_layout.completed, view.completed.as_ref()) {
        render_completed(f, area, completed);
    }
}

fn pane_block(title: String, accent: Color, focused: bool, highlight: bool) -> Block<'static> {
    let (border_color, title_style) = if highlight {
        (
            Color::Yellow,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if focused {
        (
            Color::White,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(accent))
    };

    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_type(if highlight { BorderType::Double } else { BorderType::Rounded })
}

fn render_quadrant(f: &mut Frame, area: Rect, quadrant: &QuadrantView) {
    let title = format!(" {} ({}) ", quadrant.title, quadrant.count);
    let block = pane_block(
        title,
        quadrant_color(quadrant.quadrant),
        quadrant.focused,
        quadrant.drop_target,
    );

    let rows = match &quadrant.body {
        QuadrantBody::Placeholder(message) => {
            let placeholder = Paragraph::new(*message)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            f.render_widget(placeholder, area);
            return;
        }
        QuadrantBody::Rows(rows) => rows,
    };

    let inner = layout::list_area(area);
    let offset = layout::scroll_offset(quadrant.selected, inner.height);
    let items: Vec<ListItem> = rows
        .iter()
        .skip(offset)
        .map(|row| task_item(row, inner.width))
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn countdown_style(countdown: &Countdown) -> Style {
    match countdown {
        Countdown::Overdue => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Countdown::DueToday => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Countdown::Upcoming { .. } if countdown.days_remaining().is_some_and(|d| d <= 2) => {
            Style::default().fg(Color::LightYellow)
        }
        Countdown::Upcoming { .. } => Style::default().fg(Color::Gray),
    }
}

fn task_item(row: &TaskRow, width: u16) -> ListItem<'static> {
    let label = row.countdown.label();
    let deadline = row.deadline.format("%Y-%m-%d").to_string();

    let marker = if row.dragging {
        Span::styled("⇅ ", Style::default().fg(Color::Yellow))
    } else if row.editing {
        Span::styled("✎ ", Style::default().fg(Color::Cyan))
    } else if row.selected {
        Span::styled("▶ ", Style::default().fg(Color::White))
    } else {
        Span::raw("  ")
    };

    // marker + text + gap + deadline + gap + label
    let reserved = 2 + 1 + deadline.chars().count() + 1 + label.chars().count();
    let text_width = (width as usize).saturating_sub(reserved + 1);
    let text = truncate(&row.text, text_width);
    let padding = text_width.saturating_sub(text.chars().count());

    let style = if row.selected {
        Style::default()
            .bg(Color::Rgb(41, 98, 218))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if row.dragging {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        marker,
        Span::raw(text),
        Span::raw(" ".repeat(padding + 1)),
        Span::styled(deadline, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(label, countdown_style(&row.countdown)),
    ]))
    .style(style)
}

fn render_completed(f: &mut Frame, area: Rect, completed: &CompletedView) {
    let title = format!(" Completed ({}) ", completed.rows.len());
    let mut block = pane_block(title, Color::Gray, completed.focused, false);
    if let Some(row) = completed.selected.and_then(|i| completed.rows.get(i)) {
        // Where `r` would send the selected task
        block = block.title_bottom(
            Line::from(format!(" ↩ {} ", row.original.label()))
                .style(Style::default().fg(quadrant_color(row.original)))
                .right_aligned(),
        );
    }

    if completed.rows.is_empty() {
        let placeholder = Paragraph::new("No completed tasks yet")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
        f.render_widget(placeholder, area);
        return;
    }

    let inner = layout::list_area(area);
    let offset = layout::scroll_offset(completed.selected, inner.height);
    let items: Vec<ListItem> = completed
        .rows
        .iter()
        .skip(offset)
        .map(|row| {
            let text_width = (inner.width as usize).saturating_sub(16);
            let style = if row.selected {
                Style::default()
                    .bg(Color::Rgb(41, 98, 218))
                    .fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::raw(if row.selected { "▶ " } else { "  " }),
                Span::styled("● ", Style::default().fg(quadrant_color(row.original))),
                Span::styled(
                    format!("{:<width$}", truncate(&row.text, text_width), width = text_width),
                    Style::default().add_modifier(Modifier::CROSSED_OUT),
                ),
                Span::styled(
                    format!("  {}", row.deadline.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("much too long", 5), "much…");
        assert_eq!(truncate("anything", 0), "");
    }
}
