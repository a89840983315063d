mod board;
pub mod dialogs;
mod help;
pub mod layout;
mod statusbar;

use crate::app::{App, Mode, Notification, NotificationLevel};
use layout::BoardLayout;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Draw one frame from the current board projection
pub fn render(f: &mut Frame, app: &App) {
    let view = app.view();
    let board_layout = BoardLayout::compute(f.area(), app.show_completed);

    statusbar::render_header(f, board_layout.header, &view);
    board::render(f, &board_layout, &view);
    statusbar::render_footer(f, board_layout.footer, app.mode, &view);

    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(f, dialog);
    }

    if app.mode == Mode::Help {
        help::render(f, f.area());
    }

    if let Some(notification) = &app.notification {
        render_notification(f, f.area(), notification);
    }
}

/// Notification bar over the top three rows
fn render_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let notification_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.min(3),
    };

    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", prefix),
            Style::default().fg(fg_color).bg(bg_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(notification.message.as_str(), Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    f.render_widget(Paragraph::new(content).block(block), notification_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{add, test_app, today};
    use crate::models::Quadrant;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_board_shows_placeholders() {
        let app = test_app();
        let screen = draw(&app);
        for q in Quadrant::ALL {
            assert!(screen.contains(q.label()), "missing {}", q.label());
        }
        assert!(screen.contains("Drag tasks that can wait here"));
        assert!(screen.contains("0 due today"));
    }

    #[test]
    fn test_task_row_shows_countdown() {
        let mut app = test_app();
        add(&mut app, "Call mom", today(), Quadrant::UrgentImportant);
        add(&mut app, "File taxes", today() - chrono::Duration::days(1), Quadrant::NotUrgentImportant);

        let screen = draw(&app);
        assert!(screen.contains("Call mom"));
        assert!(screen.contains("Due Today!"));
        assert!(screen.contains("Overdue!"));
        assert!(screen.contains("1 overdue"));
        assert!(!screen.contains("Drag important and urgent tasks here"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = test_app();
        app.mode = Mode::Help;
        assert!(draw(&app).contains("Keys (Esc or ? to close)"));

        app.mode = Mode::Normal;
        app.open_new_task_form();
        assert!(draw(&app).contains("New task"));
    }

    #[test]
    fn test_completed_row_shows_deadline_and_origin() {
        let mut app = test_app();
        let id = add(&mut app, "Old chore", today() + chrono::Duration::days(3), Quadrant::NotUrgentImportant);
        app.complete_task(&id);
        app.toggle_completed_visibility();

        let screen = draw(&app);
        assert!(screen.contains("Old chore"));
        assert!(screen.contains("2024-05-13"));
        assert!(!screen.contains("↩"));

        app.focus_pane(crate::app::Pane::Completed);
        assert!(draw(&app).contains("↩ Not Urgent & Important"));
    }
}
