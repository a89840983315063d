use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use std::time::{Duration as StdDuration, Instant};
use tui_textarea::{CursorMove, TextArea};

use crate::board::ValidationError;
use crate::models::{Quadrant, Task, TaskId};

/// How long an invalid field stays highlighted
pub const FLASH_DURATION: StdDuration = StdDuration::from_millis(500);

/// What the form will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Deadline,
    Quadrant,
}

/// Result of feeding a key to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

/// Validated form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub deadline: NaiveDate,
    pub quadrant: Quadrant,
}

/// New-task / edit-task form
pub struct TaskForm {
    pub kind: FormKind,
    pub quadrant: Quadrant,
    pub focus: FormField,
    text: TextArea<'static>,
    deadline: TextArea<'static>,
    flash: Option<(FormField, Instant)>,
}

impl TaskForm {
    pub fn create(quadrant: Quadrant) -> Self {
        Self::build(FormKind::Create, "", "", quadrant)
    }

    pub fn edit(task: &Task) -> Self {
        let deadline = task.deadline.format("%Y-%m-%d").to_string();
        Self::build(FormKind::Edit(task.id.clone()), &task.text, &deadline, task.quadrant)
    }

    fn build(kind: FormKind, text: &str, deadline: &str, quadrant: Quadrant) -> Self {
        let mut text_area = single_line(text);
        text_area.set_placeholder_text("What needs to be done?");
        let mut deadline_area = single_line(deadline);
        deadline_area.set_placeholder_text("YYYY-MM-DD, today, tomorrow, +3");

        let mut form = Self {
            kind,
            quadrant,
            focus: FormField::Text,
            text: text_area,
            deadline: deadline_area,
            flash: None,
        };
        form.show_cursor();
        form
    }

    /// Only the focused field draws a cursor
    fn show_cursor(&mut self) {
        let visible = Style::default().add_modifier(Modifier::REVERSED);
        let (text, deadline) = match self.focus {
            FormField::Text => (visible, Style::default()),
            FormField::Deadline => (Style::default(), visible),
            FormField::Quadrant => (Style::default(), Style::default()),
        };
        self.text.set_cursor_style(text);
        self.deadline.set_cursor_style(deadline);
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.kind, FormKind::Edit(_))
    }

    pub fn text_area(&self) -> &TextArea<'static> {
        &self.text
    }

    pub fn deadline_area(&self) -> &TextArea<'static> {
        &self.deadline
    }

    pub fn text_value(&self) -> String {
        self.text.lines().join(" ")
    }

    pub fn deadline_value(&self) -> String {
        self.deadline.lines().join("")
    }

    /// Fields reachable with Tab; the quadrant is chosen by dragging once a task exists
    fn fields(&self) -> &'static [FormField] {
        if self.is_edit() {
            &[FormField::Text, FormField::Deadline]
        } else {
            &[FormField::Text, FormField::Deadline, FormField::Quadrant]
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
        self.show_cursor();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormAction::Submit;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                return FormAction::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                return FormAction::Continue;
            }
            _ => {}
        }

        match self.focus {
            FormField::Text => edit_line(&mut self.text, key),
            FormField::Deadline => edit_line(&mut self.deadline, key),
            FormField::Quadrant => self.handle_quadrant_key(key),
        }
        FormAction::Continue
    }

    fn handle_quadrant_key(&mut self, key: KeyEvent) {
        let index = self.quadrant.index();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.quadrant = Quadrant::ALL[(index + 3) % 4];
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.quadrant = Quadrant::ALL[(index + 1) % 4];
            }
            KeyCode::Char(c @ '1'..='4') => {
                let digit = c as usize - '1' as usize;
                if let Some(q) = Quadrant::from_index(digit) {
                    self.quadrant = q;
                }
            }
            _ => {}
        }
    }

    /// Check the inputs; nothing is mutated here
    pub fn validate(&self, today: NaiveDate) -> Result<TaskDraft, ValidationError> {
        let text = self.text_value().trim().to_string();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let deadline = parse_deadline(&self.deadline_value(), today)?;
        Ok(TaskDraft {
            text,
            deadline,
            quadrant: self.quadrant,
        })
    }

    /// Highlight the field that failed validation
    pub fn flash(&mut self, field: FormField, now: Instant) {
        self.flash = Some((field, now));
        self.focus = field;
        self.show_cursor();
    }

    pub fn is_flashing(&self, field: FormField, now: Instant) -> bool {
        match self.flash {
            Some((flashed, at)) => flashed == field && now.duration_since(at) < FLASH_DURATION,
            None => false,
        }
    }
}

/// Field to blame for a validation error
pub fn field_for(error: &ValidationError) -> FormField {
    match error {
        ValidationError::EmptyText => FormField::Text,
        ValidationError::MissingDeadline | ValidationError::InvalidDeadline(_) => FormField::Deadline,
    }
}

/// Parse a deadline as typed by the user.
///
/// Accepts `YYYY-MM-DD`, `today`, `tomorrow` and `+N` / `+Nd` (N days from `today`).
pub fn parse_deadline(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDeadline);
    }

    let invalid = || ValidationError::InvalidDeadline(trimmed.to_string());
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return today.succ_opt().ok_or_else(invalid),
        _ => {}
    }

    if let Some(offset) = trimmed.strip_prefix('+') {
        let days: i64 = offset
            .trim_end_matches(['d', 'D'])
            .parse()
            .map_err(|_| invalid())?;
        return today
            .checked_add_signed(Duration::days(days))
            .ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}

fn single_line(value: &str) -> TextArea<'static> {
    let mut area = TextArea::new(vec![value.to_string()]);
    area.set_cursor_line_style(Style::default());
    area.set_placeholder_style(Style::default().fg(Color::DarkGray));
    area.move_cursor(CursorMove::End);
    area
}

fn edit_line(area: &mut TextArea<'static>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => {
            area.move_cursor(CursorMove::End);
            area.delete_line_by_head();
        }
        KeyCode::Char('a') if ctrl => area.move_cursor(CursorMove::Head),
        KeyCode::Char('e') if ctrl => area.move_cursor(CursorMove::End),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => area.insert_char(c),
        KeyCode::Backspace => {
            area.delete_char();
        }
        KeyCode::Delete => {
            area.delete_next_char();
        }
        KeyCode::Left => area.move_cursor(CursorMove::Back),
        KeyCode::Right => area.move_cursor(CursorMove::Forward),
        KeyCode::Home => area.move_cursor(CursorMove::Head),
        KeyCode::End => area.move_cursor(CursorMove::End),
        _ => {}
    }
}
