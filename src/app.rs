use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::board::{BoardError, BoardStats, Location, TaskBoard};
use crate::config::Config;
use crate::fs::{self, FileKvStore, KvStore};
use crate::input::form::{self, FormKind, TaskForm};
use crate::input::session::Session;
use crate::models::{Quadrant, TaskId};
use crate::ui::dialogs::{ConfirmAction, DialogType};
use crate::view::{BoardView, ViewContext};

/// Notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient message shown at the top of the screen
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// Notifications disappear after 3 seconds
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigate and act on the selected task
    Normal,
    /// A task is picked up and follows the focus until dropped
    Drag,
    /// Form or confirmation dialog open
    Dialog,
    /// Key help overlay
    Help,
}

/// A focusable list on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    Quadrant(Quadrant),
    Completed,
}

impl Pane {
    fn cycle(show_completed: bool) -> Vec<Pane> {
        let mut panes: Vec<Pane> = Quadrant::ALL.into_iter().map(Pane::Quadrant).collect();
        if show_completed {
            panes.push(Pane::Completed);
        }
        panes
    }

    pub fn quadrant(self) -> Option<Quadrant> {
        match self {
            Pane::Quadrant(q) => Some(q),
            Pane::Completed => None,
        }
    }
}

/// Application state and the interaction controller
pub struct App {
    /// Canonical task state
    pub board: TaskBoard,
    /// Counters derived from `board` at `today`
    pub stats: BoardStats,
    /// Local date used for countdowns, refreshed by the periodic tick
    pub today: NaiveDate,
    /// Current drag / edit session
    pub session: Session,
    pub mode: Mode,
    /// Dialog currently shown
    pub dialog: Option<DialogType>,
    pub focused_pane: Pane,
    /// Selected row per pane
    pub selected_task_index: HashMap<Pane, usize>,
    pub show_completed: bool,
    pub notification: Option<Notification>,
    pub config: Config,
    /// Where view state is saved on quit (None in tests)
    pub state_path: Option<PathBuf>,
    store: Box<dyn KvStore>,
    last_tick: Instant,
}

impl App {
    /// Create the application backed by the configured data directory
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir();
        let store = FileKvStore::new(&data_dir);
        let today = chrono::Local::now().date_naive();

        let mut app = Self::with_store(config, Box::new(store), today);
        let state_path = crate::state::state_file_path(&data_dir);
        match crate::state::load_state(&state_path) {
            Ok(Some(state)) => crate::state::apply_state(&mut app, state),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "ignoring saved view state");
                app.show_notification(
                    "Saved view state was unreadable, using defaults".to_string(),
                    NotificationLevel::Warning,
                );
            }
        }
        app.state_path = Some(state_path);

        info!(
            data_dir = %data_dir.display(),
            tasks = app.board.len(),
            today = %today,
            "app started"
        );
        Ok(app)
    }

    /// Create the application on top of an arbitrary store
    pub fn with_store(config: Config, store: Box<dyn KvStore>, today: NaiveDate) -> Self {
        let board = fs::load_board(store.as_ref());
        let stats = BoardStats::compute(&board, today);
        let show_completed = config.show_completed;

        Self {
            board,
            stats,
            today,
            session: Session::new(),
            mode: Mode::Normal,
            dialog: None,
            focused_pane: Pane::Quadrant(Quadrant::UrgentImportant),
            selected_task_index: HashMap::new(),
            show_completed,
            notification: None,
            config,
            state_path: None,
            store,
            last_tick: Instant::now(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }

    /// Handle keyboard input; false means quit
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        crate::input::handle_key_input(self, key)
    }

    pub fn handle_mouse(&mut self, event: crossterm::event::MouseEvent, area: ratatui::layout::Rect) {
        crate::input::handle_mouse_input(self, event, area)
    }

    /// Project the current state for drawing
    pub fn view(&self) -> BoardView {
        BoardView::project(
            &self.board,
            &self.stats,
            &ViewContext {
                today: self.today,
                session: &self.session,
                focused_pane: self.focused_pane,
                selected: &self.selected_task_index,
                show_completed: self.show_completed,
            },
        )
    }

    // ===== notifications =====

    pub fn show_notification(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    pub fn clear_expired_notification(&mut self) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired()) {
            self.notification = None;
        }
    }

    // ===== periodic re-derivation =====

    /// Called on every loop iteration; re-reads the date once per refresh interval
    pub fn tick(&mut self, now: Instant) {
        self.clear_expired_notification();
        if now.duration_since(self.last_tick) >= self.config.refresh_interval() {
            self.last_tick = now;
            self.on_tick(chrono::Local::now().date_naive());
        }
    }

    /// Recompute everything that depends on the current date
    pub fn on_tick(&mut self, today: NaiveDate) {
        if today != self.today {
            info!(from = %self.today, to = %today, "day rolled over");
        }
        self.today = today;
        self.stats = BoardStats::compute(&self.board, today);
    }

    // ===== mutation plumbing =====

    /// Run a board operation; on success persist, then re-derive statistics
    fn mutate<T>(&mut self, op: impl FnOnce(&mut TaskBoard) -> Result<T, BoardError>) -> Option<T> {
        match op(&mut self.board) {
            Ok(value) => {
                self.after_mutation();
                Some(value)
            }
            Err(BoardError::Validation(e)) => {
                self.show_notification(e.to_string(), NotificationLevel::Error);
                None
            }
            Err(BoardError::NotFound(id)) => {
                self.handle_not_found(&id);
                None
            }
        }
    }

    fn after_mutation(&mut self) {
        self.persist();
        self.stats = BoardStats::compute(&self.board, self.today);
        self.clamp_selections();
    }

    /// Rewrite the full task document
    fn persist(&mut self) {
        if let Err(e) = fs::save_board(self.store.as_mut(), &self.board) {
            error!(error = %e, "failed to save tasks");
            self.show_notification(format!("Failed to save tasks: {}", e), NotificationLevel::Error);
        }
    }

    /// The view and the board disagree about a task; skip the operation
    fn handle_not_found(&mut self, id: &TaskId) {
        error!(id = %id, "operation on unknown task ignored");
        if cfg!(debug_assertions) {
            self.show_notification(
                format!("Internal error: task {} not found", id),
                NotificationLevel::Error,
            );
        }
    }

    // ===== focus & selection =====

    pub fn pane_len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Quadrant(q) => self.board.tasks_in(q).len(),
            Pane::Completed => self.board.completed().len(),
        }
    }

    /// Selected row of a pane, clamped to its length
    pub fn selected_index(&self, pane: Pane) -> usize {
        let index = self.selected_task_index.get(&pane).copied().unwrap_or(0);
        index.min(self.pane_len(pane).saturating_sub(1))
    }

    pub fn select(&mut self, pane: Pane, index: usize) {
        self.selected_task_index.insert(pane, index);
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let pane = self.focused_pane;
        let index = self.selected_index(pane);
        let tasks = match pane {
            Pane::Quadrant(q) => self.board.tasks_in(q),
            Pane::Completed => self.board.completed(),
        };
        tasks.get(index).map(|t| t.id.clone())
    }

    fn clamp_selections(&mut self) {
        let panes: Vec<Pane> = self.selected_task_index.keys().copied().collect();
        for pane in panes {
            let clamped = self.selected_index(pane);
            self.selected_task_index.insert(pane, clamped);
        }
    }

    pub fn focus_pane(&mut self, pane: Pane) {
        if pane == Pane::Completed && !self.show_completed {
            return;
        }
        self.focused_pane = pane;
    }

    pub fn focus_next(&mut self, forward: bool) {
        let panes = Pane::cycle(self.show_completed);
        let current = panes.iter().position(|p| *p == self.focused_pane).unwrap_or(0);
        let next = if forward {
            (current + 1) % panes.len()
        } else {
            (current + panes.len() - 1) % panes.len()
        };
        self.focused_pane = panes[next];
    }

    pub fn select_next(&mut self) {
        let pane = self.focused_pane;
        let len = self.pane_len(pane);
        if len > 0 {
            let index = (self.selected_index(pane) + 1).min(len - 1);
            self.select(pane, index);
        }
    }

    pub fn select_prev(&mut self) {
        let pane = self.focused_pane;
        let index = self.selected_index(pane).saturating_sub(1);
        self.select(pane, index);
    }

    /// Focus the pane holding `id` and select its row
    fn focus_task(&mut self, id: &TaskId) {
        let pane = match self.board.locate(id) {
            Some(Location::Active(q)) => Pane::Quadrant(q),
            Some(Location::Completed) if self.show_completed => Pane::Completed,
            _ => return,
        };
        let tasks = match pane {
            Pane::Quadrant(q) => self.board.tasks_in(q),
            Pane::Completed => self.board.completed(),
        };
        if let Some(index) = tasks.iter().position(|t| &t.id == id) {
            self.focused_pane = pane;
            self.select(pane, index);
        }
    }

    // ===== forms =====

    /// Open the new-task form, preselecting the focused quadrant
    pub fn open_new_task_form(&mut self) {
        self.close_dialog();
        let quadrant = self
            .focused_pane
            .quadrant()
            .unwrap_or(Quadrant::UrgentImportant);
        self.dialog = Some(DialogType::TaskForm(TaskForm::create(quadrant)));
        self.mode = Mode::Dialog;
    }

    /// Open the edit form for `id`, closing any other editor first
    pub fn open_edit_form(&mut self, id: TaskId) {
        let Some(task) = self.board.get(&id).cloned() else {
            self.handle_not_found(&id);
            return;
        };

        // Replacing the form; begin_edit closes the previous editor
        self.dialog = None;
        if let Some(previous) = self.session.begin_edit(id) {
            debug!(id = %previous.task, "closed previous editor");
        }
        self.dialog = Some(DialogType::TaskForm(TaskForm::edit(&task)));
        self.mode = Mode::Dialog;
    }

    /// Close whatever dialog is open; an open editor is discarded
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.session.end_edit();
        if self.mode == Mode::Dialog {
            self.mode = Mode::Normal;
        }
    }

    /// Validate the open form and apply it to the board
    pub fn submit_form(&mut self) {
        let Some(DialogType::TaskForm(form)) = self.dialog.as_mut() else {
            return;
        };

        let draft = match form.validate(self.today) {
            Ok(draft) => draft,
            Err(e) => {
                form.flash(form::field_for(&e), Instant::now());
                debug!(error = %e, "task form rejected");
                self.show_notification(e.to_string(), NotificationLevel::Error);
                return;
            }
        };
        let kind = form.kind.clone();

        match kind {
            FormKind::Create => {
                let created = self.mutate(|board| {
                    board.create(&draft.text, Some(draft.deadline), draft.quadrant)
                });
                if let Some(task) = created {
                    self.close_dialog();
                    self.focus_task(&task.id);
                    self.show_notification(
                        format!("Added to {}", task.quadrant.label()),
                        NotificationLevel::Success,
                    );
                }
            }
            FormKind::Edit(id) => {
                let edited = self.mutate(|board| board.edit(&id, &draft.text, Some(draft.deadline)));
                match edited {
                    Some(_) => {
                        self.close_dialog();
                        self.show_notification("Task updated".to_string(), NotificationLevel::Success);
                    }
                    // Task vanished underneath the editor
                    None if !self.board.contains(&id) => self.close_dialog(),
                    None => {}
                }
            }
        }
    }

    // ===== task actions =====

    pub fn complete_task(&mut self, id: &TaskId) {
        if self.mutate(|board| board.complete(id)).is_some() {
            self.show_notification("Task completed".to_string(), NotificationLevel::Success);
        }
    }

    pub fn restore_task(&mut self, id: &TaskId) {
        if let Some(quadrant) = self.mutate(|board| board.restore(id)) {
            self.focus_task(id);
            self.show_notification(
                format!("Restored to {}", quadrant.label()),
                NotificationLevel::Info,
            );
        }
    }

    /// Complete in a quadrant, restore in the completed list
    pub fn toggle_complete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.focused_pane {
            Pane::Quadrant(_) => self.complete_task(&id),
            Pane::Completed => self.restore_task(&id),
        }
    }

    pub fn restore_selected(&mut self) {
        if self.focused_pane != Pane::Completed {
            return;
        }
        if let Some(id) = self.selected_task_id() {
            self.restore_task(&id);
        }
    }

    /// Ask for confirmation (if configured) before deleting
    pub fn request_delete(&mut self, id: TaskId) {
        if !self.config.confirm_delete {
            self.delete_task(&id);
            return;
        }
        let Some(task) = self.board.get(&id) else {
            self.handle_not_found(&id);
            return;
        };

        let message = format!("Delete \"{}\"?\nThis cannot be undone.", task.text);
        self.close_dialog();
        self.dialog = Some(DialogType::Confirm {
            title: "Delete task".to_string(),
            message,
            yes_selected: false,
            action: ConfirmAction::DeleteTask(id),
        });
        self.mode = Mode::Dialog;
    }

    pub fn delete_task(&mut self, id: &TaskId) {
        if self.mutate(|board| board.delete(id)).is_some() {
            self.show_notification("Task deleted".to_string(), NotificationLevel::Info);
        }
    }

    /// Answer the open confirmation dialog
    pub fn answer_confirm(&mut self, confirmed: bool) {
        let dialog = self.dialog.take();
        self.close_dialog();
        if !confirmed {
            return;
        }
        if let Some(DialogType::Confirm { action, .. }) = dialog {
            match action {
                ConfirmAction::DeleteTask(id) => self.delete_task(&id),
            }
        }
    }

    // ===== drag & drop =====

    /// Pick up an active task
    pub fn start_drag(&mut self, id: TaskId) {
        match self.board.locate(&id) {
            Some(Location::Active(origin)) => {
                debug!(id = %id, from = %origin, "drag started");
                self.session.begin_drag(id, origin);
                self.mode = Mode::Drag;
            }
            Some(Location::Completed) => {}
            None => self.handle_not_found(&id),
        }
    }

    pub fn drag_over(&mut self, target: Quadrant) {
        if self.session.dragging().is_some() {
            self.session.hover(target);
            self.focused_pane = Pane::Quadrant(target);
        }
    }

    /// Drop the dragged task on its current target
    pub fn drop_drag(&mut self) {
        self.mode = Mode::Normal;
        let Some(drag) = self.session.take_drag() else {
            return;
        };

        if drag.target != drag.origin {
            let target = drag.target;
            self.mutate(|board| board.move_task(&drag.task, target));
        }
        self.focus_task(&drag.task);
    }

    /// Abandon the drag without moving anything
    pub fn cancel_drag(&mut self) {
        self.mode = Mode::Normal;
        if let Some(drag) = self.session.take_drag() {
            debug!(id = %drag.task, "drag cancelled");
            self.focus_task(&drag.task);
        }
    }

    // ===== view toggles =====

    pub fn toggle_completed_visibility(&mut self) {
        self.show_completed = !self.show_completed;
        if !self.show_completed && self.focused_pane == Pane::Completed {
            self.focused_pane = Pane::Quadrant(Quadrant::UrgentImportant);
        }
    }

    /// Re-read the board from storage, dropping any in-flight session
    pub fn reload(&mut self) {
        let raw = match self.store.get(fs::TASKS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "failed to read stored tasks");
                self.show_notification(format!("Failed to reload: {}", e), NotificationLevel::Error);
                return;
            }
        };

        self.board.reload(raw.as_deref());
        self.session = Session::new();
        self.close_dialog();
        self.mode = Mode::Normal;
        self.stats = BoardStats::compute(&self.board, self.today);
        self.clamp_selections();
        self.show_notification(
            format!("Reloaded {} tasks", self.board.len()),
            NotificationLevel::Info,
        );
    }
}
