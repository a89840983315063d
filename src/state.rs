//! View state persisted between sessions
use crate::app::{App, Pane};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STATE_FILE_NAME: &str = "state.json";

/// What the user was looking at when they quit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub focused_pane: Pane,
    pub show_completed: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            focused_pane: Pane::Quadrant(crate::models::Quadrant::UrgentImportant),
            show_completed: false,
        }
    }
}

/// `<data_dir>/state.json`
pub fn state_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_FILE_NAME)
}

pub fn extract_state(app: &App) -> ViewState {
    ViewState {
        focused_pane: app.focused_pane,
        show_completed: app.show_completed,
    }
}

pub fn save_state(path: &Path, state: &ViewState) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))?;

    Ok(())
}

/// None when no state was saved yet; a corrupt file is an error
pub fn load_state(path: &Path) -> Result<Option<ViewState>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let state: ViewState = serde_json::from_str(&content)
        .with_context(|| format!("invalid view state {}", path.display()))?;

    Ok(Some(state))
}

pub fn apply_state(app: &mut App, state: ViewState) {
    app.show_completed = state.show_completed;
    // The completed pane can only hold focus while it is shown
    if state.focused_pane == Pane::Completed && !state.show_completed {
        return;
    }
    app.focused_pane = state.focused_pane;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::NotificationLevel;
    use crate::config::Config;
    use crate::models::Quadrant;
    use tempfile::TempDir;

    #[test]
    fn test_state_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = state_file_path(dir.path());

        let mut app = test_app();
        app.toggle_completed_visibility();
        app.focus_pane(Pane::Completed);
        save_state(&path, &extract_state(&app)).unwrap();

        let mut restored = test_app();
        apply_state(&mut restored, load_state(&path).unwrap().unwrap());
        assert!(restored.show_completed);
        assert_eq!(restored.focused_pane, Pane::Completed);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = TempDir::new().unwrap();
        let path = state_file_path(dir.path());
        assert_eq!(load_state(&path).unwrap(), None);

        std::fs::write(&path, "{not json").unwrap();
        assert!(load_state(&path).is_err());
    }

    #[test]
    fn test_hidden_completed_pane_not_focused() {
        let mut app = test_app();
        apply_state(
            &mut app,
            ViewState {
                focused_pane: Pane::Completed,
                show_completed: false,
            },
        );
        assert_eq!(app.focused_pane, Pane::Quadrant(Quadrant::UrgentImportant));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = state_file_path(dir.path());
        std::fs::write(&path, r#"{"focused_pane":{"Quadrant":"q3"}}"#).unwrap();

        let state = load_state(&path).unwrap().unwrap();
        assert_eq!(state.focused_pane, Pane::Quadrant(Quadrant::NotUrgentImportant));
        assert!(!state.show_completed);
    }

    #[test]
    fn test_config_visibility_applies_until_state_saved() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            show_completed: true,
            ..Config::default()
        };

        let mut app = App::new(config.clone()).unwrap();
        assert!(app.show_completed);

        app.toggle_completed_visibility();
        save_state(&state_file_path(dir.path()), &extract_state(&app)).unwrap();
        let reopened = App::new(config).unwrap();
        assert!(!reopened.show_completed);
    }

    #[test]
    fn test_corrupt_state_warns_on_start() {
        let dir = TempDir::new().unwrap();
        std::fs::write(state_file_path(dir.path()), "{not json").unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let app = App::new(config).unwrap();
        let notification = app.notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(app.focused_pane, Pane::Quadrant(Quadrant::UrgentImportant));
    }
}
