pub mod kv;

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::board::TaskBoard;
pub use kv::{FileKvStore, KvStore, TASKS_KEY};
#[cfg(test)]
pub use kv::MemoryKvStore;

/// Default data directory
/// Linux: ~/.local/share/eisen
/// macOS: ~/Library/Application Support/eisen
/// Windows: %APPDATA%\eisen
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eisen")
}

/// Load the board; unreadable storage counts as "no prior state"
pub fn load_board(store: &dyn KvStore) -> TaskBoard {
    let raw = match store.get(TASKS_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "could not read stored tasks, starting empty");
            None
        }
    };

    let board = TaskBoard::deserialize(raw.as_deref());
    if board.is_empty() {
        info!("no stored tasks");
    } else {
        info!(tasks = board.len(), "loaded board");
    }
    board
}

/// Rewrite the full document
pub fn save_board(store: &mut dyn KvStore, board: &TaskBoard) -> Result<()> {
    store.set(TASKS_KEY, &board.serialize())
}
