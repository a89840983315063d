use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Key under which the task document is stored
pub const TASKS_KEY: &str = "eisenhowerTasks";

/// Durable string storage addressed by key
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(file = %path.display(), "no stored value");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(key);
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

        info!(file = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

/// In-process store, nothing survives the session
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path());
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = TempDir::new().unwrap();
        let mut store = FileKvStore::new(dir.path().join("nested"));

        store.set(TASKS_KEY, "{\"q1\": []}").unwrap();
        store.set(TASKS_KEY, "{}").unwrap();

        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("{}"));
        assert!(store.path_for(TASKS_KEY).ends_with("eisenhowerTasks.json"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryKvStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
