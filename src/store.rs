//! Persistence boundary: a key-value preference store holding the layout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::codec::DashboardItem;
use crate::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Where the engine loads and saves its layout.
pub trait LayoutStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> StoreResult<Option<Vec<DashboardItem>>>;

    fn save(&mut self, items: &[DashboardItem]) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    items: Option<Vec<DashboardItem>>,
    writes: usize,
    fail_writes: bool,
}

/// In-process store. Clones share state so a host (or test) can keep a
/// handle after giving one to the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<DashboardItem>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state.items = Some(items);
        }
        store
    }

    pub fn items(&self) -> Option<Vec<DashboardItem>> {
        self.state.lock().ok().and_then(|state| state.items.clone())
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.state.lock().map(|state| state.writes).unwrap_or(0)
    }

    /// Make subsequent saves fail, simulating an unavailable backend.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_writes = fail;
        }
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Vec<DashboardItem>>> {
        let state = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(state.items.clone())
    }

    fn save(&mut self, items: &[DashboardItem]) -> StoreResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        if state.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        state.items = Some(items.to_vec());
        state.writes += 1;
        Ok(())
    }
}

/// Stores the layout as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const DEFAULT_KEY: &'static str = "dashboard_layout";

    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<Vec<DashboardItem>>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, items: &[DashboardItem]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_shares_state_between_clones() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.save(&[DashboardItem::left("dose", 0)]).unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.items(), Some(vec![DashboardItem::left("dose", 0)]));
    }

    #[test]
    fn memory_store_can_fail_writes() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.save(&[]).is_err());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn json_file_store_round_trips() {
        let dir = std::env::temp_dir().join(format!("dashgrid-store-{}", std::process::id()));
        let mut store = JsonFileStore::new(&dir, JsonFileStore::DEFAULT_KEY);
        let _ = fs::remove_file(store.path());
        assert!(store.load().unwrap().is_none());

        let items = vec![DashboardItem::full("chart", 0), DashboardItem::right("dose", 1)];
        store.save(&items).unwrap();
        assert_eq!(store.load().unwrap(), Some(items));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_file_store_reports_corrupt_files() {
        let dir = std::env::temp_dir().join(format!("dashgrid-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let store = JsonFileStore::new(&dir, "layout");
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Serde(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
