use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::grid::{CardId, GridPosition};

/// Opaque visual component supplied by the host.
///
/// A component has at most one visual parent at a time. The registry calls
/// `detach` before every `attach` to a different slot.
pub trait CardView: Send + Sync {
    /// Short label used by text previews.
    fn title(&self) -> &str;

    fn attach(&self, _slot: &GridPosition) {}

    fn detach(&self) {}
}

struct CardEntry {
    view: Arc<dyn CardView>,
    generation: u64,
    parent: Option<GridPosition>,
}

impl fmt::Debug for CardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardEntry")
            .field("title", &self.view.title())
            .field("generation", &self.generation)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Registry mapping card ids to their current component and parent slot.
#[derive(Debug, Default)]
pub struct CardRegistry {
    entries: HashMap<CardId, CardEntry>,
    next_generation: u64,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `view` under `id`, replacing any previous component. The
    /// replaced component is detached; grid placement is untouched.
    /// Returns true when an existing entry was replaced.
    pub fn register(&mut self, id: impl Into<CardId>, view: Arc<dyn CardView>) -> bool {
        self.next_generation = self.next_generation.wrapping_add(1);
        let entry = CardEntry {
            view,
            generation: self.next_generation,
            parent: None,
        };
        match self.entries.insert(id.into(), entry) {
            Some(previous) => {
                if previous.parent.is_some() {
                    previous.view.detach();
                }
                true
            }
            None => false,
        }
    }

    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn CardView>> {
        let entry = self.entries.remove(id)?;
        if entry.parent.is_some() {
            entry.view.detach();
        }
        Some(entry.view)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn CardView>> {
        self.entries.get(id).map(|entry| Arc::clone(&entry.view))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registration generation; changes whenever the component is swapped.
    pub fn generation(&self, id: &str) -> Option<u64> {
        self.entries.get(id).map(|entry| entry.generation)
    }

    pub fn parent_of(&self, id: &str) -> Option<GridPosition> {
        self.entries.get(id).and_then(|entry| entry.parent)
    }

    pub fn title_of(&self, id: &str) -> Option<String> {
        self.entries.get(id).map(|entry| entry.view.title().to_string())
    }

    /// Re-parent a component into `slot`. Attaching to the slot it already
    /// occupies is a no-op. Returns false for unknown ids.
    pub fn attach(&mut self, id: &str, slot: GridPosition) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if entry.parent == Some(slot) {
            return true;
        }
        if entry.parent.is_some() {
            entry.view.detach();
        }
        entry.view.attach(&slot);
        entry.parent = Some(slot);
        true
    }

    /// Detach every component whose id is not in `placed`.
    pub fn release_unplaced(&mut self, placed: &HashSet<&str>) {
        for (id, entry) in self.entries.iter_mut() {
            if entry.parent.is_some() && !placed.contains(id.as_str()) {
                entry.view.detach();
                entry.parent = None;
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
