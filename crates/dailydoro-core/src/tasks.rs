//! Daily task checklist with a fixed number of slots.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::{load_json_array, save_json, KvStore, TASKS_KEY};

/// Number of checklist slots.
pub const TASK_SLOTS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, alias = "done")]
    pub completed: bool,
}

impl TaskEntry {
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    slots: [TaskEntry; TASK_SLOTS],
}

impl TaskList {
    /// Load persisted slots. Extra entries are dropped; missing, `null` or
    /// malformed ones load blank without affecting their neighbours.
    pub fn load(store: &impl KvStore) -> Self {
        let saved = load_json_array::<TaskEntry>(store, TASKS_KEY);
        let mut list = Self::default();
        for (slot, entry) in list.slots.iter_mut().zip(saved) {
            if let Some(entry) = entry {
                *slot = entry;
            }
        }
        list
    }

    pub fn slots(&self) -> &[TaskEntry] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&TaskEntry> {
        self.slots.get(index)
    }

    /// Replace slot `index` and persist all slots.
    pub fn update(
        &mut self,
        store: &impl KvStore,
        index: usize,
        description: impl Into<String>,
        completed: bool,
    ) -> Result<(), ValidationError> {
        let slot = self.slot_mut(index)?;
        slot.description = description.into();
        slot.completed = completed;
        self.persist(store);
        Ok(())
    }

    pub fn set_description(
        &mut self,
        store: &impl KvStore,
        index: usize,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.slot_mut(index)?.description = description.into();
        self.persist(store);
        Ok(())
    }

    pub fn set_completed(
        &mut self,
        store: &impl KvStore,
        index: usize,
        completed: bool,
    ) -> Result<(), ValidationError> {
        self.slot_mut(index)?.completed = completed;
        self.persist(store);
        Ok(())
    }

    /// Blank every slot.
    pub fn clear(&mut self, store: &impl KvStore) {
        self.slots = Default::default();
        self.persist(store);
    }

    pub fn completed_count(&self) -> usize {
        self.slots.iter().filter(|t| t.completed).count()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut TaskEntry, ValidationError> {
        self.slots
            .get_mut(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "tasks".to_string(),
                index,
                len: TASK_SLOTS,
            })
    }

    fn persist(&self, store: &impl KvStore) {
        save_json(store, TASKS_KEY, &self.slots[..]);
    }
}
