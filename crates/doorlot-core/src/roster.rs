//! Persisted participant list and the working selection.

use std::sync::Arc;

use doorlot_state::{encode_json, keys, read_json, KvStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Participant, Result};

/// Participant list stored under [`keys::PEOPLE`].
pub struct Roster {
    store: Arc<dyn KvStore>,
}

impl Roster {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All participants in insertion order.
    pub fn list(&self) -> Result<Vec<Participant>> {
        Ok(read_json(self.store.as_ref(), keys::PEOPLE)?.unwrap_or_default())
    }

    /// Register a new participant.
    pub fn add(&self, name: &str) -> Result<Participant> {
        let participant = Participant::new(name)?;
        let mut people = self.list()?;
        people.push(participant.clone());
        self.save(&people)?;
        debug!(id = %participant.id, name = %participant.name, "participant added");
        Ok(participant)
    }

    /// Remove a participant. Returns `false` if the id was not registered.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut people = self.list()?;
        let before = people.len();
        people.retain(|p| p.id != id);
        if people.len() == before {
            return Ok(false);
        }
        self.save(&people)?;
        debug!(id = %id, "participant removed");
        Ok(true)
    }

    /// The saved selection, pruned of ids that have left the roster.
    pub fn load_selection(&self) -> Result<Selection> {
        let mut selection: Selection =
            read_json(self.store.as_ref(), keys::SELECTION)?.unwrap_or_default();
        selection.retain_known(&self.list()?);
        Ok(selection)
    }

    pub fn save_selection(&self, selection: &Selection) -> Result<()> {
        self.store.set(keys::SELECTION, encode_json(selection)?)?;
        Ok(())
    }

    fn save(&self, people: &[Participant]) -> Result<()> {
        self.store.set(keys::PEOPLE, encode_json(people)?)?;
        Ok(())
    }
}

/// Ordered set of selected participant ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every participant, in roster order.
    pub fn all(people: &[Participant]) -> Self {
        Self {
            ids: people.iter().map(|p| p.id.clone()).collect(),
        }
    }

    /// Select `id` if unselected, unselect it otherwise.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
    }

    /// Clear the selection if it already covers every participant,
    /// otherwise select everyone.
    pub fn toggle_all(&mut self, people: &[Participant]) {
        if self.covers(people) {
            self.ids.clear();
        } else {
            *self = Self::all(people);
        }
    }

    /// Drop ids that are no longer in the roster.
    pub fn retain_known(&mut self, people: &[Participant]) {
        self.ids.retain(|id| people.iter().any(|p| &p.id == id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn covers(&self, people: &[Participant]) -> bool {
        !people.is_empty() && people.iter().all(|p| self.contains(&p.id))
    }
}
