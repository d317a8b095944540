//! Change notifications emitted by the grid store
//!
//! Listeners run synchronously after a mutation has committed, so they
//! always observe the final state of the edit that triggered them.

use serde::Serialize;

use crate::models::ItemId;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// Sections were added, removed, reordered or edited (cells follow)
    SectionsChanged,
    /// Lines were added, removed, reordered or edited
    LinesChanged,
    /// Text of one intersection changed
    #[serde(rename_all = "camelCase")]
    CellChanged { line_id: ItemId, section_id: ItemId },
    SettingsChanged,
    /// Contents replaced by an import
    Replaced,
    /// Contents cleared
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GridEvent) + Send>;

/// Ordered list of listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GridEvent) + Send + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &GridEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
