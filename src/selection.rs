use crate::place::PlaceResult;
use std::collections::HashSet;
use tracing::trace;

/// Results the user has picked out of the current list.
#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    selected: HashSet<PlaceResult>,
}

impl SelectionStore {
    pub fn new() -> Self {
        SelectionStore::default()
    }

    /// Adds `item` if it is not selected, removes it otherwise. Returns whether
    /// the item is selected afterwards.
    pub fn toggle(&mut self, item: &PlaceResult) -> bool {
        if self.selected.remove(item) {
            trace!("Deselected {:?}", item.name);
            false
        } else {
            trace!("Selected {:?}", item.name);
            self.selected.insert(item.clone());
            true
        }
    }

    /// Adds `item` without ever removing it. Returns `false` if it was
    /// already selected.
    pub fn select(&mut self, item: &PlaceResult) -> bool {
        if self.selected.contains(item) {
            return false;
        }
        trace!("Selected {:?}", item.name);
        self.selected.insert(item.clone())
    }

    pub fn contains(&self, item: &PlaceResult) -> bool {
        self.selected.contains(item)
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The members of `items` that are selected, in list order.
    pub fn selected_in_order<'a>(&self, items: &'a [PlaceResult]) -> Vec<&'a PlaceResult> {
        items.iter().filter(|item| self.contains(item)).collect()
    }
}
