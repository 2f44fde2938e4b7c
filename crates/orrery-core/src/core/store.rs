use crate::api::types::BodyId;

/// Snapshot of what the pointer is over and what is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub hovered: Option<BodyId>,
    pub selected: Option<BodyId>,
}

/// Tiny observable store for hover/selection state.
/// The simulation writes, the UI overlay reads the latest snapshot and
/// compares versions to decide whether to re-render the tooltip.
#[derive(Debug, Default)]
pub struct SelectionStore {
    current: Selection,
    version: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hovered(&mut self, id: Option<BodyId>) {
        if self.current.hovered != id {
            self.current.hovered = id;
            self.version += 1;
        }
    }

    pub fn set_selected(&mut self, id: Option<BodyId>) {
        if self.current.selected != id {
            self.current.selected = id;
            self.version += 1;
        }
    }

    pub fn snapshot(&self) -> Selection {
        self.current
    }

    /// Monotonic change counter. Bumped only on actual changes.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_bumps_on_change_only() {
        let mut store = SelectionStore::new();
        assert_eq!(store.version(), 0);

        store.set_hovered(Some(BodyId(2)));
        assert_eq!(store.version(), 1);

        // Same value again — no bump
        store.set_hovered(Some(BodyId(2)));
        assert_eq!(store.version(), 1);

        store.set_hovered(None);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn hover_and_selection_are_independent() {
        let mut store = SelectionStore::new();
        store.set_selected(Some(BodyId(4)));
        store.set_hovered(Some(BodyId(1)));

        let snap = store.snapshot();
        assert_eq!(snap.selected, Some(BodyId(4)));
        assert_eq!(snap.hovered, Some(BodyId(1)));
    }
}
