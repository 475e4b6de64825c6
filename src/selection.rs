//! Which list the user is looking at.

use crate::model::{List, ListId};

/// List shown when nothing has been selected yet.
pub const DEFAULT_LIST: ListId = 1;

/// The currently selected list, passed to whatever needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSelection {
    selected: Option<ListId>,
}

impl ListSelection {
    /// A selection pointing at `id`.
    #[must_use]
    pub fn of(id: ListId) -> Self {
        Self { selected: Some(id) }
    }

    /// Selects a list.
    pub fn select(&mut self, id: ListId) {
        self.selected = Some(id);
    }

    /// The explicitly selected list, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ListId> {
        self.selected
    }

    /// The selected list, falling back to [`DEFAULT_LIST`].
    #[must_use]
    pub fn effective(&self) -> ListId {
        self.selected.unwrap_or(DEFAULT_LIST)
    }

    /// The selected list among `lists`, or `None` if it no longer exists.
    #[must_use]
    pub fn resolve<'a>(&self, lists: &'a [List]) -> Option<&'a List> {
        let id = self.effective();
        lists.iter().find(|l| l.id == id)
    }
}
