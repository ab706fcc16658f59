use crate::navigation::state::{ContentState, Mode};

/// Trail of states the user drilled down from.
///
/// Entries are owned snapshots, so later changes to the live state never
/// reach them. There is no depth limit: the trail lives for one session.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<ContentState>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stores a snapshot of `state`. Admin states are stored as the plain
    /// movies list so that going back never re-enters admin.
    pub fn push(&mut self, state: &ContentState) {
        let snapshot = if state.mode() == Mode::Admin {
            ContentState::movies()
        } else {
            state.clone()
        };
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<ContentState> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&ContentState> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ContentState] {
        &self.entries
    }
}
