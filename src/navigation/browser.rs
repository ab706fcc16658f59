use crate::navigation::codec::Location;

/// The browser's native history as seen by the controller.
pub trait BrowserHistory {
    fn location(&self) -> Location;

    /// Replaces the current entry without adding a new one.
    fn replace(&mut self, url: &str);

    /// Native back. Returns `false` when there is no earlier entry. The
    /// resulting location is reported through
    /// [`NavigationController::handle_pop_state`](crate::navigation::NavigationController::handle_pop_state).
    fn back(&mut self) -> bool;
}

/// In-memory history used by the terminal session and tests.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    replacements: usize,
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![initial_url.to_string()],
            cursor: 0,
            replacements: 0,
        }
    }

    /// Adds an entry the way a link click outside the app would.
    pub fn push(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor = self.entries.len() - 1;
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }

    pub fn current_url(&self) -> &str {
        &self.entries[self.cursor]
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl BrowserHistory for MemoryHistory {
    fn location(&self) -> Location {
        Location::parse(self.current_url())
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.cursor] = url.to_string();
        self.replacements += 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}
