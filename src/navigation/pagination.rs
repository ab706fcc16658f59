//! Keyboard pagination ownership.
//!
//! Only one list view at a time receives page keys. A view registers its
//! handler when it becomes active and gets back an id; unregistering with a
//! stale id is ignored, so a view that was already replaced cannot remove
//! its successor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    First,
    Previous,
    Next,
    Last,
}

impl PageKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" | "home" => Some(PageKey::First),
            "prev" | "previous" | "left" => Some(PageKey::Previous),
            "next" | "right" => Some(PageKey::Next),
            "last" | "end" => Some(PageKey::Last),
            _ => None,
        }
    }
}

pub trait PaginationHandler {
    /// Page to show after `key` is pressed on page `current`, or `None` when
    /// the key does nothing.
    fn target_page(&self, key: PageKey, current: u32) -> Option<u32>;
}

/// Handler for a list with a known page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    total_pages: u32,
}

impl PageBounds {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages: total_pages.max(1),
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }
}

impl PaginationHandler for PageBounds {
    fn target_page(&self, key: PageKey, current: u32) -> Option<u32> {
        let last = self.total_pages.max(1);
        let current = current.clamp(1, last);
        let target = match key {
            PageKey::First => 1,
            PageKey::Previous => current.saturating_sub(1).max(1),
            PageKey::Next => current.saturating_add(1).min(last),
            PageKey::Last => last,
        };
        (target != current).then_some(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

#[derive(Default)]
pub struct PaginationRegistry {
    next_id: u64,
    active: Option<(RegistrationId, Box<dyn PaginationHandler>)>,
}

impl PaginationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `handler` the only receiver of page keys.
    pub fn register(&mut self, handler: impl PaginationHandler + 'static) -> RegistrationId {
        self.next_id += 1;
        let id = RegistrationId(self.next_id);
        self.active = Some((id, Box::new(handler)));
        id
    }

    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        match &self.active {
            Some((active, _)) if *active == id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_registered(&self, id: RegistrationId) -> bool {
        matches!(&self.active, Some((active, _)) if *active == id)
    }

    pub fn has_handler(&self) -> bool {
        self.active.is_some()
    }

    pub fn target_page(&self, key: PageKey, current: u32) -> Option<u32> {
        self.active
            .as_ref()
            .and_then(|(_, handler)| handler.target_page(key, current))
    }
}
