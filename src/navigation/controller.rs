use std::collections::HashSet;

use crate::{
    debug,
    navigation::{
        browser::BrowserHistory,
        codec,
        history::NavigationHistory,
        hydration::{Entity, EntitySource, HydrationOutcome, HydrationTarget},
        pagination::{PageKey, PaginationRegistry},
        state::{ContentState, Mode, MoviesFilters, NavItem, View},
    },
    warning,
};

/// Result of [`NavigationController::go_back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// A state was popped from the app's own trail.
    Restored,
    /// The trail was empty; the browser went back instead. The caller
    /// should follow up with [`NavigationController::handle_pop_state`].
    Native,
    /// Neither the trail nor the browser had anywhere to go. Nothing changed.
    Unavailable,
}

/// Owns the current [`ContentState`], the back trail and the URL sync.
///
/// The browser URL always mirrors the current state. It is replaced rather
/// than pushed; the app keeps its own trail in [`NavigationHistory`].
pub struct NavigationController<B: BrowserHistory> {
    browser: B,
    current: ContentState,
    history: NavigationHistory,
    nav_items: Vec<NavItem>,
    active_nav_item: Option<String>,
    in_flight: HashSet<HydrationTarget>,
    pagination: PaginationRegistry,
}

impl<B: BrowserHistory> NavigationController<B> {
    /// Starts from whatever the browser currently shows, or the movies list
    /// when the URL is not recognized.
    pub fn new(browser: B, nav_items: Vec<NavItem>) -> Self {
        let mut controller = Self {
            browser,
            current: ContentState::movies(),
            history: NavigationHistory::new(),
            nav_items,
            active_nav_item: None,
            in_flight: HashSet::new(),
            pagination: PaginationRegistry::new(),
        };

        let location = controller.browser.location();
        match codec::decode_location(&location) {
            Some(state) => controller.current = controller.complete_custom_nav(state),
            None => warning!(
                "Unrecognized start URL {}, showing movies",
                location.href()
            ),
        }
        controller.active_nav_item = controller.matching_nav_item(&controller.current);
        controller.sync_url();
        controller
    }

    pub fn current(&self) -> &ContentState {
        &self.current
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn active_nav_item(&self) -> Option<&str> {
        self.active_nav_item.as_deref()
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    /// Adds nav items loaded after start-up, replacing items with the same id.
    pub fn extend_nav_items(&mut self, items: impl IntoIterator<Item = NavItem>) {
        for item in items {
            self.nav_items.retain(|existing| existing.id != item.id);
            self.nav_items.push(item);
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut B {
        &mut self.browser
    }

    pub fn pagination(&self) -> &PaginationRegistry {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut PaginationRegistry {
        &mut self.pagination
    }

    /// Shows `state`. Drill-downs must call [`push_current`](Self::push_current)
    /// first, or use [`drill_down`](Self::drill_down).
    pub fn navigate_to(&mut self, state: ContentState) {
        debug!("navigate {:?} -> {:?}", self.current.mode(), state.mode());
        self.current = state;
        self.sync_url();
    }

    pub fn push_current(&mut self) {
        self.history.push(&self.current);
    }

    pub fn drill_down(&mut self, state: ContentState) {
        self.push_current();
        self.navigate_to(state);
    }

    /// Top-level navigation from the nav bar. The back trail is dropped.
    pub fn select_nav_item(&mut self, id: &str) -> bool {
        let Some(item) = self.nav_items.iter().find(|item| item.id == id) else {
            warning!("Unknown navigation item {}", id);
            return false;
        };
        let state = item.target_state();
        self.active_nav_item = Some(item.id.clone());
        self.history.clear();
        self.navigate_to(state);
        true
    }

    /// Replaces the movies list snapshot of the current list view.
    pub fn update_movies_filters(&mut self, filters: MoviesFilters) -> bool {
        if !shows_movies_list(self.current.mode()) {
            return false;
        }
        let next = self.current.clone().with_movies_filters(filters);
        self.navigate_to(next);
        true
    }

    /// Moves the movies list by one page key through the registered handler.
    pub fn page(&mut self, key: PageKey) -> Option<u32> {
        if !shows_movies_list(self.current.mode()) {
            return None;
        }
        let filters = self.current.movies_filters().cloned().unwrap_or_default();
        let target = self.pagination.target_page(key, filters.current_page)?;
        self.update_movies_filters(filters.with_page(target));
        Some(target)
    }

    pub fn go_back(&mut self) -> BackOutcome {
        match self.history.pop() {
            Some(previous) => {
                self.active_nav_item = self.matching_nav_item(&previous);
                if let Some(filters) = previous.movies_filters() {
                    debug!("restoring movies list at page {}", filters.current_page);
                }
                self.navigate_to(previous);
                BackOutcome::Restored
            }
            None => {
                debug!("history empty, falling back to browser back");
                if self.browser.back() {
                    BackOutcome::Native
                } else {
                    BackOutcome::Unavailable
                }
            }
        }
    }

    /// Reacts to native back/forward. Returns whether the state changed.
    pub fn handle_pop_state(&mut self) -> bool {
        let location = self.browser.location();
        let Some(state) = codec::decode_location(&location) else {
            warning!("Ignoring unrecognized URL {}", location.href());
            return false;
        };
        let state = self.complete_custom_nav(state);
        self.active_nav_item = self.matching_nav_item(&state);
        self.navigate_to(state);
        true
    }

    /// Claims the pending fetch of the current view. Returns `None` when the
    /// view needs nothing or the same fetch is already running.
    ///
    /// A claim is only released by [`complete_hydration`](Self::complete_hydration)
    /// or [`release_hydration`](Self::release_hydration). Callers that may
    /// abandon a fetch should use [`hydrate`](Self::hydrate) instead.
    pub fn next_hydration(&mut self) -> Option<HydrationTarget> {
        let target = HydrationTarget::of(self.current.view())?;
        if !self.in_flight.insert(target.clone()) {
            debug!("{} is already being fetched", target.describe());
            return None;
        }
        Some(target)
    }

    pub fn complete_hydration<T>(
        &mut self,
        target: &HydrationTarget,
        result: Result<Entity, T>,
    ) -> HydrationOutcome
    where
        T: std::fmt::Display,
    {
        self.in_flight.remove(target);

        if HydrationTarget::of(self.current.view()).as_ref() != Some(target) {
            debug!("discarding stale response for {}", target.describe());
            return HydrationOutcome::Stale;
        }

        let resolved = match result {
            Ok(entity) => target.resolve(entity),
            Err(e) => {
                warning!("Failed to load {}. Err: {}", target.describe(), e);
                None
            }
        };

        match resolved {
            Some(view) => {
                let title = view.default_title();
                let next = self.current.with_view(view).with_title(title);
                // A resolved entity may carry a code the URL did not use.
                self.navigate_to(next);
                HydrationOutcome::Applied
            }
            None => {
                let parent = target.parent_view();
                let mode = parent.mode();
                self.navigate_to(ContentState::new(parent));
                HydrationOutcome::FellBack(mode)
            }
        }
    }

    /// Gives up a claim taken with [`next_hydration`](Self::next_hydration)
    /// without touching the current state.
    pub fn release_hydration(&mut self, target: &HydrationTarget) -> bool {
        self.in_flight.remove(target)
    }

    /// Runs the pending fetch of the current view, if one is due.
    ///
    /// The exclusive borrow already rules out a second fetch while this one
    /// runs, so no claim is recorded. Dropping the future mid-fetch leaves
    /// the view pending and fetchable again.
    pub async fn hydrate<S: EntitySource>(&mut self, source: &S) -> Option<HydrationOutcome> {
        let target = HydrationTarget::of(self.current.view())?;
        if self.in_flight.contains(&target) {
            debug!("{} is already being fetched", target.describe());
            return None;
        }
        let result = source.fetch(&target).await;
        Some(self.complete_hydration(&target, result))
    }

    fn sync_url(&mut self) {
        let url = codec::encode(&self.current);
        if self.browser.location().href() != url {
            self.browser.replace(&url);
        }
    }

    fn matching_nav_item(&self, state: &ContentState) -> Option<String> {
        self.nav_items
            .iter()
            .find(|item| item.matches(state))
            .map(|item| item.id.clone())
    }

    fn complete_custom_nav(&self, state: ContentState) -> ContentState {
        let nav_item_id = match state.view() {
            View::CustomNavFiltered(custom) if custom.filter.is_none() => {
                custom.nav_item_id.clone()
            }
            _ => return state,
        };
        match self.nav_items.iter().find(|item| item.id == nav_item_id) {
            Some(item) => item.target_state(),
            None => state,
        }
    }
}

fn shows_movies_list(mode: Mode) -> bool {
    matches!(
        mode,
        Mode::Movies | Mode::FilteredMovies | Mode::CustomNavFiltered
    )
}
