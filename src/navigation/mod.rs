//! # Navigation Module
//!
//! The state machine behind the catalog's views. It decides what is shown,
//! remembers where the user came from and keeps the browser URL in step.
//!
//! ## Layers
//!
//! ```text
//! NavigationController      (navigate, drill down, back, popstate, hydration)
//!     ├── codec             (ContentState <-> path + query)
//!     ├── history           (back trail of ContentState snapshots)
//!     ├── pagination        (single owner of page keys)
//!     └── browser           (native history seam)
//! ```
//!
//! ## Back navigation
//!
//! The controller keeps its own trail next to the browser's history.
//! Drill-downs (list to detail, list to filtered list, list to form) push the
//! current state before moving on; top-level navigation clears the trail.
//! `go_back` pops the trail when it can and only falls back to the browser
//! when the trail is empty. The URL is replaced on every change, never
//! pushed, so the two histories do not double up.
//!
//! ## Hydration
//!
//! A detail view can be entered with an identifier only, for example after
//! decoding a shared URL. The view then holds a [`Detail::Pending`] payload
//! until [`NavigationController::hydrate`] resolves it. Each identifier is
//! fetched at most once at a time, and responses for views the user already
//! left are dropped. A failed fetch sends the user to the parent list.

mod browser;
mod codec;
mod controller;
mod history;
mod hydration;
mod pagination;
mod state;

pub use browser::{BrowserHistory, MemoryHistory};
pub use codec::{Location, decode, decode_location, encode};
pub use controller::{BackOutcome, NavigationController};
pub use history::NavigationHistory;
pub use hydration::{Entity, EntitySource, HydrationOutcome, HydrationTarget};
pub use pagination::{PageBounds, PageKey, PaginationHandler, PaginationRegistry, RegistrationId};
pub use state::{
    CatalogEntity, ContentState, CustomNavRef, Detail, EntityRef, FormKind, ListFilter, Mode,
    MoviesFilters, NavItem, ProfileRef, SortKey, SortOrder, UNKNOWN_IDENTIFIER, View,
};
