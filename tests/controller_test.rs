use mediadex::navigation::{
    BackOutcome, BrowserHistory, ContentState, Detail, EntityRef, FormKind, ListFilter,
    MemoryHistory, Mode, MoviesFilters, NavItem, NavigationController, PageBounds, PageKey, PaginationHandler,
    ProfileRef, View,
};
use mediadex::types::{CustomNavItem, Movie, PersonKind};

// Helper that starts a controller on `url` with the built-in nav items
fn controller_at(url: &str) -> NavigationController<MemoryHistory> {
    NavigationController::new(MemoryHistory::new(url), NavItem::builtin())
}

fn custom_item(id: &str, title: &str, filter_type: &str, filter_value: &str) -> NavItem {
    NavItem::from(CustomNavItem {
        id: id.to_string(),
        title: title.to_string(),
        filter_type: filter_type.to_string(),
        filter_value: filter_value.to_string(),
    })
}

fn resolved_movie(code: &str) -> ContentState {
    let movie = Movie {
        code: Some(code.to_string()),
        title: format!("Movie {}", code),
        ..Default::default()
    };
    ContentState::new(View::MovieDetail(Detail::Resolved(movie)))
}

#[test]
fn test_start_state_comes_from_the_url() {
    let nav = controller_at("/tags");
    assert_eq!(nav.current().mode(), Mode::Tags);
    assert_eq!(nav.active_nav_item(), Some("tags"));
    assert!(!nav.can_go_back());

    // The URL already matched, so nothing was replaced
    assert_eq!(nav.browser().replacements(), 0);
}

#[test]
fn test_unknown_start_url_shows_movies() {
    let nav = controller_at("/does/not/exist");
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.browser().current_url(), "/movies");
    assert_eq!(nav.active_nav_item(), Some("movies"));
}

#[test]
fn test_back_restores_movies_list_page() {
    let mut nav = controller_at("/movies");
    let filters = MoviesFilters {
        search: "blue".to_string(),
        ..MoviesFilters::default().with_page(3)
    };
    assert!(nav.update_movies_filters(filters.clone()));

    nav.drill_down(resolved_movie("ABC-123"));
    assert_eq!(nav.browser().current_url(), "/movie/ABC-123");
    assert_eq!(nav.history_depth(), 1);

    assert_eq!(nav.go_back(), BackOutcome::Restored);
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.current().movies_filters(), Some(&filters));
    assert_eq!(nav.browser().current_url(), "/movies");
    assert_eq!(nav.active_nav_item(), Some("movies"));
    assert!(!nav.can_go_back());
}

#[test]
fn test_url_is_replaced_not_pushed() {
    let mut nav = controller_at("/movies");
    nav.drill_down(resolved_movie("ABC-1"));
    nav.drill_down(ContentState::new(View::FilteredMovies(ListFilter::new(
        "studio", "S1",
    ))));

    assert_eq!(nav.browser().len(), 1);
    assert_eq!(nav.browser().replacements(), 2);
    assert_eq!(
        nav.browser().current_url(),
        "/movies?filter=studio&value=S1"
    );
}

#[test]
fn test_empty_trail_falls_back_to_browser_back() {
    let mut browser = MemoryHistory::new("/actors");
    browser.push("/tags");
    let mut nav = NavigationController::new(browser, NavItem::builtin());
    assert_eq!(nav.current().mode(), Mode::Tags);

    assert_eq!(nav.go_back(), BackOutcome::Native);
    assert_eq!(nav.browser().location().pathname, "/actors");

    assert!(nav.handle_pop_state());
    assert_eq!(nav.current().mode(), Mode::Actors);
    assert_eq!(nav.active_nav_item(), Some("actors"));
}

#[test]
fn test_pop_state_with_unknown_url_keeps_state() {
    let mut nav = controller_at("/series");
    nav.browser_mut().push("/nowhere");

    assert!(!nav.handle_pop_state());
    assert_eq!(nav.current().mode(), Mode::Series);
}

#[test]
fn test_pop_state_decodes_detail_as_pending() {
    let mut nav = controller_at("/movies");
    nav.browser_mut().push("/group/g-1");

    assert!(nav.handle_pop_state());
    assert_eq!(
        nav.current().view(),
        &View::GroupDetail(Detail::Pending(EntityRef::from_key("g-1")))
    );
    assert_eq!(nav.active_nav_item(), None);
}

#[test]
fn test_nav_selection_clears_the_trail() {
    let mut nav = controller_at("/movies");
    nav.drill_down(resolved_movie("ABC-1"));
    nav.drill_down(resolved_movie("ABC-2"));
    assert_eq!(nav.history_depth(), 2);

    assert!(nav.select_nav_item("photobooks"));
    assert_eq!(nav.current().mode(), Mode::Photobooks);
    assert_eq!(nav.active_nav_item(), Some("photobooks"));
    assert_eq!(nav.history_depth(), 0);
    assert_eq!(nav.browser().current_url(), "/photobooks");

    assert!(!nav.select_nav_item("missing"));
    assert_eq!(nav.current().mode(), Mode::Photobooks);
}

#[test]
fn test_back_never_returns_to_admin() {
    let mut nav = controller_at("/admin");
    nav.drill_down(ContentState::new(View::Form(FormKind::Movie)));

    assert_eq!(nav.go_back(), BackOutcome::Restored);
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.browser().current_url(), "/movies");
}

#[test]
fn test_custom_nav_url_is_completed_from_nav_items() {
    let mut items = NavItem::builtin();
    items.push(custom_item("nav-7", "S1 picks", "studio", "S1"));

    let nav = NavigationController::new(MemoryHistory::new("/custom/nav-7"), items);
    assert_eq!(nav.current().mode(), Mode::CustomNavFiltered);
    assert_eq!(
        nav.current().view().filter(),
        Some(&ListFilter::new("studio", "S1"))
    );
    assert_eq!(nav.current().title(), "S1 picks");
    assert_eq!(nav.active_nav_item(), Some("nav-7"));
    assert_eq!(nav.browser().current_url(), "/custom/nav-7");
}

#[test]
fn test_unknown_custom_nav_keeps_empty_filter() {
    let nav = controller_at("/custom/zzz");
    assert_eq!(nav.current().mode(), Mode::CustomNavFiltered);
    assert_eq!(nav.current().view().filter(), None);
    assert_eq!(nav.active_nav_item(), None);
}

#[test]
fn test_selecting_custom_nav_item() {
    let mut nav = controller_at("/movies");
    nav.extend_nav_items([custom_item("nav-1", "Dramas", "tag", "drama")]);

    assert!(nav.select_nav_item("nav-1"));
    assert_eq!(nav.browser().current_url(), "/custom/nav-1");
    assert_eq!(
        nav.current().view().filter(),
        Some(&ListFilter::new("tag", "drama"))
    );
}

#[test]
fn test_filters_only_update_movies_lists() {
    let mut nav = controller_at("/tags");
    assert!(!nav.update_movies_filters(MoviesFilters::default().with_page(2)));
    assert!(nav.current().movies_filters().is_none());

    let mut nav = controller_at("/movies?filter=tag&value=drama");
    assert!(nav.update_movies_filters(MoviesFilters::default().with_page(2)));
    assert_eq!(nav.current().mode(), Mode::FilteredMovies);
    assert_eq!(
        nav.browser().current_url(),
        "/movies?filter=tag&value=drama"
    );
}

#[test]
fn test_page_keys_need_a_registered_handler() {
    let mut nav = controller_at("/movies");
    assert_eq!(nav.page(PageKey::Next), None);

    nav.pagination_mut().register(PageBounds::new(5));
    assert_eq!(nav.page(PageKey::Next), Some(2));
    assert_eq!(nav.page(PageKey::Last), Some(5));
    assert_eq!(nav.page(PageKey::Next), None);
    assert_eq!(nav.page(PageKey::Previous), Some(4));
    assert_eq!(nav.page(PageKey::First), Some(1));
    assert_eq!(nav.page(PageKey::Previous), None);

    assert_eq!(nav.current().movies_filters().map(|f| f.current_page), Some(1));
}

#[test]
fn test_page_keys_ignored_outside_movies_lists() {
    let mut nav = controller_at("/actors");
    nav.pagination_mut().register(PageBounds::new(3));
    assert_eq!(nav.page(PageKey::Next), None);
}

#[test]
fn test_only_the_latest_pagination_handler_is_active() {
    let mut nav = controller_at("/movies");
    let first = nav.pagination_mut().register(PageBounds::new(2));
    let second = nav.pagination_mut().register(PageBounds::new(10));

    assert!(!nav.pagination().is_registered(first));
    assert!(nav.pagination().is_registered(second));

    // A stale id cannot remove its successor
    assert!(!nav.pagination_mut().unregister(first));
    assert!(nav.pagination().has_handler());
    assert_eq!(nav.page(PageKey::Last), Some(10));

    assert!(nav.pagination_mut().unregister(second));
    assert!(!nav.pagination().has_handler());
}

#[test]
fn test_back_without_any_trail_keeps_state() {
    let mut nav = controller_at("/movies");
    assert!(nav.update_movies_filters(MoviesFilters::default().with_page(3)));

    assert_eq!(nav.go_back(), BackOutcome::Unavailable);
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.current().movies_filters().map(|f| f.current_page), Some(3));
    assert_eq!(nav.browser().current_url(), "/movies");
    assert_eq!(nav.browser().len(), 1);
}

#[test]
fn test_back_unwinds_every_drill_down_in_order() {
    let mut nav = controller_at("/movies");
    let library = MoviesFilters::default().with_page(2);
    assert!(nav.update_movies_filters(library.clone()));

    let drama = View::FilteredMovies(ListFilter::new("tag", "drama"));
    nav.drill_down(ContentState::new(drama));
    let filtered = MoviesFilters::default().with_page(4);
    assert!(nav.update_movies_filters(filtered.clone()));
    assert_eq!(nav.active_nav_item(), Some("movies"));

    nav.drill_down(resolved_movie("ABC-7"));
    nav.drill_down(ContentState::profile(PersonKind::Actress, "Yui Hatano"));
    assert_eq!(nav.history_depth(), 3);
    assert_eq!(
        nav.browser().current_url(),
        "/profile/actress/Yui%20Hatano"
    );

    assert_eq!(nav.go_back(), BackOutcome::Restored);
    assert_eq!(nav.current().mode(), Mode::MovieDetail);
    assert_eq!(nav.browser().current_url(), "/movie/ABC-7");

    assert_eq!(nav.go_back(), BackOutcome::Restored);
    assert_eq!(nav.current().mode(), Mode::FilteredMovies);
    assert_eq!(nav.current().movies_filters(), Some(&filtered));
    assert_eq!(
        nav.browser().current_url(),
        "/movies?filter=tag&value=drama"
    );
    assert_eq!(nav.active_nav_item(), None);

    assert_eq!(nav.go_back(), BackOutcome::Restored);
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.current().movies_filters(), Some(&library));
    assert_eq!(nav.browser().current_url(), "/movies");
    assert_eq!(nav.active_nav_item(), Some("movies"));

    assert!(!nav.can_go_back());
    assert_eq!(nav.go_back(), BackOutcome::Unavailable);
    assert_eq!(nav.current().movies_filters(), Some(&library));
}

#[test]
fn test_profile_entries_keep_their_name() {
    let mut nav = controller_at("/actors");
    nav.drill_down(ContentState::profile(PersonKind::Actor, "Ken Shimizu"));
    nav.drill_down(resolved_movie("XYZ-9"));

    nav.go_back();
    match nav.current().view() {
        View::Profile(detail) => {
            assert_eq!(detail.reference(), ProfileRef::new(PersonKind::Actor, "Ken Shimizu"))
        }
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn test_empty_page_count_is_one_page() {
    let bounds = PageBounds::new(0);
    assert_eq!(bounds.total_pages(), 1);
    assert_eq!(bounds.target_page(PageKey::Next, 1), None);
    assert_eq!(bounds.target_page(PageKey::Last, 1), None);
    assert_eq!(bounds.target_page(PageKey::Previous, 0), None);
}

#[test]
fn test_page_keys_stay_inside_the_bounds() {
    let bounds = PageBounds::new(u32::MAX);
    assert_eq!(bounds.target_page(PageKey::Next, u32::MAX), None);
    assert_eq!(bounds.target_page(PageKey::Previous, u32::MAX), Some(u32::MAX - 1));

    // A page beyond the end counts as the last page
    let short = PageBounds::new(3);
    assert_eq!(short.target_page(PageKey::Next, 9), None);
    assert_eq!(short.target_page(PageKey::Previous, 9), Some(2));
    assert_eq!(short.target_page(PageKey::First, 0), None);
}
