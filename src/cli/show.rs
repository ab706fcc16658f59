use crate::{
    catalog::CatalogSource,
    error, info,
    navigation::{HydrationOutcome, MemoryHistory, NavigationController},
    warning,
};

use super::{
    common::{catalog_source, describe_state, load_nav_items},
    route::location_of,
    view::Renderer,
};

/// Shows the page behind a catalog URL: the entity for detail URLs, the list
/// for list URLs.
///
/// Detail URLs only carry an identifier, so the entity is fetched first. When
/// that fails the parent list is shown instead, the same way the web UI
/// recovers from a dead link.
pub async fn show(url: String) {
    let location = location_of(&url);
    let source = catalog_source();
    let nav_items = load_nav_items(&source).await;

    let mut nav = NavigationController::new(MemoryHistory::new(&location.href()), nav_items);
    if nav.browser().current_url() != location.href() {
        warning!("Showing {} instead of {}", nav.browser().current_url(), location.href());
    }

    render(nav, source).await;
}

async fn render(mut nav: NavigationController<MemoryHistory>, source: CatalogSource) {
    match nav.hydrate(&source).await {
        Some(HydrationOutcome::FellBack(_)) => {
            warning!("Entity not found, showing {}", nav.current().title())
        }
        Some(HydrationOutcome::Stale) | Some(HydrationOutcome::Applied) | None => {}
    }

    info!("{}", describe_state(nav.current()));
    let mut renderer = Renderer::new(source);
    if let Err(e) = renderer.render(nav.current()).await {
        error!("Failed to load {}. Err: {}", nav.current().title(), e);
    }
}
