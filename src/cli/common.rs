use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog::{ApiClient, CatalogSource, Collection, Page},
    config, error,
    navigation::{ContentState, Detail, Mode, NavItem, View, encode},
    types::{
        CustomNavItem, FieldTableRow, Group, Movie, MovieTableRow, NamedTableRow, Person, Photobook,
        SoftMovie,
    },
    utils::{format_aliases, split_bracketed_name},
    warning,
};

/// Builds the API source from configuration or exits with a hint.
pub fn catalog_source() -> CatalogSource {
    let client = match ApiClient::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot reach the catalog API. Err: {}", e),
    };
    let token = match config::api_token() {
        Ok(t) => t,
        Err(e) => error!("Cannot authenticate against the catalog API. Err: {}", e),
    };
    CatalogSource::new(client, token)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Built-in nav items plus the custom ones stored in the backend. Failing to
/// load the custom items only costs their highlighting.
pub async fn load_nav_items(source: &CatalogSource) -> Vec<NavItem> {
    let mut items = NavItem::builtin();
    match source
        .client()
        .list::<CustomNavItem>(Collection::CustomNav, source.token())
        .await
    {
        Ok(custom) => items.extend(custom.into_iter().map(NavItem::from)),
        Err(e) => warning!("Failed to load custom navigation items. Err: {}", e),
    }
    items
}

/// Display name of a person as `Name (Alias, Alias)`. Aliases written in
/// brackets inside the stored name are merged with the alias list.
pub fn person_label(person: &Person) -> String {
    let (name, mut aliases) = split_bracketed_name(&person.name);
    aliases.extend(person.aliases.iter().cloned());
    format_aliases(&name, &aliases)
}

pub fn person_row(person: &Person) -> NamedTableRow {
    NamedTableRow {
        id: person.id.clone().unwrap_or_default(),
        name: person_label(person),
        details: person
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
    }
}

pub fn describe_state(state: &ContentState) -> String {
    let status = match state.view() {
        View::MovieDetail(d) => hydration_status(d.is_pending()),
        View::ScMovieDetail(d) => hydration_status(d.is_pending()),
        View::PhotobookDetail(d) => hydration_status(d.is_pending()),
        View::GroupDetail(d) => hydration_status(d.is_pending()),
        View::Profile(d) => hydration_status(d.is_pending()),
        _ => "",
    };
    format!(
        "{} \"{}\" {}{}",
        mode_name(state.mode()),
        state.title(),
        encode(state),
        status
    )
}

fn hydration_status(pending: bool) -> &'static str {
    if pending { " (pending)" } else { " (loaded)" }
}

pub fn mode_name(mode: Mode) -> String {
    serde_json::to_value(mode)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", mode))
}

pub fn movie_rows(movies: &[Movie]) -> Vec<MovieTableRow> {
    movies
        .iter()
        .map(|m| MovieTableRow {
            code: m.code.clone().unwrap_or_default(),
            title: m.title.clone(),
            released: m.release_date.map(|d| d.to_string()).unwrap_or_default(),
            studio: m.studio.clone().unwrap_or_default(),
            cast: m
                .actresses
                .iter()
                .chain(m.actors.iter())
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
        })
        .collect()
}

pub fn print_movie_page(page: &Page<Movie>) {
    if page.items.is_empty() {
        warning!("No movies match.");
        return;
    }
    println!("{}", Table::new(movie_rows(&page.items)));
    println!(
        "page {}/{} · {} movies",
        page.page, page.total_pages, page.total
    );
}

fn field(name: &str, value: impl Into<String>) -> FieldTableRow {
    FieldTableRow {
        field: name.to_string(),
        value: value.into(),
    }
}

fn opt_field(name: &str, value: Option<impl ToString>) -> FieldTableRow {
    field(name, value.map(|v| v.to_string()).unwrap_or_default())
}

pub fn movie_fields(m: &Movie) -> Vec<FieldTableRow> {
    vec![
        opt_field("code", m.code.as_ref()),
        field("title", m.title.clone()),
        opt_field("released", m.release_date),
        opt_field("studio", m.studio.as_ref()),
        opt_field("series", m.series.as_ref()),
        field("actresses", m.actresses.join(", ")),
        field("actors", m.actors.join(", ")),
        field("tags", m.tags.join(", ")),
        field("favorite", m.favorite.to_string()),
    ]
}

fn soft_movie_fields(m: &SoftMovie) -> Vec<FieldTableRow> {
    vec![
        opt_field("code", m.code.as_ref()),
        field("title", m.title.clone()),
        opt_field("released", m.release_date),
        field("cast", m.cast.join(", ")),
        field("tags", m.tags.join(", ")),
    ]
}

fn photobook_fields(p: &Photobook) -> Vec<FieldTableRow> {
    vec![
        opt_field("code", p.code.as_ref()),
        field("title", p.title.clone()),
        opt_field("actress", p.actress.as_ref()),
        opt_field("released", p.release_date),
        field("images", p.image_urls.len().to_string()),
    ]
}

fn group_fields(g: &Group) -> Vec<FieldTableRow> {
    vec![
        opt_field("id", g.id.as_ref()),
        field("name", g.name.clone()),
        field("members", g.members.join(", ")),
    ]
}

fn person_fields(p: &Person) -> Vec<FieldTableRow> {
    vec![
        field("type", p.kind.as_str()),
        field("name", person_label(p)),
        opt_field("born", p.birth_date),
    ]
}

/// Prints the entity of a resolved detail view. Returns `false` for any
/// other view.
pub fn print_detail(view: &View) -> bool {
    let rows = match view {
        View::MovieDetail(Detail::Resolved(m)) => movie_fields(m),
        View::ScMovieDetail(Detail::Resolved(m)) => soft_movie_fields(m),
        View::PhotobookDetail(Detail::Resolved(p)) => photobook_fields(p),
        View::GroupDetail(Detail::Resolved(g)) => group_fields(g),
        View::Profile(Detail::Resolved(p)) => person_fields(p),
        _ => return false,
    };
    println!("{}", Table::new(rows));
    true
}
