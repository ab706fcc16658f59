use tabled::Table;

use crate::{
    catalog::{Collection, filter_movies, paginate, search_by_name},
    error,
    navigation::{ListFilter, MoviesFilters, SortKey, SortOrder},
    types::{CustomNavItem, Group, NamedTableRow, Person, Photobook, SoftMovie},
    utils::normalize_alias_name,
    warning,
};

use super::{
    common::{catalog_source, person_row, print_movie_page},
    view::Renderer,
};

pub struct ListOptions {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub desc: bool,
    pub page: u32,
    pub per_page: u32,
    pub filter: Option<ListFilter>,
}

/// Lists a collection with the same search, filter, sort and paging rules as
/// the web UI's list views.
pub async fn list(collection: Collection, options: ListOptions) {
    let source = catalog_source();
    let mut renderer = Renderer::new(source);

    if collection == Collection::Movies {
        let filters = MoviesFilters {
            search: options.search.unwrap_or_default(),
            sort_by: options.sort.unwrap_or_default(),
            sort_order: if options.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            },
            current_page: options.page,
            items_per_page: options.per_page,
            filter: options.filter,
        };
        match renderer.movies().await {
            Ok(movies) => print_movie_page(&filter_movies(movies, &filters)),
            Err(e) => error!("Failed to load movies. Err: {}", e),
        }
        return;
    }

    if options.filter.is_some() {
        warning!("--filter only applies to movies, ignoring it.");
    }

    let client = renderer.source().client();
    let token = renderer.source().token();
    let result = match collection {
        Collection::Actresses | Collection::Actors => client
            .list::<Person>(collection, token)
            .await
            .map(|people| people.iter().map(person_row).collect::<Vec<_>>()),
        Collection::Photobooks => client.list::<Photobook>(collection, token).await.map(|books| {
            books
                .into_iter()
                .map(|b| NamedTableRow {
                    id: b.code.or(b.id).unwrap_or_default(),
                    name: b.title,
                    details: b.actress.as_deref().map(normalize_alias_name).unwrap_or_default(),
                })
                .collect()
        }),
        Collection::SoftMovies => client.list::<SoftMovie>(collection, token).await.map(|movies| {
            movies
                .into_iter()
                .map(|m| NamedTableRow {
                    id: m.code.or(m.id).unwrap_or_default(),
                    name: m.title,
                    details: m.cast.join(", "),
                })
                .collect()
        }),
        Collection::Groups => client.list::<Group>(collection, token).await.map(|groups| {
            groups
                .into_iter()
                .map(|g| NamedTableRow {
                    id: g.code.or(g.id).unwrap_or_default(),
                    details: format!("{} members", g.members.len()),
                    name: g.name,
                })
                .collect()
        }),
        Collection::CustomNav => client.list::<CustomNavItem>(collection, token).await.map(|items| {
            items
                .into_iter()
                .map(|n| NamedTableRow {
                    id: n.id,
                    name: n.title,
                    details: format!("{}={}", n.filter_type, n.filter_value),
                })
                .collect()
        }),
        Collection::Movies => Ok(Vec::new()),
    };

    let rows = match result {
        Ok(rows) => rows,
        Err(e) => error!("Failed to load {}. Err: {}", collection, e),
    };

    let mut rows = search_by_name(rows, options.search.as_deref(), |r| r.name.as_str());
    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    if options.desc {
        rows.reverse();
    }

    let page = paginate(rows, options.page, options.per_page);
    if page.items.is_empty() {
        warning!("No {} match.", collection);
        return;
    }
    println!("{}", Table::new(page.items));
    println!(
        "page {}/{} · {} {}",
        page.page, page.total_pages, page.total, collection
    );
}

pub fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    match value.trim().to_lowercase().as_str() {
        "date" | "release" | "release-date" => Ok(SortKey::ReleaseDate),
        "title" | "name" => Ok(SortKey::Title),
        "code" => Ok(SortKey::Code),
        other => Err(format!(
            "unknown sort key '{}', expected date, title or code",
            other
        )),
    }
}

/// Parses `type=value`, e.g. `studio=S1 NO.1 STYLE`.
pub fn parse_filter(value: &str) -> Result<ListFilter, String> {
    match value.split_once('=') {
        Some((kind, val)) if !kind.trim().is_empty() => {
            Ok(ListFilter::new(kind.trim(), val.trim()))
        }
        _ => Err(format!("expected <type>=<value>, got '{}'", value)),
    }
}
