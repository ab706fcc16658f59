use std::cmp::Ordering;

use chrono::Datelike;

use crate::{
    navigation::{ListFilter, MoviesFilters, SortKey, SortOrder},
    types::Movie,
};

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    /// 1-based, clamped to `1..=total_pages`.
    pub page: u32,
    pub total_pages: u32,
}

/// Applies search, filter, sort and pagination of `filters` to `movies`.
pub fn filter_movies(movies: &[Movie], filters: &MoviesFilters) -> Page<Movie> {
    let term = filters.search.trim().to_lowercase();
    let mut selected: Vec<Movie> = movies
        .iter()
        .filter(|m| term.is_empty() || matches_search(m, &term))
        .filter(|m| filters.filter.as_ref().is_none_or(|f| matches_filter(m, f)))
        .cloned()
        .collect();

    sort_movies(&mut selected, filters.sort_by, filters.sort_order);
    paginate(selected, filters.current_page, filters.items_per_page)
}

/// Case-insensitive match of an already lowercased `term` against code,
/// title and cast.
pub fn matches_search(movie: &Movie, term: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(term);
    movie.code.as_deref().is_some_and(contains)
        || contains(movie.title.as_str())
        || movie.actresses.iter().any(|a| contains(a.as_str()))
        || movie.actors.iter().any(|a| contains(a.as_str()))
}

/// Unknown filter types match nothing.
pub fn matches_filter(movie: &Movie, filter: &ListFilter) -> bool {
    let expected = filter.filter_value.trim();
    let wanted = expected.to_lowercase();
    let same = |value: &str| value.trim().to_lowercase() == wanted;

    match filter.filter_type.as_str() {
        "studio" => movie.studio.as_deref().is_some_and(same),
        "series" => movie.series.as_deref().is_some_and(same),
        "tag" => movie.tags.iter().any(|t| same(t.as_str())),
        "actress" => movie.actresses.iter().any(|a| same(a.as_str())),
        "actor" => movie.actors.iter().any(|a| same(a.as_str())),
        "year" => movie
            .release_date
            .is_some_and(|d| d.year().to_string() == expected),
        "favorite" => movie.favorite == matches!(expected, "true" | "1" | "yes"),
        _ => false,
    }
}

pub fn sort_movies(movies: &mut [Movie], key: SortKey, order: SortOrder) {
    movies.sort_by(|a, b| {
        let primary = match key {
            SortKey::ReleaseDate => a.release_date.cmp(&b.release_date),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Code => a.code.cmp(&b.code),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.code.cmp(&b.code), // secondary sort: code ascending
            other => other,
        }
    });
}

/// Cuts `items` into pages of `per_page`; `0` puts everything on one page.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let total = items.len();
    let per_page = if per_page == 0 {
        total.max(1)
    } else {
        per_page as usize
    };
    let total_pages = total.div_ceil(per_page).max(1) as u32;
    let page = page.clamp(1, total_pages);

    let start = (page as usize - 1) * per_page;
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        total,
        page,
        total_pages,
    }
}

/// Case-insensitive substring search over a name field.
pub fn search_by_name<T, F>(items: Vec<T>, term: Option<&str>, name_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let Some(term) = term.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty()) else {
        return items;
    };
    items
        .into_iter()
        .filter(|item| name_of(item).to_lowercase().contains(&term))
        .collect()
}
