use std::collections::BTreeMap;

use tabled::Table;

use crate::{
    Res,
    catalog::{
        CatalogSource, Collection, Page, filter_movies,
        listing::{matches_filter, search_by_name},
    },
    info,
    navigation::{ContentState, ListFilter, MoviesFilters, View},
    types::{Group, Movie, NamedTableRow, Person, Photobook, SoftMovie},
    utils::normalize_alias_name,
    warning,
};

use super::common::{person_row, print_detail, print_movie_page, spinner};

/// Prints whatever a state shows, fetching lists on demand. The movies list
/// is fetched once per renderer.
pub struct Renderer {
    source: CatalogSource,
    movies: Option<Vec<Movie>>,
}

impl Renderer {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            movies: None,
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub async fn movies(&mut self) -> Res<&[Movie]> {
        if self.movies.is_none() {
            let pb = spinner("Fetching movies...");
            let result = self
                .source
                .client()
                .list::<Movie>(Collection::Movies, self.source.token())
                .await;
            pb.finish_and_clear();
            self.movies = Some(result?);
        }
        Ok(self.movies.as_deref().unwrap_or_default())
    }

    /// Current page of the movies list a state shows, if it shows one.
    pub async fn movie_page(&mut self, state: &ContentState) -> Res<Option<Page<Movie>>> {
        let Some(filters) = movie_list_filters(state) else {
            return Ok(None);
        };
        let movies = self.movies().await?;
        Ok(Some(filter_movies(movies, &filters)))
    }

    /// Prints `state`. Returns the page count when a movies list was shown.
    pub async fn render(&mut self, state: &ContentState) -> Res<Option<u32>> {
        if print_detail(state.view()) {
            return Ok(None);
        }

        if let Some(page) = self.movie_page(state).await? {
            print_movie_page(&page);
            return Ok(Some(page.total_pages));
        }

        match state.view() {
            View::Actresses => self.print_people(Collection::Actresses, None).await?,
            View::Actors => self.print_people(Collection::Actors, None).await?,
            View::FilteredActresses(filter) => {
                self.print_people(Collection::Actresses, Some(filter)).await?
            }
            View::Series => self.print_movie_facet(|m| m.series.iter().cloned().collect()).await?,
            View::Studios => self.print_movie_facet(|m| m.studio.iter().cloned().collect()).await?,
            View::Tags => self.print_movie_facet(|m| m.tags.clone()).await?,
            View::Photobooks => {
                let books: Vec<Photobook> = self.fetch(Collection::Photobooks).await?;
                print_named(books.iter().map(|b| NamedTableRow {
                    id: b.code.clone().or(b.id.clone()).unwrap_or_default(),
                    name: b.title.clone(),
                    details: b.actress.as_deref().map(normalize_alias_name).unwrap_or_default(),
                }));
            }
            View::Soft => {
                let movies: Vec<SoftMovie> = self.fetch(Collection::SoftMovies).await?;
                print_named(movies.iter().map(|m| NamedTableRow {
                    id: m.code.clone().or(m.id.clone()).unwrap_or_default(),
                    name: m.title.clone(),
                    details: m.cast.join(", "),
                }));
            }
            View::Groups => {
                let groups: Vec<Group> = self.fetch(Collection::Groups).await?;
                print_named(groups.iter().map(|g| NamedTableRow {
                    id: g.code.clone().or(g.id.clone()).unwrap_or_default(),
                    name: g.name.clone(),
                    details: format!("{} members", g.members.len()),
                }));
            }
            View::Admin | View::Form(_) => info!("{} is only available in the web UI.", state.title()),
            _ => warning!("Nothing loaded for {} yet.", state.title()),
        }
        Ok(None)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, collection: Collection) -> Res<Vec<T>> {
        let pb = spinner(&format!("Fetching {}...", collection));
        let result = self
            .source
            .client()
            .list::<T>(collection, self.source.token())
            .await;
        pb.finish_and_clear();
        Ok(result?)
    }

    async fn print_people(
        &mut self,
        collection: Collection,
        filter: Option<&ListFilter>,
    ) -> Res<()> {
        let mut people: Vec<Person> = self.fetch(collection).await?;

        if let Some(filter) = filter {
            if filter.filter_type == "name" {
                people = search_by_name(people, Some(filter.filter_value.as_str()), |p| {
                    p.name.as_str()
                });
            } else {
                // People credited in the movies matching the filter.
                let movies = self.movies().await?;
                let credited: Vec<&String> = movies
                    .iter()
                    .filter(|m| matches_filter(m, filter))
                    .flat_map(|m| m.actresses.iter().chain(m.actors.iter()))
                    .collect();
                people.retain(|p| credited.contains(&&p.name));
            }
        }

        people.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        print_named(people.iter().map(person_row));
        Ok(())
    }

    async fn print_movie_facet<F>(&mut self, values_of: F) -> Res<()>
    where
        F: Fn(&Movie) -> Vec<String>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for movie in self.movies().await? {
            for value in values_of(movie) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        print_named(counts.into_iter().map(|(name, count)| NamedTableRow {
            id: String::new(),
            name,
            details: format!("{} movies", count),
        }));
        Ok(())
    }
}

/// Movies list controls for states that show the movies list.
pub fn movie_list_filters(state: &ContentState) -> Option<MoviesFilters> {
    let filters = state.movies_filters().cloned().unwrap_or_default();
    let filter = match state.view() {
        View::Movies => filters.filter.clone(),
        View::FilteredMovies(f) => Some(f.clone()),
        View::CustomNavFiltered(c) => c.filter.clone(),
        View::Favorites => Some(ListFilter::new("favorite", "true")),
        _ => return None,
    };
    Some(MoviesFilters { filter, ..filters })
}

fn print_named(rows: impl Iterator<Item = NamedTableRow>) {
    let rows: Vec<NamedTableRow> = rows.collect();
    if rows.is_empty() {
        warning!("Nothing to show.");
        return;
    }
    let count = rows.len();
    println!("{}", Table::new(rows));
    println!("{} entries", count);
}
