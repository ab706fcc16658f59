//! Two-way mapping between a [`ContentState`] and a browser URL.
//!
//! The mapping keeps which entity or list is shown and drops derived data:
//! titles, fetched payloads and movies list snapshots are not part of the
//! URL. Decoding an entity URL therefore always yields a pending detail that
//! still has to be hydrated.
//!
//! # URL surface
//!
//! ```text
//! /movies /actors /actresses /series /studios /tags
//! /photobooks /groups /favorites /soft /admin
//! /movie/<id> /soft-movie/<id> /photobook/<id> /group/<id>
//! /profile/<type>/<name>
//! /custom/<navItemId>
//! /movies?filter=<type>&value=<value>
//! /actresses?filter=<type>&value=<value>
//! ```

use std::borrow::Cow;

use crate::{
    navigation::state::{
        ContentState, CustomNavRef, Detail, EntityRef, ListFilter, ProfileRef, UNKNOWN_IDENTIFIER,
        View,
    },
    types::PersonKind,
};

/// A browser location split into path and query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Either empty or starting with `?`.
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = if search.is_empty() || search.starts_with('?') {
            search
        } else {
            format!("?{}", search)
        };
        Self {
            pathname: pathname.into(),
            search,
        }
    }

    /// Splits a path-relative URL such as `/movies?filter=tag&value=x`.
    /// Fragments are dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        match url.split_once('?') {
            Some((path, "")) => Self::new(path, ""),
            Some((path, query)) => Self::new(path, format!("?{}", query)),
            None => Self::new(url, ""),
        }
    }

    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Encodes a state as a path-relative URL. Never fails; views without a URL
/// of their own map to `/movies`.
pub fn encode(state: &ContentState) -> String {
    match state.view() {
        View::Movies | View::Form(_) => "/movies".to_string(),
        View::Actors => "/actors".to_string(),
        View::Actresses => "/actresses".to_string(),
        View::Series => "/series".to_string(),
        View::Studios => "/studios".to_string(),
        View::Tags => "/tags".to_string(),
        View::Photobooks => "/photobooks".to_string(),
        View::Groups => "/groups".to_string(),
        View::Favorites => "/favorites".to_string(),
        View::Soft => "/soft".to_string(),
        View::Admin => "/admin".to_string(),
        View::MovieDetail(d) => format!("/movie/{}", segment(d.reference().key())),
        View::ScMovieDetail(d) => format!("/soft-movie/{}", segment(d.reference().key())),
        View::PhotobookDetail(d) => format!("/photobook/{}", segment(d.reference().key())),
        View::GroupDetail(d) => format!("/group/{}", segment(d.reference().key())),
        View::Profile(d) => {
            let profile = d.reference();
            format!(
                "/profile/{}/{}",
                profile.kind.as_str(),
                segment(&profile.name)
            )
        }
        View::FilteredMovies(f) => format!("/movies{}", filter_query(f)),
        View::FilteredActresses(f) => format!("/actresses{}", filter_query(f)),
        View::CustomNavFiltered(c) => format!("/custom/{}", segment(&c.nav_item_id)),
    }
}

/// Decodes a location back into a state. `None` means the URL is not one the
/// app produces and the caller should keep whatever it is showing.
pub fn decode(pathname: &str, search: &str) -> Option<ContentState> {
    let path = normalize(pathname);

    if let Some(rest) = path.strip_prefix("/soft-movie/") {
        let key = single_segment(rest)?;
        return Some(ContentState::new(View::ScMovieDetail(Detail::Pending(
            EntityRef::from_key(key),
        ))));
    }
    if let Some(rest) = path.strip_prefix("/movie/") {
        let key = single_segment(rest)?;
        return Some(ContentState::new(View::MovieDetail(Detail::Pending(
            EntityRef::from_key(key),
        ))));
    }
    if let Some(rest) = path.strip_prefix("/photobook/") {
        let key = single_segment(rest)?;
        return Some(ContentState::new(View::PhotobookDetail(Detail::Pending(
            EntityRef::from_key(key),
        ))));
    }
    if let Some(rest) = path.strip_prefix("/group/") {
        let key = single_segment(rest)?;
        return Some(ContentState::new(View::GroupDetail(Detail::Pending(
            EntityRef::from_key(key),
        ))));
    }
    if let Some(rest) = path.strip_prefix("/profile/") {
        let (kind, name) = rest.split_once('/')?;
        let kind = PersonKind::parse(kind)?;
        let name = single_segment(name)?;
        return Some(ContentState::new(View::Profile(Detail::Pending(
            ProfileRef::new(kind, name),
        ))));
    }
    if let Some(rest) = path.strip_prefix("/custom/") {
        let nav_item_id = single_segment(rest)?;
        return Some(ContentState::new(View::CustomNavFiltered(CustomNavRef {
            nav_item_id,
            filter: None,
        })));
    }

    let view = match path {
        "" | "/" => View::Movies,
        "/movies" => match query_filter(search) {
            Some(f) => View::FilteredMovies(f),
            None => View::Movies,
        },
        "/actresses" => match query_filter(search) {
            Some(f) => View::FilteredActresses(f),
            None => View::Actresses,
        },
        "/actors" => View::Actors,
        "/series" => View::Series,
        "/studios" => View::Studios,
        "/tags" => View::Tags,
        "/photobooks" => View::Photobooks,
        "/groups" => View::Groups,
        "/favorites" => View::Favorites,
        "/soft" => View::Soft,
        "/admin" => View::Admin,
        _ => return None,
    };
    Some(ContentState::new(view))
}

pub fn decode_location(location: &Location) -> Option<ContentState> {
    decode(&location.pathname, &location.search)
}

fn segment(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed(UNKNOWN_IDENTIFIER);
    }
    urlencoding::encode(value)
}

fn filter_query(filter: &ListFilter) -> String {
    format!(
        "?filter={}&value={}",
        urlencoding::encode(&filter.filter_type),
        urlencoding::encode(&filter.filter_value)
    )
}

fn normalize(pathname: &str) -> &str {
    let trimmed = pathname.trim_end_matches('/');
    if trimmed.is_empty() && pathname.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

fn single_segment(rest: &str) -> Option<String> {
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    let decoded = urlencoding::decode(rest).ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(decoded.into_owned())
}

fn query_filter(search: &str) -> Option<ListFilter> {
    let filter_type = query_param(search, "filter")?;
    let filter_value = query_param(search, "value")?;
    if filter_type.is_empty() {
        return None;
    }
    Some(ListFilter::new(filter_type, filter_value))
}

fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(Cow::into_owned)
        })
}
