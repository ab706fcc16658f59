use serde::{Deserialize, Serialize};

use crate::types::{CustomNavItem, Group, Movie, Person, PersonKind, Photobook, SoftMovie};

/// Path segment used when a state carries no identifier at all.
pub const UNKNOWN_IDENTIFIER: &str = "unknown";

/// Payload-free discriminant of a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Movies,
    Actors,
    Actresses,
    Series,
    Studios,
    Tags,
    Photobooks,
    Groups,
    Favorites,
    Soft,
    Admin,
    MovieDetail,
    ScMovieDetail,
    PhotobookDetail,
    GroupDetail,
    Profile,
    FilteredMovies,
    FilteredActresses,
    CustomNavFiltered,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    ReleaseDate,
    Title,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// A single `filter=<type>&value=<value>` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub filter_type: String,
    pub filter_value: String,
}

impl ListFilter {
    pub fn new(filter_type: impl Into<String>, filter_value: impl Into<String>) -> Self {
        Self {
            filter_type: filter_type.into(),
            filter_value: filter_value.into(),
        }
    }
}

/// Snapshot of the movies list controls, restored when coming back from a
/// detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoviesFilters {
    pub search: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub current_page: u32,
    pub items_per_page: u32,
    pub filter: Option<ListFilter>,
}

impl Default for MoviesFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            current_page: 1,
            items_per_page: 24,
            filter: None,
        }
    }
}

impl MoviesFilters {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }
}

/// Identifier of a catalog entity: its `code` when it has one, else its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    key: String,
}

impl EntityRef {
    pub fn new(code: Option<&str>, id: Option<&str>) -> Self {
        let key = code
            .filter(|c| !c.is_empty())
            .or(id.filter(|i| !i.is_empty()))
            .unwrap_or(UNKNOWN_IDENTIFIER);
        Self {
            key: key.to_string(),
        }
    }

    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.is_empty() {
            return Self::new(None, None);
        }
        Self { key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_unknown(&self) -> bool {
        self.key == UNKNOWN_IDENTIFIER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileRef {
    pub kind: PersonKind,
    pub name: String,
}

impl ProfileRef {
    pub fn new(kind: PersonKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl From<&Person> for ProfileRef {
    fn from(person: &Person) -> Self {
        Self::new(person.kind, person.name.clone())
    }
}

/// A detail payload that is either awaiting a fetch or already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<R, T> {
    Pending(R),
    Resolved(T),
}

impl<R, T> Detail<R, T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Detail::Pending(_))
    }

    pub fn pending(&self) -> Option<&R> {
        match self {
            Detail::Pending(r) => Some(r),
            Detail::Resolved(_) => None,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Detail::Pending(_) => None,
            Detail::Resolved(t) => Some(t),
        }
    }
}

impl<T: CatalogEntity> Detail<EntityRef, T> {
    pub fn reference(&self) -> EntityRef {
        match self {
            Detail::Pending(r) => r.clone(),
            Detail::Resolved(entity) => entity.reference(),
        }
    }
}

impl Detail<ProfileRef, Person> {
    pub fn reference(&self) -> ProfileRef {
        match self {
            Detail::Pending(r) => r.clone(),
            Detail::Resolved(person) => ProfileRef::from(person),
        }
    }
}

/// Entities addressed by code or id in detail URLs.
pub trait CatalogEntity {
    fn code(&self) -> Option<&str>;
    fn id(&self) -> Option<&str>;
    fn label(&self) -> &str;

    fn reference(&self) -> EntityRef {
        EntityRef::new(self.code(), self.id())
    }
}

macro_rules! catalog_entity {
    ($ty:ty, $label:ident) => {
        impl CatalogEntity for $ty {
            fn code(&self) -> Option<&str> {
                self.code.as_deref()
            }

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn label(&self) -> &str {
                &self.$label
            }
        }
    };
}

catalog_entity!(Movie, title);
catalog_entity!(SoftMovie, title);
catalog_entity!(Photobook, title);
catalog_entity!(Group, name);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomNavRef {
    pub nav_item_id: String,
    pub filter: Option<ListFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Movie,
    Person,
    Photobook,
    SoftMovie,
    NavItem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Movies,
    Actors,
    Actresses,
    Series,
    Studios,
    Tags,
    Photobooks,
    Groups,
    Favorites,
    Soft,
    Admin,
    MovieDetail(Detail<EntityRef, Movie>),
    ScMovieDetail(Detail<EntityRef, SoftMovie>),
    PhotobookDetail(Detail<EntityRef, Photobook>),
    GroupDetail(Detail<EntityRef, Group>),
    Profile(Detail<ProfileRef, Person>),
    FilteredMovies(ListFilter),
    FilteredActresses(ListFilter),
    CustomNavFiltered(CustomNavRef),
    Form(FormKind),
}

impl View {
    pub fn mode(&self) -> Mode {
        match self {
            View::Movies => Mode::Movies,
            View::Actors => Mode::Actors,
            View::Actresses => Mode::Actresses,
            View::Series => Mode::Series,
            View::Studios => Mode::Studios,
            View::Tags => Mode::Tags,
            View::Photobooks => Mode::Photobooks,
            View::Groups => Mode::Groups,
            View::Favorites => Mode::Favorites,
            View::Soft => Mode::Soft,
            View::Admin => Mode::Admin,
            View::MovieDetail(_) => Mode::MovieDetail,
            View::ScMovieDetail(_) => Mode::ScMovieDetail,
            View::PhotobookDetail(_) => Mode::PhotobookDetail,
            View::GroupDetail(_) => Mode::GroupDetail,
            View::Profile(_) => Mode::Profile,
            View::FilteredMovies(_) => Mode::FilteredMovies,
            View::FilteredActresses(_) => Mode::FilteredActresses,
            View::CustomNavFiltered(_) => Mode::CustomNavFiltered,
            View::Form(_) => Mode::Form,
        }
    }

    /// Top-level list view for a payload-free mode.
    pub fn from_static_mode(mode: Mode) -> Option<View> {
        let view = match mode {
            Mode::Movies => View::Movies,
            Mode::Actors => View::Actors,
            Mode::Actresses => View::Actresses,
            Mode::Series => View::Series,
            Mode::Studios => View::Studios,
            Mode::Tags => View::Tags,
            Mode::Photobooks => View::Photobooks,
            Mode::Groups => View::Groups,
            Mode::Favorites => View::Favorites,
            Mode::Soft => View::Soft,
            Mode::Admin => View::Admin,
            _ => return None,
        };
        Some(view)
    }

    /// Filter carried by filtered list views.
    pub fn filter(&self) -> Option<&ListFilter> {
        match self {
            View::FilteredMovies(f) | View::FilteredActresses(f) => Some(f),
            View::CustomNavFiltered(c) => c.filter.as_ref(),
            _ => None,
        }
    }

    /// Identifier shown in the URL for detail views.
    pub fn identifier(&self) -> Option<String> {
        match self {
            View::MovieDetail(d) => Some(d.reference().key().to_string()),
            View::ScMovieDetail(d) => Some(d.reference().key().to_string()),
            View::PhotobookDetail(d) => Some(d.reference().key().to_string()),
            View::GroupDetail(d) => Some(d.reference().key().to_string()),
            View::Profile(d) => Some(d.reference().name),
            View::CustomNavFiltered(c) => Some(c.nav_item_id.clone()),
            _ => None,
        }
    }

    pub fn default_title(&self) -> String {
        match self {
            View::Movies => "Movies".to_string(),
            View::Actors => "Actors".to_string(),
            View::Actresses => "Actresses".to_string(),
            View::Series => "Series".to_string(),
            View::Studios => "Studios".to_string(),
            View::Tags => "Tags".to_string(),
            View::Photobooks => "Photobooks".to_string(),
            View::Groups => "Groups".to_string(),
            View::Favorites => "Favorites".to_string(),
            View::Soft => "Soft".to_string(),
            View::Admin => "Admin".to_string(),
            View::MovieDetail(d) => detail_title(d),
            View::ScMovieDetail(d) => detail_title(d),
            View::PhotobookDetail(d) => detail_title(d),
            View::GroupDetail(d) => detail_title(d),
            View::Profile(d) => d.reference().name,
            View::FilteredMovies(f) | View::FilteredActresses(f) => {
                format!("{}: {}", f.filter_type, f.filter_value)
            }
            View::CustomNavFiltered(c) => c.nav_item_id.clone(),
            View::Form(kind) => format!("{:?} form", kind),
        }
    }
}

fn detail_title<T: CatalogEntity>(detail: &Detail<EntityRef, T>) -> String {
    match detail {
        Detail::Pending(r) => r.key().to_string(),
        Detail::Resolved(entity) if !entity.label().is_empty() => entity.label().to_string(),
        Detail::Resolved(entity) => entity.reference().key().to_string(),
    }
}

/// The view currently on screen together with its data.
///
/// Values are replaced, never edited: every builder returns a new state.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    view: View,
    title: String,
    movies_filters: Option<MoviesFilters>,
}

impl ContentState {
    pub fn new(view: View) -> Self {
        let title = view.default_title();
        Self {
            view,
            title,
            movies_filters: None,
        }
    }

    pub fn movies() -> Self {
        Self::new(View::Movies)
    }

    pub fn movie(reference: EntityRef) -> Self {
        Self::new(View::MovieDetail(Detail::Pending(reference)))
    }

    pub fn profile(kind: PersonKind, name: impl Into<String>) -> Self {
        Self::new(View::Profile(Detail::Pending(ProfileRef::new(kind, name))))
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_movies_filters(self, filters: MoviesFilters) -> Self {
        Self {
            movies_filters: Some(filters),
            ..self
        }
    }

    /// Same filters and title, different view payload.
    pub fn with_view(&self, view: View) -> Self {
        Self {
            view,
            title: self.title.clone(),
            movies_filters: self.movies_filters.clone(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn mode(&self) -> Mode {
        self.view.mode()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn movies_filters(&self) -> Option<&MoviesFilters> {
        self.movies_filters.as_ref()
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::movies()
    }
}

/// Entry of the primary navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub mode: Mode,
    pub filter: Option<ListFilter>,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, mode: Mode) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            mode,
            filter: None,
        }
    }

    pub fn builtin() -> Vec<NavItem> {
        [
            ("movies", "Movies", Mode::Movies),
            ("actors", "Actors", Mode::Actors),
            ("actresses", "Actresses", Mode::Actresses),
            ("series", "Series", Mode::Series),
            ("studios", "Studios", Mode::Studios),
            ("tags", "Tags", Mode::Tags),
            ("photobooks", "Photobooks", Mode::Photobooks),
            ("groups", "Groups", Mode::Groups),
            ("favorites", "Favorites", Mode::Favorites),
            ("soft", "Soft", Mode::Soft),
            ("admin", "Admin", Mode::Admin),
        ]
        .into_iter()
        .map(|(id, label, mode)| NavItem::new(id, label, mode))
        .collect()
    }

    /// State shown when this item is clicked.
    pub fn target_state(&self) -> ContentState {
        let view = match (self.mode, &self.filter) {
            (Mode::CustomNavFiltered, filter) => View::CustomNavFiltered(CustomNavRef {
                nav_item_id: self.id.clone(),
                filter: filter.clone(),
            }),
            (Mode::FilteredMovies, Some(f)) => View::FilteredMovies(f.clone()),
            (Mode::FilteredActresses, Some(f)) => View::FilteredActresses(f.clone()),
            (mode, _) => View::from_static_mode(mode).unwrap_or(View::Movies),
        };
        ContentState::new(view).with_title(self.label.clone())
    }

    pub fn matches(&self, state: &ContentState) -> bool {
        if self.mode != state.mode() {
            return false;
        }
        match state.view() {
            View::CustomNavFiltered(c) => c.nav_item_id == self.id,
            view => self.filter.as_ref() == view.filter(),
        }
    }
}

impl From<CustomNavItem> for NavItem {
    fn from(item: CustomNavItem) -> Self {
        Self {
            id: item.id,
            label: item.title,
            mode: Mode::CustomNavFiltered,
            filter: Some(ListFilter::new(item.filter_type, item.filter_value)),
        }
    }
}
