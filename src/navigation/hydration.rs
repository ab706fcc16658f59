use crate::{
    Res,
    navigation::state::{Detail, EntityRef, Mode, ProfileRef, View},
    types::{Group, Movie, Person, PersonKind, Photobook, SoftMovie},
};

/// What a pending detail view is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HydrationTarget {
    Movie(EntityRef),
    SoftMovie(EntityRef),
    Photobook(EntityRef),
    Group(EntityRef),
    Profile(ProfileRef),
}

impl HydrationTarget {
    /// Pending target of `view`, if any.
    pub fn of(view: &View) -> Option<Self> {
        match view {
            View::MovieDetail(Detail::Pending(r)) => Some(HydrationTarget::Movie(r.clone())),
            View::ScMovieDetail(Detail::Pending(r)) => Some(HydrationTarget::SoftMovie(r.clone())),
            View::PhotobookDetail(Detail::Pending(r)) => {
                Some(HydrationTarget::Photobook(r.clone()))
            }
            View::GroupDetail(Detail::Pending(r)) => Some(HydrationTarget::Group(r.clone())),
            View::Profile(Detail::Pending(r)) => Some(HydrationTarget::Profile(r.clone())),
            _ => None,
        }
    }

    /// List shown when the fetch for this target fails.
    pub fn parent_view(&self) -> View {
        match self {
            HydrationTarget::Movie(_) => View::Movies,
            HydrationTarget::SoftMovie(_) => View::Soft,
            HydrationTarget::Photobook(_) => View::Photobooks,
            HydrationTarget::Group(_) => View::Groups,
            HydrationTarget::Profile(p) => match p.kind {
                PersonKind::Actress => View::Actresses,
                PersonKind::Actor => View::Actors,
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            HydrationTarget::Movie(r) => format!("movie {}", r.key()),
            HydrationTarget::SoftMovie(r) => format!("soft movie {}", r.key()),
            HydrationTarget::Photobook(r) => format!("photobook {}", r.key()),
            HydrationTarget::Group(r) => format!("group {}", r.key()),
            HydrationTarget::Profile(p) => format!("{} {}", p.kind.as_str(), p.name),
        }
    }

    /// Resolved view for this target, or `None` if `entity` is of another kind.
    pub fn resolve(&self, entity: Entity) -> Option<View> {
        let view = match (self, entity) {
            (HydrationTarget::Movie(_), Entity::Movie(m)) => View::MovieDetail(Detail::Resolved(m)),
            (HydrationTarget::SoftMovie(_), Entity::SoftMovie(m)) => {
                View::ScMovieDetail(Detail::Resolved(m))
            }
            (HydrationTarget::Photobook(_), Entity::Photobook(p)) => {
                View::PhotobookDetail(Detail::Resolved(p))
            }
            (HydrationTarget::Group(_), Entity::Group(g)) => View::GroupDetail(Detail::Resolved(g)),
            (HydrationTarget::Profile(_), Entity::Person(p)) => View::Profile(Detail::Resolved(p)),
            _ => return None,
        };
        Some(view)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Movie(Movie),
    SoftMovie(SoftMovie),
    Photobook(Photobook),
    Group(Group),
    Person(Person),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// The entity replaced the pending payload of the current view.
    Applied,
    /// The user left the view before the response arrived.
    Stale,
    /// The fetch failed and the parent list is shown instead.
    FellBack(Mode),
}

/// Fetch-by-identifier boundary used to hydrate pending detail views.
#[allow(async_fn_in_trait)]
pub trait EntitySource {
    async fn fetch(&self, target: &HydrationTarget) -> Res<Entity>;
}
