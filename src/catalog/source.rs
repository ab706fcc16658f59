use crate::{
    Res,
    catalog::client::{ApiClient, Collection},
    navigation::{Entity, EntitySource, HydrationTarget},
    types::{Person, PersonKind},
};

/// Resolves pending detail views through the catalog API.
pub struct CatalogSource {
    client: ApiClient,
    token: String,
}

impl CatalogSource {
    pub fn new(client: ApiClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    // People are addressed by name in URLs, so they are looked up in the
    // list rather than by id.
    async fn find_person(&self, kind: PersonKind, name: &str) -> Res<Person> {
        let collection = match kind {
            PersonKind::Actress => Collection::Actresses,
            PersonKind::Actor => Collection::Actors,
        };
        let people: Vec<Person> = self.client.list(collection, &self.token).await?;
        find_by_name(people, name)
            .ok_or_else(|| format!("no {} named {}", kind.as_str(), name).into())
    }
}

impl EntitySource for CatalogSource {
    async fn fetch(&self, target: &HydrationTarget) -> Res<Entity> {
        let token = &self.token;
        let entity = match target {
            HydrationTarget::Movie(r) => Entity::Movie(
                self.client
                    .get_by_id(Collection::Movies, r.key(), token)
                    .await?,
            ),
            HydrationTarget::SoftMovie(r) => Entity::SoftMovie(
                self.client
                    .get_by_id(Collection::SoftMovies, r.key(), token)
                    .await?,
            ),
            HydrationTarget::Photobook(r) => Entity::Photobook(
                self.client
                    .get_by_id(Collection::Photobooks, r.key(), token)
                    .await?,
            ),
            HydrationTarget::Group(r) => Entity::Group(
                self.client
                    .get_by_id(Collection::Groups, r.key(), token)
                    .await?,
            ),
            HydrationTarget::Profile(p) => Entity::Person(self.find_person(p.kind, &p.name).await?),
        };
        Ok(entity)
    }
}

/// Exact name match first, then a case-insensitive match on name or alias.
pub fn find_by_name(people: Vec<Person>, name: &str) -> Option<Person> {
    let wanted = name.trim().to_lowercase();
    let mut fallback = None;
    for person in people {
        if person.name == name {
            return Some(person);
        }
        if fallback.is_none()
            && (person.name.to_lowercase() == wanted
                || person.aliases.iter().any(|a| a.to_lowercase() == wanted))
        {
            fallback = Some(person);
        }
    }
    fallback
}
