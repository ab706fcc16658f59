use std::{cell::Cell, time::Duration};

use mediadex::Res;
use mediadex::navigation::{
    ContentState, Detail, Entity, EntityRef, EntitySource, HydrationOutcome, HydrationTarget,
    MemoryHistory, Mode, NavItem, NavigationController, View, encode,
};
use mediadex::types::{Group, Movie, Person, PersonKind};

// In-memory source that counts how often it is asked
struct FakeSource {
    movies: Vec<Movie>,
    people: Vec<Person>,
    calls: Cell<usize>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            movies: vec![Movie {
                code: Some("ABC-1".to_string()),
                title: "First Movie".to_string(),
                ..Default::default()
            }],
            people: vec![Person {
                id: Some("p1".to_string()),
                kind: PersonKind::Actress,
                name: "Yui Hatano".to_string(),
                aliases: vec!["波多野結衣".to_string()],
                birth_date: None,
                profile_image: None,
            }],
            calls: Cell::new(0),
        }
    }
}

impl EntitySource for FakeSource {
    async fn fetch(&self, target: &HydrationTarget) -> Res<Entity> {
        self.calls.set(self.calls.get() + 1);
        match target {
            HydrationTarget::Movie(r) => self
                .movies
                .iter()
                .find(|m| m.code.as_deref() == Some(r.key()))
                .cloned()
                .map(Entity::Movie)
                .ok_or_else(|| "404 Not Found".into()),
            HydrationTarget::Profile(p) => self
                .people
                .iter()
                .find(|person| person.kind == p.kind && person.name == p.name)
                .cloned()
                .map(Entity::Person)
                .ok_or_else(|| "404 Not Found".into()),
            _ => Err("404 Not Found".into()),
        }
    }
}

fn controller_at(url: &str) -> NavigationController<MemoryHistory> {
    NavigationController::new(MemoryHistory::new(url), NavItem::builtin())
}

#[tokio::test]
async fn test_pending_movie_is_resolved() {
    let source = FakeSource::new();
    let mut nav = controller_at("/movie/ABC-1");
    assert_eq!(nav.current().title(), "ABC-1");

    let outcome = nav.hydrate(&source).await;
    assert_eq!(outcome, Some(HydrationOutcome::Applied));
    assert_eq!(source.calls.get(), 1);

    match nav.current().view() {
        View::MovieDetail(Detail::Resolved(movie)) => assert_eq!(movie.title, "First Movie"),
        other => panic!("unexpected view {:?}", other),
    }
    assert_eq!(nav.current().title(), "First Movie");
    assert_eq!(nav.browser().current_url(), "/movie/ABC-1");
}

#[tokio::test]
async fn test_resolved_view_needs_no_fetch() {
    let source = FakeSource::new();
    let mut nav = controller_at("/movie/ABC-1");
    nav.hydrate(&source).await;

    assert_eq!(nav.hydrate(&source).await, None);
    assert_eq!(source.calls.get(), 1);

    let mut list = controller_at("/movies");
    assert_eq!(list.hydrate(&source).await, None);
    assert_eq!(source.calls.get(), 1);
}

#[tokio::test]
async fn test_missing_movie_falls_back_to_movies() {
    let source = FakeSource::new();
    let mut nav = controller_at("/movie/NOPE-404");

    let outcome = nav.hydrate(&source).await;
    assert_eq!(outcome, Some(HydrationOutcome::FellBack(Mode::Movies)));
    assert_eq!(nav.current().mode(), Mode::Movies);
    assert_eq!(nav.browser().current_url(), "/movies");
}

#[tokio::test]
async fn test_unknown_identifier_falls_back() {
    let source = FakeSource::new();
    let mut nav = controller_at("/movie/unknown");

    let outcome = nav.hydrate(&source).await;
    assert_eq!(outcome, Some(HydrationOutcome::FellBack(Mode::Movies)));
}

#[tokio::test]
async fn test_profile_is_resolved_by_name() {
    let source = FakeSource::new();
    let mut nav = controller_at("/profile/actress/Yui%20Hatano");

    assert_eq!(nav.hydrate(&source).await, Some(HydrationOutcome::Applied));
    match nav.current().view() {
        View::Profile(Detail::Resolved(person)) => assert_eq!(person.id.as_deref(), Some("p1")),
        other => panic!("unexpected view {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_actor_falls_back_to_actors() {
    let source = FakeSource::new();
    let mut nav = controller_at("/profile/actor/Nobody");

    let outcome = nav.hydrate(&source).await;
    assert_eq!(outcome, Some(HydrationOutcome::FellBack(Mode::Actors)));
    assert_eq!(nav.browser().current_url(), "/actors");
}

#[tokio::test]
async fn test_missing_group_falls_back_to_groups() {
    let source = FakeSource::new();
    let mut nav = controller_at("/group/g-9");

    let outcome = nav.hydrate(&source).await;
    assert_eq!(outcome, Some(HydrationOutcome::FellBack(Mode::Groups)));
}

#[test]
fn test_same_target_is_claimed_once() {
    let mut nav = controller_at("/movie/ABC-1");

    let target = nav.next_hydration();
    assert_eq!(
        target,
        Some(HydrationTarget::Movie(EntityRef::from_key("ABC-1")))
    );
    // Still in flight
    assert_eq!(nav.next_hydration(), None);

    let failed: Result<Entity, &str> = Err("timeout");
    let target = target.unwrap();
    nav.complete_hydration(&target, failed);
    assert_eq!(nav.current().mode(), Mode::Movies);
}

#[test]
fn test_response_for_a_left_view_is_dropped() {
    let mut nav = controller_at("/movie/ABC-1");
    let target = nav.next_hydration().unwrap();

    assert!(nav.select_nav_item("tags"));

    let movie = Movie {
        code: Some("ABC-1".to_string()),
        ..Default::default()
    };
    let outcome = nav.complete_hydration::<&str>(&target, Ok(Entity::Movie(movie)));
    assert_eq!(outcome, HydrationOutcome::Stale);
    assert_eq!(nav.current().mode(), Mode::Tags);
}

#[test]
fn test_claim_is_released_after_a_stale_response() {
    let mut nav = controller_at("/movie/ABC-1");
    let target = nav.next_hydration().unwrap();

    nav.drill_down(ContentState::movies());
    nav.complete_hydration::<&str>(&target, Err("late"));

    // Coming back to the same pending movie can fetch it again
    nav.go_back();
    assert_eq!(nav.next_hydration(), Some(target));
}

#[test]
fn test_entity_of_the_wrong_kind_falls_back() {
    let mut nav = controller_at("/movie/ABC-1");
    let target = nav.next_hydration().unwrap();

    let outcome = nav.complete_hydration::<&str>(&target, Ok(Entity::Group(Group::default())));
    assert_eq!(outcome, HydrationOutcome::FellBack(Mode::Movies));
}

#[test]
fn test_url_follows_the_resolved_code() {
    let mut nav = controller_at("/movie/64f0c1");
    let target = nav.next_hydration().unwrap();

    let movie = Movie {
        id: Some("64f0c1".to_string()),
        code: Some("ABP-123".to_string()),
        title: "Entered By Id".to_string(),
        ..Default::default()
    };
    let outcome = nav.complete_hydration::<&str>(&target, Ok(Entity::Movie(movie)));
    assert_eq!(outcome, HydrationOutcome::Applied);
    assert_eq!(nav.browser().current_url(), "/movie/ABP-123");
    assert_eq!(encode(nav.current()), nav.browser().current_url());
}

// Source whose fetch never finishes
struct StalledSource;

impl EntitySource for StalledSource {
    async fn fetch(&self, _target: &HydrationTarget) -> Res<Entity> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_abandoned_fetch_can_be_retried() {
    let mut nav = controller_at("/movie/ABC-1");

    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), nav.hydrate(&StalledSource)).await;
    assert!(abandoned.is_err());
    assert!(nav.current().view().identifier().is_some());

    // The view is still pending and nothing is left claimed
    let source = FakeSource::new();
    assert_eq!(nav.hydrate(&source).await, Some(HydrationOutcome::Applied));
    assert_eq!(source.calls.get(), 1);
}

#[test]
fn test_released_claim_can_be_taken_again() {
    let mut nav = controller_at("/photobook/PB-1");
    let target = nav.next_hydration().unwrap();
    assert_eq!(nav.next_hydration(), None);

    assert!(nav.release_hydration(&target));
    assert!(!nav.release_hydration(&target));
    assert_eq!(nav.current().mode(), Mode::PhotobookDetail);
    assert_eq!(nav.next_hydration(), Some(target));
}
