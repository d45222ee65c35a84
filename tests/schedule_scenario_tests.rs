mod common;

use chrono::Utc;
use common::{serve_once, EVENTS_JSON};
use eventboard::detail::{open_detail, DetailOutcome};
use eventboard::events::api::EventsAPI;
use eventboard::events::catalog::EventCatalog;
use eventboard::filter::{filter, TypeFilter};
use eventboard::routes::Route;
use eventboard::schedule::{ScheduleView, HOUR_HEIGHT};
use eventboard::session::{MemoryStorage, Session};

async fn load_catalog() -> EventCatalog {
    let url = serve_once("200 OK", EVENTS_JSON).await;

    EventCatalog::new(EventsAPI::new(&url).get_events().await.unwrap())
}

#[test_log::test(tokio::test)]
async fn private_event_should_unlock_after_login() {
    let catalog = load_catalog().await;
    let mut session = Session::restore(MemoryStorage::default());

    let view = ScheduleView::build(&catalog, &session, "", &TypeFilter::All, HOUR_HEIGHT, &Utc);
    let first_day = &view.days[0].cards;

    assert_eq!(view.days.len(), 2);
    assert_eq!(first_day[0].event.name, "Workshop Intro");
    assert!(!first_day[0].locked);
    assert_eq!(first_day[1].event.name, "Sponsor Mixer");
    assert!(first_day[1].locked);
    assert_eq!(first_day[1].link, Route::Login);

    assert!(!session.login("x", "y"));
    assert!(!session.is_authenticated());

    assert!(session.login("hacker", "htn2026"));

    let view = ScheduleView::build(&catalog, &session, "", &TypeFilter::All, HOUR_HEIGHT, &Utc);

    assert!(view.days[0].cards.iter().all(|card| !card.locked));
    assert_eq!(view.days[0].cards[1].link, Route::Event(2));
}

#[test_log::test(tokio::test)]
async fn listing_should_hide_private_events_until_login() {
    let catalog = load_catalog().await;
    let mut session = Session::default();

    let listing = filter(&catalog, &session, "", &TypeFilter::All);
    assert_eq!(listing.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);

    session.login("hacker", "htn2026");

    let listing = filter(&catalog, &session, "", &TypeFilter::All);
    assert_eq!(listing.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test_log::test(tokio::test)]
async fn detail_should_resolve_visible_related_events() {
    let catalog = load_catalog().await;
    let mut session = Session::default();

    let DetailOutcome::Show(view) = open_detail(&catalog, 1, &session) else {
        panic!("public event should be shown");
    };
    assert!(view.related.is_empty());
    assert_eq!(view.link.as_deref(), Some("https://example.com/intro"));

    assert_eq!(open_detail(&catalog, 2, &session), DetailOutcome::RedirectToLogin);

    session.login("hacker", "htn2026");

    let DetailOutcome::Show(view) = open_detail(&catalog, 1, &session) else {
        panic!("public event should be shown");
    };
    assert_eq!(view.related.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);

    let DetailOutcome::Show(view) = open_detail(&catalog, 2, &session) else {
        panic!("private event should be shown after login");
    };
    assert_eq!(view.link.as_deref(), Some("https://example.com/mixer"));
}
