use crate::error::NotFoundError;
use crate::events::model::Event;
use crate::session::{Session, SessionStorage};
use tracing::{debug, info};

/// Looks up an event in the full collection, private ones included.
/// Callers check [`Session::can_view`] before showing it.
pub fn resolve(events: &[Event], id: u64) -> Result<&Event, NotFoundError> {
    events
        .iter()
        .find(|event| event.id == id)
        .ok_or(NotFoundError { id })
}

/// Related events the session may see, in the order the event lists them.
/// Ids missing from the collection are skipped.
pub fn resolve_related<S: SessionStorage>(
    event: &Event,
    events: &[Event],
    session: &Session<S>,
) -> Vec<Event> {
    event
        .related_event_ids
        .iter()
        .filter_map(|id| match resolve(events, *id) {
            Ok(related) => Some(related),
            Err(err) => {
                debug!("Skipping related event: {}", err);
                None
            }
        })
        .filter(|related| session.can_view(related))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub event: Event,
    pub related: Vec<Event>,
    /// Private link for logged in users when there is one, public otherwise
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Show(DetailView),
    RedirectToLogin,
    NotFound(NotFoundError),
}

#[tracing::instrument(skip(events, session))]
pub fn open_detail<S: SessionStorage>(
    events: &[Event],
    id: u64,
    session: &Session<S>,
) -> DetailOutcome {
    let event = match resolve(events, id) {
        Ok(event) => event,
        Err(err) => return DetailOutcome::NotFound(err),
    };

    if !session.can_view(event) {
        info!("Private event requested without login, redirecting");
        return DetailOutcome::RedirectToLogin;
    }

    let link = match (&event.private_url, session.is_authenticated()) {
        (Some(private_url), true) => Some(private_url.to_string()),
        _ => event.public_url.clone(),
    };

    DetailOutcome::Show(DetailView {
        event: event.clone(),
        related: resolve_related(event, events, session),
        link,
    })
}
