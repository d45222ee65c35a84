use super::model::Event;
use std::ops::Deref;

/// The fetched event collection, sorted by start time once and never
/// mutated afterwards. Events starting at the same instant keep feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(mut events: Vec<Event>) -> Self {
        // stable
        events.sort_by_key(|event| event.start_time);

        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Deref for EventCatalog {
    type Target = [Event];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

/// State of an outstanding fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for LoadState<T>
where
    E: std::fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }
}
