use crate::events::model::{Event, EventType};
use crate::session::{Session, SessionStorage};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

impl TypeFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(event_type) => event.event_type == *event_type,
        }
    }

    /// "All" followed by every known event type, in pill order
    pub fn choices() -> Vec<TypeFilter> {
        std::iter::once(TypeFilter::All)
            .chain(EventType::KNOWN.into_iter().map(TypeFilter::Only))
            .collect()
    }

    pub fn slug(&self) -> &str {
        match self {
            TypeFilter::All => ALL,
            TypeFilter::Only(event_type) => event_type.slug(),
        }
    }

    /// False for a type the feed has never been known to send
    pub fn is_known(&self) -> bool {
        !matches!(self, TypeFilter::Only(EventType::Other(_)))
    }
}

impl FromStr for TypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase();

        if slug == ALL {
            return Ok(TypeFilter::All);
        }

        let event_type = EventType::from_str(&slug).unwrap_or(EventType::Other(slug));

        Ok(TypeFilter::Only(event_type))
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => write!(f, "All"),
            TypeFilter::Only(event_type) => write!(f, "{}", event_type),
        }
    }
}

/// Case-insensitive substring match on name or description.
/// A blank query matches everything.
pub fn matches_query(event: &Event, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();

    event.name.to_lowercase().contains(&query)
        || event.description.to_lowercase().contains(&query)
}

/// Events the session may see that match the type and the text query,
/// in input order.
pub fn filter<S: SessionStorage>(
    events: &[Event],
    session: &Session<S>,
    query: &str,
    type_filter: &TypeFilter,
) -> Vec<Event> {
    events
        .iter()
        .filter(|e| session.can_view(e))
        .filter(|e| type_filter.matches(e))
        .filter(|e| matches_query(e, query))
        .cloned()
        .collect()
}

/// Same as [`filter`] without the visibility stage. The schedule shows
/// private events locked instead of hiding them.
pub fn filter_matching(events: &[Event], query: &str, type_filter: &TypeFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|e| type_filter.matches(e))
        .filter(|e| matches_query(e, query))
        .cloned()
        .collect()
}
