use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::fmt::Display;

const DEFAULT_COLOR: &str = "#3a4a5a";
const DEFAULT_BORDER_COLOR: &str = "#60a5fa";

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub event_type: EventType,
    pub visibility: Visibility,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub speakers: Vec<Speaker>,
    pub public_url: Option<String>,
    pub private_url: Option<String>,
    pub related_event_ids: Vec<u64>,
}

impl Event {
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Speaker names joined for display, e.g. "Ada, Grace"
    pub fn speaker_names(&self) -> String {
        self.speakers.iter().map(|speaker| &speaker.name).join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
}

/// Kind of event. Values the API may add later land in `Other` and are
/// rendered with the default style.
#[derive(strum::EnumString, Debug, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    Workshop,
    TechTalk,
    Activity,
    #[strum(default)]
    Other(String),
}

impl EventType {
    pub const KNOWN: [EventType; 3] = [
        EventType::Workshop,
        EventType::TechTalk,
        EventType::Activity,
    ];

    pub fn slug(&self) -> &str {
        match self {
            EventType::Workshop => "workshop",
            EventType::TechTalk => "tech_talk",
            EventType::Activity => "activity",
            EventType::Other(slug) => slug,
        }
    }

    pub fn card_color(&self) -> &'static str {
        match self {
            EventType::Workshop => "#4a6741",
            EventType::TechTalk => "#6b5b7b",
            EventType::Activity => "#4a6d5a",
            EventType::Other(_) => DEFAULT_COLOR,
        }
    }

    pub fn border_color(&self) -> &'static str {
        match self {
            EventType::Workshop => "#22c55e",
            EventType::TechTalk => "#a855f7",
            EventType::Activity => "#3b82f6",
            EventType::Other(_) => DEFAULT_BORDER_COLOR,
        }
    }
}

/// "tech_talk" is displayed as "Tech Talk"
impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self
            .slug()
            .split('_')
            .map(|word| voca_rs::case::capitalize(word, false))
            .join(" ");

        write!(f, "{}", label)
    }
}

#[derive(serde::Deserialize, strum::IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &'static str = self.into();

        write!(f, "{}", label)
    }
}
