use super::model::{Event, EventType, Speaker, Visibility};
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

// Note: some String fields need the custom deserializer due to being nullable
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: u64,
    pub name: String,
    pub event_type: String,
    pub permission: Visibility,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default)]
    pub speakers: Vec<ResponseSpeaker>,
    #[serde(default, deserialize_with = "deserialize_optional_str")]
    pub public_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_str")]
    pub private_url: Option<String>,
    #[serde(default, rename = "related_events")]
    pub related_event_ids: Vec<u64>,
}

impl EventResponse {
    pub fn to_model(&self) -> Event {
        let event_type = EventType::from_str(&self.event_type)
            .unwrap_or_else(|_| EventType::Other(self.event_type.clone()));

        if let EventType::Other(unknown) = &event_type {
            warn!(
                "Event {} has unknown type '{}', using default style",
                self.id, unknown
            );
        }

        Event {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            event_type,
            visibility: self.permission,
            start_time: self.start_time,
            end_time: self.end_time,
            speakers: self
                .speakers
                .iter()
                .map(|speaker| Speaker {
                    name: speaker.name.to_string(),
                })
                .collect(),
            public_url: self.public_url.clone(),
            private_url: self.private_url.clone(),
            related_event_ids: self.related_event_ids.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseSpeaker {
    #[serde(deserialize_with = "deserialize_str")]
    pub name: String,
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.parse().map_err(de::Error::custom)?,
        _ => String::new(),
    })
}

fn deserialize_optional_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_str(d)?;

    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKSHOP_JSON: &str = r##"
      [{
        "id": 1,
        "name": "Intro to Machine Learning",
        "event_type": "workshop",
        "permission": "public",
        "start_time": 1610442000000,
        "end_time": 1610445600000,
        "description": "Learn the basics of ML.",
        "speakers": [{ "name": "Ada Lovelace" }, { "name": "Grace Hopper" }],
        "public_url": "https://example.com/ml",
        "private_url": "",
        "related_events": [2, 3]
      }]"##;

    #[test_log::test]
    fn should_deserialize_event() {
        let dto = serde_json::from_str::<Vec<EventResponse>>(WORKSHOP_JSON);

        assert!(dto.is_ok(), "{:?}", dto);

        let dto = dto.unwrap();

        assert_eq!(dto.len(), 1);

        let event = dto.first().unwrap().to_model();

        assert_eq!(event.id, 1);
        assert_eq!(event.event_type, EventType::Workshop);
        assert_eq!(event.visibility, Visibility::Public);
        assert_eq!(event.start_time.timestamp_millis(), 1610442000000);
        assert_eq!(event.end_time.timestamp_millis(), 1610445600000);
        assert_eq!(event.speaker_names(), "Ada Lovelace, Grace Hopper");
        assert_eq!(event.public_url.as_deref(), Some("https://example.com/ml"));
        assert_eq!(event.private_url, None, "empty URLs are treated as absent");
        assert_eq!(event.related_event_ids, vec![2, 3]);
    }

    #[test_log::test]
    fn should_deserialize_event_with_missing_optional_fields() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{
              "id": 7,
              "name": "Midnight Snack",
              "event_type": "activity",
              "permission": "private",
              "start_time": 1610442000000,
              "end_time": 1610442000000,
              "description": null
            }"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().to_model();

        assert_eq!(event.description, "");
        assert!(event.speakers.is_empty());
        assert_eq!(event.public_url, None);
        assert!(event.related_event_ids.is_empty());
        assert!(event.is_private());
    }

    #[test_log::test]
    fn when_event_type_is_unknown_should_keep_the_event() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{
              "id": 8,
              "name": "Hardware Lab",
              "event_type": "hardware_lab",
              "permission": "public",
              "start_time": 1610442000000,
              "end_time": 1610445600000
            }"##,
        )
        .unwrap();

        assert_eq!(
            dto.to_model().event_type,
            EventType::Other("hardware_lab".to_string())
        );
    }

    #[test_log::test]
    fn when_permission_is_unknown_should_fail() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{
              "id": 9,
              "name": "Secret",
              "event_type": "activity",
              "permission": "staff",
              "start_time": 1610442000000,
              "end_time": 1610445600000
            }"##,
        );

        assert!(dto.is_err());
    }
}
