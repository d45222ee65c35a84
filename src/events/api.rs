use super::{dto::EventResponse, model::Event};
use crate::error::APIError;
use reqwest::Client;
use tracing::{error, info};

pub const EVENTS_URL: &str = "https://api.hackthenorth.com/v3/events";

/// Read-only client of the remote event feed.
/// Every call fetches the whole collection again; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct EventsAPI {
    client: Client,
    url: String,
}

impl Default for EventsAPI {
    fn default() -> Self {
        Self::new(EVENTS_URL)
    }
}

impl EventsAPI {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /**
    Returns every event in the order the feed sends them
    */
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn get_events(&self) -> Result<Vec<Event>, APIError> {
        info!("Getting all events");

        let json_response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .inspect_err(|err| error!("Request failed: {}", err))?
            .text()
            .await?;

        match serde_json::from_str::<Vec<EventResponse>>(&json_response) {
            Ok(parsed_response) => {
                let events: Vec<Event> = parsed_response.iter().map(|e| e.to_model()).collect();

                info!("Got {} events", events.len());

                Ok(events)
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(APIError::Decode(e))
            }
        }
    }
}
