use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const EVENTS_JSON: &str = r##"[
  {
    "id": 2,
    "name": "Sponsor Mixer",
    "event_type": "activity",
    "permission": "private",
    "start_time": 1610447400000,
    "end_time": 1610451000000,
    "description": "Meet the sponsors.",
    "speakers": [],
    "public_url": "",
    "private_url": "https://example.com/mixer",
    "related_events": [1]
  },
  {
    "id": 1,
    "name": "Workshop Intro",
    "event_type": "workshop",
    "permission": "public",
    "start_time": 1610445600000,
    "end_time": 1610449200000,
    "description": "Getting started with the hackathon.",
    "speakers": [{ "name": "Ada Lovelace" }],
    "public_url": "https://example.com/intro",
    "private_url": "",
    "related_events": [2, 999]
  },
  {
    "id": 3,
    "name": "Lunch",
    "event_type": "snack_break",
    "permission": "public",
    "start_time": 1610532000000,
    "end_time": 1610532000000,
    "description": null,
    "speakers": [],
    "related_events": []
  }
]"##;

/// Serves a single HTTP response on a local port and returns the URL to hit.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}/v3/events", address)
}
