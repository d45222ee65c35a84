use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub events_url: String,
    pub session_dir: PathBuf,
    pub pixels_per_hour: f64,
}
