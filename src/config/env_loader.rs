use crate::config::model::Config;
use crate::events::api::EVENTS_URL;
use crate::schedule::HOUR_HEIGHT;
use std::env;
use std::path::PathBuf;

const SESSION_DIR_NAME: &str = "eventboard-session";

pub fn load_config() -> Config {
    let events_url = env::var("EVENTS_API_URL").unwrap_or_else(|_| EVENTS_URL.to_string());
    let session_dir = env::var("SESSION_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join(SESSION_DIR_NAME));
    let pixels_per_hour = load_positive_f64_config("PIXELS_PER_HOUR", HOUR_HEIGHT);

    Config {
        events_url,
        session_dir,
        pixels_per_hour,
    }
}

fn load_positive_f64_config(name: &str, default: f64) -> f64 {
    match env::var(name) {
        Ok(value) => parse_positive_f64(name, &value),
        Err(_) => default,
    }
}

fn parse_positive_f64(name: &str, value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => number,
        _ => panic!(
            "Invalid config '{}'. Expected a positive number, got '{}'.",
            name, value
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_parse_positive_numbers() {
        assert_eq!(parse_positive_f64("PIXELS_PER_HOUR", "60"), 60.0);
        assert_eq!(parse_positive_f64("PIXELS_PER_HOUR", " 42.5 "), 42.5);
    }

    #[test_log::test]
    #[should_panic(expected = "Invalid config 'PIXELS_PER_HOUR'")]
    fn when_number_is_not_positive_should_panic() {
        parse_positive_f64("PIXELS_PER_HOUR", "0");
    }

    #[test_log::test]
    #[should_panic(expected = "Expected a positive number")]
    fn when_value_is_not_a_number_should_panic() {
        parse_positive_f64("PIXELS_PER_HOUR", "tall");
    }
}
