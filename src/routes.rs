use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

lazy_static! {
    static ref EVENT_PATH_REGEX: Regex =
        Regex::new(r"^/events/(\d+)/?$").expect("Failed to create event path regex");
}

/// Views a user can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Listing,
    Event(u64),
    Login,
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();

        match path {
            "" | "/" => Some(Route::Listing),
            "/login" | "/login/" => Some(Route::Login),
            _ => EVENT_PATH_REGEX
                .captures(path)
                .and_then(|captures| captures[1].parse().ok())
                .map(Route::Event),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Listing => write!(f, "/"),
            Route::Event(id) => write!(f, "/events/{}", id),
            Route::Login => write!(f, "/login"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Listing));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/events/42"), Some(Route::Event(42)));
        assert_eq!(Route::parse("/events/42/"), Some(Route::Event(42)));
    }

    #[test_log::test]
    fn when_path_is_unknown_should_not_parse() {
        assert_eq!(Route::parse("/events/abc"), None);
        assert_eq!(Route::parse("/events/"), None);
        assert_eq!(Route::parse("/faq"), None);
    }

    #[test_log::test]
    fn should_display_paths() {
        assert_eq!(Route::Event(7).to_string(), "/events/7");
        assert_eq!(Route::parse(&Route::Login.to_string()), Some(Route::Login));
    }
}
