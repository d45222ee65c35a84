//! Login state and the public/private visibility gate.
//!
//! This is a UX gate only. The full collection, private fields included, is
//! fetched and held in memory whatever the session state is.

use crate::events::model::{Event, Visibility};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Non-production stub credentials, compiled in on purpose.
pub const USERNAME: &str = "hacker";
pub const PASSWORD: &str = "htn2026";

pub const AUTH_KEY: &str = "htn_auth";
const AUTHENTICATED_VALUE: &str = "true";

/// Session-scoped key/value storage, cleared when the session ends.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Storage that lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One file per key inside `dir`. Removing the directory ends the session.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!("Couldn't read session key '{}': {}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) =
            fs::create_dir_all(&self.dir).and_then(|_| fs::write(self.path(key), value))
        {
            warn!("Couldn't persist session key '{}': {}", key, err);
        }
    }

    fn remove(&mut self, key: &str) {
        match fs::remove_file(self.path(key)) {
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("Couldn't clear session key '{}': {}", key, err),
        }
    }
}

/// Either anonymous or authenticated. `login` and `logout` are the only writers.
#[derive(Debug)]
pub struct Session<S: SessionStorage = MemoryStorage> {
    storage: S,
    authenticated: bool,
}

impl Default for Session<MemoryStorage> {
    fn default() -> Self {
        Self::restore(MemoryStorage::default())
    }
}

impl<S: SessionStorage> Session<S> {
    /// Restores the login state previously persisted in `storage`
    pub fn restore(storage: S) -> Self {
        let authenticated = storage.get(AUTH_KEY).as_deref() == Some(AUTHENTICATED_VALUE);

        if authenticated {
            info!("Restored authenticated session");
        }

        Self {
            storage,
            authenticated,
        }
    }

    #[instrument(skip(self, password))]
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if username != USERNAME || password != PASSWORD {
            warn!("Invalid credentials");
            return false;
        }

        self.authenticated = true;
        self.storage.set(AUTH_KEY, AUTHENTICATED_VALUE);

        info!("Logged in");

        true
    }

    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.storage.remove(AUTH_KEY);

        info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn can_view(&self, event: &Event) -> bool {
        match event.visibility {
            Visibility::Public => true,
            Visibility::Private => self.authenticated,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
