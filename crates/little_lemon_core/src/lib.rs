//! Core domain logic for the Little Lemon client.
//! This crate owns menu filtering and local profile persistence; rendering
//! layers only read its results and forward user edits.

pub mod catalog;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use catalog::{Catalog, CatalogError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::menu::{Category, MenuItem, MenuItemId, Price};
pub use model::profile::{
    NotificationKind, NotificationPreferences, PersonaProfile, ProfileEdit, ProfileField,
};
pub use repo::kv_repo::{KeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository};
pub use search::menu_filter::{by_category, by_search, filter_menu, MenuQuery};
pub use service::profile_session::{
    EditingScope, ProfileSession, SessionError, SessionResult, SessionSignal, SessionState,
};
pub use service::profile_store::{ProfileStore, PROFILE_STORAGE_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
