//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose menu listing and profile session calls to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one profile session is live; calls are serialized by a mutex.
//! - Replacing a live session saves it first.

use little_lemon_core::db::{open_db, DbError};
use little_lemon_core::{
    core_version as core_version_inner, filter_menu, init_logging as init_logging_inner,
    ping as ping_inner, Catalog, Category, MenuItem, MenuQuery, NotificationKind, PersonaProfile,
    ProfileEdit, ProfileField, ProfileSession, ProfileStore, SessionState,
    SqliteKeyValueRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const PROFILE_DB_FILE_NAME: &str = "little_lemon.sqlite3";
const DB_PATH_ENV: &str = "LITTLE_LEMON_DB_PATH";
const EMPTY_MENU_MESSAGE: &str = "No items found";

static PROFILE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static CATALOG: OnceLock<Catalog> = OnceLock::new();

type FfiSession = ProfileSession<SqliteKeyValueRepository>;
static PROFILE_SESSION: Mutex<Option<FfiSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Menu row rendered by the item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuListItem {
    /// Stable item ID in string form.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display price, e.g. `$12.99`.
    pub price: String,
    pub image_name: String,
    /// Category label (`Starters|Mains|Dessert|Drinks`).
    pub category: String,
}

/// Menu list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuListResponse {
    pub ok: bool,
    /// Filtered rows; empty on failure or when nothing matches.
    pub items: Vec<MenuListItem>,
    /// Placeholder text for empty lists, or the failure reason.
    pub message: String,
}

/// Profile form state exposed to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

/// Profile session envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub ok: bool,
    /// In-memory profile after the call; `None` on failure.
    pub profile: Option<ProfileView>,
    /// Whether the profile differs from the last loaded or saved one.
    pub has_unsaved_changes: bool,
    /// Set after logout: the profile screen should be dismissed.
    pub navigate_away: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ProfileResponse {
    fn success(message: impl Into<String>, session: &FfiSession) -> Self {
        Self {
            ok: true,
            profile: Some(to_profile_view(session.profile())),
            has_unsaved_changes: session.has_unsaved_changes(),
            navigate_away: session.state() == SessionState::LoggedOut,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            profile: None,
            has_unsaved_changes: false,
            navigate_away: false,
            message: message.into(),
        }
    }
}

/// Category labels in picker order.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_categories() -> Vec<String> {
    Category::ALL
        .into_iter()
        .map(|category| category.label().to_string())
        .collect()
}

/// Lists menu items of one category narrowed by search text.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - `category` is matched case-insensitively against picker labels.
/// - Empty `query` lists the whole category.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_items(category: String, query: String) -> MenuListResponse {
    let Some(category) = Category::from_label(&category) else {
        return MenuListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("menu_items failed: unknown category `{}`", category.trim()),
        };
    };

    let catalog = CATALOG.get_or_init(Catalog::little_lemon);
    let items = filter_menu(catalog.all(), &MenuQuery::new(category, query))
        .into_iter()
        .map(to_menu_list_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        EMPTY_MENU_MESSAGE.to_string()
    } else {
        format!("Found {} item(s).", items.len())
    };

    MenuListResponse {
        ok: true,
        items,
        message,
    }
}

/// Starts a profile session for the profile screen.
///
/// # FFI contract
/// - DB-backed; opens the profile database.
/// - A still-editable previous session is saved before being replaced.
/// - Returns the restored profile, or defaults when none is stored.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_start() -> ProfileResponse {
    let mut session = match open_session() {
        Ok(session) => session,
        Err(err) => return ProfileResponse::failure(format!("profile_start failed: {err}")),
    };

    let mut slot = lock_session();
    if let Some(previous) = slot.as_mut() {
        if matches!(previous.state(), SessionState::Active) {
            if let Err(err) = previous.end() {
                warn!("event=ffi_profile_start module=ffi status=warn error={err}");
            }
        }
    }

    if let Err(err) = session.start() {
        return ProfileResponse::failure(format!("profile_start failed: {err}"));
    }
    let response = ProfileResponse::success("Profile loaded.", &session);
    *slot = Some(session);
    response
}

/// Sets one text field of the in-memory profile.
///
/// `field` is one of `first_name|last_name|email|phone_number`.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_field(field: String, value: String) -> ProfileResponse {
    let Some(field) = ProfileField::from_key(&field) else {
        return ProfileResponse::failure(format!(
            "profile_set_field failed: unknown field `{}`",
            field.trim()
        ));
    };
    with_session("profile_set_field", "Profile updated.", |session| {
        session.apply(ProfileEdit::SetText(field, value))
    })
}

/// Toggles one notification flag of the in-memory profile.
///
/// `kind` is one of `order_statuses|password_changes|special_offers|newsletter`.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_toggle_notification(kind: String) -> ProfileResponse {
    let Some(kind) = NotificationKind::from_key(&kind) else {
        return ProfileResponse::failure(format!(
            "profile_toggle_notification failed: unknown notification `{}`",
            kind.trim()
        ));
    };
    with_session("profile_toggle_notification", "Profile updated.", |session| {
        session.apply(ProfileEdit::ToggleNotification(kind))
    })
}

/// Reverts unsaved edits.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_discard_changes() -> ProfileResponse {
    with_session("profile_discard_changes", "Changes discarded.", |session| {
        session.discard_changes()
    })
}

/// Saves the profile when the profile screen is dismissed.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_end() -> ProfileResponse {
    with_session("profile_end", "Profile saved.", |session| session.end())
}

/// Clears the profile and its stored copy.
///
/// # FFI contract
/// - Works without a live session (e.g. from the settings screen): a fresh
///   session is opened only to log out.
/// - On success `navigate_away` is `true`.
/// - When the stored copy cannot be deleted the session is left as it was.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_log_out() -> ProfileResponse {
    let mut slot = lock_session();
    if slot.is_none() {
        match open_session() {
            Ok(session) => *slot = Some(session),
            Err(err) => return ProfileResponse::failure(format!("profile_log_out failed: {err}")),
        }
    }
    run_on_session(&mut slot, "profile_log_out", "Logged out.", |session| {
        session.log_out().map(|_| ())
    })
}

fn with_session(
    operation: &str,
    success_message: &str,
    f: impl FnOnce(&mut FfiSession) -> little_lemon_core::SessionResult<()>,
) -> ProfileResponse {
    let mut slot = lock_session();
    run_on_session(&mut slot, operation, success_message, f)
}

fn run_on_session(
    slot: &mut Option<FfiSession>,
    operation: &str,
    success_message: &str,
    f: impl FnOnce(&mut FfiSession) -> little_lemon_core::SessionResult<()>,
) -> ProfileResponse {
    let Some(session) = slot.as_mut() else {
        return ProfileResponse::failure(format!(
            "{operation} failed: profile session has not been started"
        ));
    };

    match f(session) {
        Ok(()) => ProfileResponse::success(success_message, session),
        Err(err) => ProfileResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn open_session() -> Result<FfiSession, DbError> {
    let conn = open_db(resolve_profile_db_path())?;
    Ok(ProfileSession::new(ProfileStore::new(
        SqliteKeyValueRepository::new(conn),
    )))
}

fn lock_session() -> MutexGuard<'static, Option<FfiSession>> {
    // A panic while holding the lock leaves a plain value behind; keep serving.
    PROFILE_SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_profile_db_path() -> PathBuf {
    PROFILE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(PROFILE_DB_FILE_NAME)
        })
        .clone()
}

fn to_menu_list_item(item: &MenuItem) -> MenuListItem {
    MenuListItem {
        id: item.id().to_string(),
        name: item.name().to_string(),
        description: item.description().to_string(),
        price: item.price().to_string(),
        image_name: item.image_name().to_string(),
        category: item.category().label().to_string(),
    }
}

fn to_profile_view(profile: &PersonaProfile) -> ProfileView {
    let prefs = &profile.notification_preferences;
    ProfileView {
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        email: profile.email.clone(),
        phone_number: profile.phone_number.clone(),
        order_statuses: prefs.order_statuses,
        password_changes: prefs.password_changes,
        special_offers: prefs.special_offers,
        newsletter: prefs.newsletter,
    }
}
