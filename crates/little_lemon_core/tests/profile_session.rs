use little_lemon_core::db::{open_db, open_db_in_memory};
use little_lemon_core::{
    NotificationKind, PersonaProfile, ProfileEdit, ProfileField, ProfileSession, ProfileStore,
    SessionError, SessionResult, SessionSignal, SessionState, SqliteKeyValueRepository,
};
use std::path::Path;

type Session = ProfileSession<SqliteKeyValueRepository>;

fn session() -> Session {
    ProfileSession::new(ProfileStore::new(SqliteKeyValueRepository::new(
        open_db_in_memory().unwrap(),
    )))
}

fn session_at(path: &Path) -> Session {
    ProfileSession::new(ProfileStore::new(SqliteKeyValueRepository::new(
        open_db(path).unwrap(),
    )))
}

fn set_query_only(session: &Session, enabled: bool) {
    let pragma = if enabled {
        "PRAGMA query_only = ON;"
    } else {
        "PRAGMA query_only = OFF;"
    };
    session
        .store()
        .repository()
        .connection()
        .execute_batch(pragma)
        .unwrap();
}

#[test]
fn start_without_saved_profile_yields_defaults() {
    let mut session = session();
    assert_eq!(session.state(), SessionState::Uninitialized);

    let profile = session.start().unwrap().clone();
    assert_eq!(profile, PersonaProfile::default());
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn start_restores_saved_profile() {
    let mut session = session();
    session.store().save(&PersonaProfile {
        first_name: "Ann".to_string(),
        ..PersonaProfile::default()
    });

    assert_eq!(session.start().unwrap().first_name, "Ann");
    assert!(!session.has_unsaved_changes());
}

#[test]
fn start_twice_is_rejected() {
    let mut session = session();
    session.start().unwrap();
    assert_eq!(session.start().unwrap_err(), SessionError::AlreadyStarted);
}

#[test]
fn edit_before_start_is_rejected() {
    let mut session = session();
    let err = session
        .edit(|profile| profile.first_name = "Ann".to_string())
        .unwrap_err();
    assert_eq!(err, SessionError::NotStarted);
    assert_eq!(session.profile(), &PersonaProfile::default());
    assert_eq!(session.end().unwrap_err(), SessionError::NotStarted);
}

#[test]
fn edits_stay_in_memory_until_end() {
    let mut session = session();
    session.start().unwrap();

    session
        .edit(|profile| profile.first_name = "Ann".to_string())
        .unwrap();
    session
        .apply(ProfileEdit::ToggleNotification(NotificationKind::Newsletter))
        .unwrap();

    assert!(session.has_unsaved_changes());
    assert_eq!(session.store().load(), None);

    session.end().unwrap();
    assert_eq!(session.state(), SessionState::Saved);
    assert!(!session.has_unsaved_changes());

    let stored = session.store().load().expect("end should persist the profile");
    assert_eq!(stored.first_name, "Ann");
    assert!(stored.notification_preferences.newsletter);
}

#[test]
fn edit_after_end_reactivates_the_session() {
    let mut session = session();
    session.start().unwrap();
    session.end().unwrap();

    session
        .apply(ProfileEdit::SetText(ProfileField::LastName, "Lee".to_string()))
        .unwrap();
    assert_eq!(session.state(), SessionState::Active);

    session.end().unwrap();
    assert_eq!(session.store().load().unwrap().last_name, "Lee");
}

#[test]
fn discard_changes_reverts_to_last_saved_profile() {
    let mut session = session();
    session.start().unwrap();
    session
        .apply(ProfileEdit::SetText(ProfileField::Email, "ann@example.com".into()))
        .unwrap();
    session.end().unwrap();

    session
        .apply(ProfileEdit::SetText(ProfileField::Email, "typo@".into()))
        .unwrap();
    session.discard_changes().unwrap();

    assert_eq!(session.profile().email, "ann@example.com");
    assert!(!session.has_unsaved_changes());
}

#[test]
fn log_out_resets_profile_and_deletes_stored_copy() {
    let mut session = session();
    session.start().unwrap();
    session
        .edit(|profile| {
            profile.first_name = "Ann".to_string();
            profile.notification_preferences.order_statuses = true;
        })
        .unwrap();
    session.end().unwrap();
    assert!(session.store().load().is_some());

    let signal = session.log_out().unwrap();

    assert_eq!(signal, SessionSignal::NavigateAway);
    assert_eq!(session.profile(), &PersonaProfile::default());
    assert_eq!(session.store().load(), None);
    assert_eq!(session.state(), SessionState::LoggedOut);
}

#[test]
fn logged_out_session_is_terminal() {
    let mut session = session();
    session.start().unwrap();
    session.log_out().unwrap();

    assert_eq!(session.start().unwrap_err(), SessionError::LoggedOut);
    assert_eq!(
        session
            .edit(|profile| profile.first_name = "Ann".to_string())
            .unwrap_err(),
        SessionError::LoggedOut
    );
    assert_eq!(session.end().unwrap_err(), SessionError::LoggedOut);
    assert_eq!(session.discard_changes().unwrap_err(), SessionError::LoggedOut);
    assert_eq!(session.log_out().unwrap_err(), SessionError::LoggedOut);
    assert!(session.editing().is_err());

    assert_eq!(session.profile(), &PersonaProfile::default());
    assert_eq!(session.store().load(), None);
}

#[test]
fn log_out_of_unstarted_session_still_deletes_stored_profile() {
    let mut session = session();
    session.store().save(&PersonaProfile {
        first_name: "Ann".to_string(),
        ..PersonaProfile::default()
    });

    session.log_out().unwrap();
    assert_eq!(session.store().load(), None);
}

#[test]
fn failed_delete_leaves_session_logged_in() {
    let mut session = session();
    session.start().unwrap();
    session
        .apply(ProfileEdit::SetText(ProfileField::FirstName, "Ann".into()))
        .unwrap();
    session.end().unwrap();

    set_query_only(&session, true);
    assert_eq!(session.log_out(), Err(SessionError::StorageUnavailable));
    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(session.profile().first_name, "Ann");
    assert!(!session.has_unsaved_changes());
    assert_eq!(session.store().load().unwrap().first_name, "Ann");

    set_query_only(&session, false);
    assert_eq!(session.log_out(), Ok(SessionSignal::NavigateAway));
    assert_eq!(session.store().load(), None);
    assert_eq!(session.profile(), &PersonaProfile::default());
}

#[test]
fn failed_save_on_end_keeps_changes_unsaved() {
    let mut session = session();
    session.start().unwrap();
    session
        .apply(ProfileEdit::SetText(ProfileField::Email, "ann@example.com".into()))
        .unwrap();

    set_query_only(&session, true);
    session.end().unwrap();

    assert_eq!(session.state(), SessionState::Saved);
    assert!(session.has_unsaved_changes());
    assert_eq!(session.store().load(), None);

    set_query_only(&session, false);
    session.end().unwrap();
    assert!(!session.has_unsaved_changes());
    assert_eq!(session.store().load().unwrap().email, "ann@example.com");
}

#[test]
fn editing_scope_saves_when_log_out_fails() {
    let mut session = session();
    session.start().unwrap();
    set_query_only(&session, true);

    let mut scope = session.editing().unwrap();
    scope
        .edit(|profile| profile.first_name = "Ann".to_string())
        .unwrap();
    assert_eq!(scope.log_out(), Err(SessionError::StorageUnavailable));

    // The dropped scope ran `end`, whose write also failed.
    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(session.profile().first_name, "Ann");
    assert!(session.has_unsaved_changes());
}

#[test]
fn save_then_log_out_leaves_nothing_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let mut first = session_at(&path);
    assert_eq!(first.store().load(), None);
    first.start().unwrap();
    first
        .edit(|profile| profile.first_name = "Ann".to_string())
        .unwrap();
    first.end().unwrap();
    first.log_out().unwrap();
    drop(first);

    let mut second = session_at(&path);
    assert_eq!(second.store().load(), None);
    assert_eq!(second.start().unwrap(), &PersonaProfile::default());
}

#[test]
fn profile_is_restored_by_the_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let mut first = session_at(&path);
    first.start().unwrap();
    first
        .apply(ProfileEdit::SetText(ProfileField::PhoneNumber, "555-0100".into()))
        .unwrap();
    first.end().unwrap();
    drop(first);

    let mut second = session_at(&path);
    assert_eq!(second.start().unwrap().phone_number, "555-0100");
}

#[test]
fn editing_scope_saves_on_drop() {
    let mut session = session();
    session.start().unwrap();

    {
        let mut scope = session.editing().unwrap();
        scope
            .edit(|profile| profile.first_name = "Ann".to_string())
            .unwrap();
        assert_eq!(scope.first_name, "Ann");
    }

    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(session.store().load().unwrap().first_name, "Ann");
}

#[test]
fn editing_scope_saves_on_early_return() {
    fn fill_form(session: &mut Session) -> SessionResult<()> {
        let mut scope = session.editing()?;
        scope.apply(ProfileEdit::SetText(ProfileField::FirstName, "Ann".into()))?;
        Err(SessionError::NotStarted)
    }

    let mut session = session();
    session.start().unwrap();

    assert!(fill_form(&mut session).is_err());
    assert_eq!(session.store().load().unwrap().first_name, "Ann");
}

#[test]
fn editing_scope_requires_started_session() {
    let mut session = session();
    assert_eq!(session.editing().err(), Some(SessionError::NotStarted));
}

#[test]
fn editing_scope_log_out_skips_save() {
    let mut session = session();
    session.start().unwrap();

    let mut scope = session.editing().unwrap();
    scope
        .edit(|profile| profile.first_name = "Ann".to_string())
        .unwrap();
    let signal = scope.log_out().unwrap();

    assert_eq!(signal, SessionSignal::NavigateAway);
    assert_eq!(session.store().load(), None);
    assert_eq!(session.profile(), &PersonaProfile::default());
}

#[test]
fn editing_scope_close_saves_once() {
    let mut session = session();
    session.start().unwrap();

    let mut scope = session.editing().unwrap();
    scope.discard_changes().unwrap();
    scope
        .apply(ProfileEdit::ToggleNotification(NotificationKind::SpecialOffers))
        .unwrap();
    scope.close().unwrap();

    assert!(session.store().load().unwrap().notification_preferences.special_offers);
}
