//! Profile editing session.
//!
//! # Responsibility
//! - Hold the in-memory profile between load and save/reset.
//! - Trigger persistence only at lifecycle points: `end` saves, `log_out`
//!   resets and deletes.
//!
//! # Invariants
//! - `start` is the only read path and runs once per session instance.
//! - `edit` never touches storage.
//! - `log_out` performs both the reset and the delete, or neither: when the
//!   stored copy cannot be deleted the session is left as it was.
//! - The unsaved-changes baseline only advances after a successful write.
//! - `LoggedOut` is terminal; every later call fails without side effects.

use crate::model::profile::{PersonaProfile, ProfileEdit};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::profile_store::ProfileStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

pub type SessionResult<T> = Result<T, SessionError>;

/// Lifecycle state of a [`ProfileSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Saved,
    LoggedOut,
}

impl SessionState {
    fn label(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Saved => "saved",
            Self::LoggedOut => "logged_out",
        }
    }
}

/// Operation not allowed in the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NotStarted,
    AlreadyStarted,
    LoggedOut,
    /// Storage rejected the write a transition depends on.
    StorageUnavailable,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "profile session has not been started"),
            Self::AlreadyStarted => write!(f, "profile session was already started"),
            Self::LoggedOut => write!(f, "profile session has logged out"),
            Self::StorageUnavailable => write!(f, "profile storage is unavailable"),
        }
    }
}

impl Error for SessionError {}

/// Instruction for the rendering layer after a terminal session action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Dismiss the profile screen.
    NavigateAway,
}

/// In-memory profile editing lifecycle backed by a [`ProfileStore`].
pub struct ProfileSession<R: KeyValueRepository> {
    store: ProfileStore<R>,
    profile: PersonaProfile,
    baseline: PersonaProfile,
    state: SessionState,
}

impl<R: KeyValueRepository> ProfileSession<R> {
    pub fn new(store: ProfileStore<R>) -> Self {
        Self {
            store,
            profile: PersonaProfile::default(),
            baseline: PersonaProfile::default(),
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current in-memory profile.
    pub fn profile(&self) -> &PersonaProfile {
        &self.profile
    }

    pub fn store(&self) -> &ProfileStore<R> {
        &self.store
    }

    /// Loads the stored profile, falling back to defaults.
    ///
    /// # Errors
    /// - `AlreadyStarted` when called a second time.
    /// - `LoggedOut` after [`Self::log_out`].
    pub fn start(&mut self) -> SessionResult<&PersonaProfile> {
        match self.state {
            SessionState::Uninitialized => {}
            SessionState::LoggedOut => return Err(SessionError::LoggedOut),
            SessionState::Active | SessionState::Saved => {
                return Err(SessionError::AlreadyStarted)
            }
        }

        let loaded = self.store.load();
        info!(
            "event=session_start module=session status=ok restored={}",
            loaded.is_some()
        );
        self.profile = loaded.unwrap_or_default();
        self.baseline = self.profile.clone();
        self.state = SessionState::Active;
        Ok(&self.profile)
    }

    /// Applies an in-place change to the in-memory profile.
    ///
    /// A saved session becomes active again. Nothing is persisted.
    pub fn edit<F>(&mut self, mutator: F) -> SessionResult<()>
    where
        F: FnOnce(&mut PersonaProfile),
    {
        self.ensure_started()?;
        mutator(&mut self.profile);
        self.state = SessionState::Active;
        Ok(())
    }

    /// Applies one field-level edit forwarded from the form.
    pub fn apply(&mut self, edit: ProfileEdit) -> SessionResult<()> {
        self.edit(|profile| profile.apply(edit))
    }

    /// Whether the in-memory profile differs from the last loaded or saved one.
    pub fn has_unsaved_changes(&self) -> bool {
        self.profile != self.baseline
    }

    /// Reverts the in-memory profile to the last loaded or saved one.
    pub fn discard_changes(&mut self) -> SessionResult<()> {
        self.ensure_started()?;
        self.profile = self.baseline.clone();
        info!("event=session_discard module=session status=ok");
        Ok(())
    }

    /// Persists the current profile when the editing surface closes.
    ///
    /// A failed write is logged, not returned; the edits then still count as
    /// unsaved.
    pub fn end(&mut self) -> SessionResult<()> {
        self.ensure_started()?;
        self.state = SessionState::Saved;
        if self.store.try_save(&self.profile).is_err() {
            warn!("event=session_end module=session status=error error_code=save_failed");
            return Ok(());
        }
        self.baseline = self.profile.clone();
        info!("event=session_end module=session status=ok");
        Ok(())
    }

    /// Resets the in-memory profile and deletes the stored copy.
    ///
    /// # Errors
    /// - `LoggedOut` when the session already logged out.
    /// - `StorageUnavailable` when the stored copy cannot be deleted; the
    ///   profile, baseline and state are left untouched.
    pub fn log_out(&mut self) -> SessionResult<SessionSignal> {
        if self.state == SessionState::LoggedOut {
            return Err(SessionError::LoggedOut);
        }

        let previous = self.state;
        if self.store.try_delete().is_err() {
            warn!(
                "event=session_logout module=session status=error error_code=delete_failed from_state={}",
                previous.label()
            );
            return Err(SessionError::StorageUnavailable);
        }
        self.profile.reset();
        self.baseline.reset();
        self.state = SessionState::LoggedOut;
        info!(
            "event=session_logout module=session status=ok from_state={}",
            previous.label()
        );
        Ok(SessionSignal::NavigateAway)
    }

    /// Opens an editing scope that calls [`Self::end`] when dropped.
    ///
    /// # Errors
    /// - `NotStarted` or `LoggedOut` when the session cannot be edited.
    pub fn editing(&mut self) -> SessionResult<EditingScope<'_, R>> {
        self.ensure_started()?;
        Ok(EditingScope {
            session: self,
            finished: false,
        })
    }

    fn ensure_started(&self) -> SessionResult<()> {
        match self.state {
            SessionState::Active | SessionState::Saved => Ok(()),
            SessionState::Uninitialized => Err(SessionError::NotStarted),
            SessionState::LoggedOut => Err(SessionError::LoggedOut),
        }
    }
}

/// Editing surface lifetime.
///
/// Dropping the scope saves the profile on every exit path, including early
/// returns and `?` propagation. Logging out through the scope consumes it and
/// skips the save.
pub struct EditingScope<'s, R: KeyValueRepository> {
    session: &'s mut ProfileSession<R>,
    finished: bool,
}

impl<R: KeyValueRepository> EditingScope<'_, R> {
    pub fn edit<F>(&mut self, mutator: F) -> SessionResult<()>
    where
        F: FnOnce(&mut PersonaProfile),
    {
        self.session.edit(mutator)
    }

    pub fn apply(&mut self, edit: ProfileEdit) -> SessionResult<()> {
        self.session.apply(edit)
    }

    pub fn discard_changes(&mut self) -> SessionResult<()> {
        self.session.discard_changes()
    }

    /// Closes the scope, saving the current profile.
    pub fn close(mut self) -> SessionResult<()> {
        self.finished = true;
        self.session.end()
    }

    /// Logs out instead of saving.
    ///
    /// When the logout fails the scope still saves on its way out.
    pub fn log_out(mut self) -> SessionResult<SessionSignal> {
        let signal = self.session.log_out()?;
        self.finished = true;
        Ok(signal)
    }
}

impl<R: KeyValueRepository> Deref for EditingScope<'_, R> {
    type Target = PersonaProfile;

    fn deref(&self) -> &Self::Target {
        self.session.profile()
    }
}

impl<R: KeyValueRepository> Drop for EditingScope<'_, R> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        // Only fails when the session is not editable, which `editing` rules out.
        let _ = self.session.end();
    }
}
