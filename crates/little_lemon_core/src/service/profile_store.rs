//! Fail-soft persistence of the persona profile.
//!
//! # Responsibility
//! - Encode/decode `PersonaProfile` as JSON under one fixed storage key.
//! - Absorb storage and codec failures so the profile form never crashes.
//!
//! # Invariants
//! - Failed saves leave the previously stored value untouched.
//! - Absent and undecodable values both load as `None`.
//! - Log lines carry metadata only, never profile contents.

use crate::model::profile::PersonaProfile;
use crate::repo::kv_repo::{KeyValueRepository, RepoError, RepoResult};
use log::{debug, info, warn};

/// Storage key holding the serialized profile.
pub const PROFILE_STORAGE_KEY: &str = "personalInfo";

/// Profile persistence over a key-value repository.
pub struct ProfileStore<R: KeyValueRepository> {
    repo: R,
}

impl<R: KeyValueRepository> ProfileStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Underlying repository, e.g. for inspection in diagnostics.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Writes `profile` under the storage key, replacing any prior value.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn save(&self, profile: &PersonaProfile) {
        // Already logged.
        let _ = self.try_save(profile);
    }

    /// Like [`Self::save`], but reports whether the write happened.
    pub(crate) fn try_save(&self, profile: &PersonaProfile) -> RepoResult<()> {
        let encoded = serde_json::to_string(profile).map_err(|err| {
            warn!(
                "event=profile_save module=profile status=error error_code=encode_failed error={}",
                err
            );
            RepoError::InvalidData(format!("cannot encode profile: {err}"))
        })?;

        match self.repo.set_value(PROFILE_STORAGE_KEY, &encoded) {
            Ok(()) => {
                info!(
                    "event=profile_save module=profile status=ok bytes={}",
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=profile_save module=profile status=error error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads the stored profile.
    ///
    /// Returns `None` when nothing is stored or the stored value cannot be
    /// read or decoded.
    pub fn load(&self) -> Option<PersonaProfile> {
        let raw = match self.repo.get_value(PROFILE_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=profile_load module=profile status=absent");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=profile_load module=profile status=error error_code=read_failed error={}",
                    err
                );
                return None;
            }
        };

        match serde_json::from_str::<PersonaProfile>(&raw) {
            Ok(profile) => {
                info!("event=profile_load module=profile status=ok");
                Some(profile)
            }
            Err(err) => {
                // Display of a decode error may quote stored field values.
                warn!(
                    "event=profile_load module=profile status=error error_code=decode_failed category={:?} line={} column={}",
                    err.classify(),
                    err.line(),
                    err.column()
                );
                None
            }
        }
    }

    /// Removes the stored profile. Idempotent.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn delete(&self) {
        // Already logged.
        let _ = self.try_delete();
    }

    /// Like [`Self::delete`], but reports failure. `Ok(false)` means nothing
    /// was stored.
    pub(crate) fn try_delete(&self) -> RepoResult<bool> {
        match self.repo.remove_value(PROFILE_STORAGE_KEY) {
            Ok(removed) => {
                info!(
                    "event=profile_delete module=profile status=ok removed={}",
                    removed
                );
                Ok(removed)
            }
            Err(err) => {
                warn!(
                    "event=profile_delete module=profile status=error error_code=delete_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
