//! Persona profile domain model.
//!
//! # Responsibility
//! - Define the contact and notification record edited by the profile form.
//! - Define the serialized shape persisted by `ProfileStore`.
//!
//! # Invariants
//! - Serialized field names are camelCase and form a stable storage contract.
//! - Every field is required on decode; partial records are rejected.
//! - `PersonaProfile::default()` is the reset state.

use serde::{Deserialize, Serialize};

/// Email notification opt-ins. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

/// Names one notification flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    OrderStatuses,
    PasswordChanges,
    SpecialOffers,
    Newsletter,
}

impl NotificationKind {
    /// All flags in form order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::OrderStatuses,
        NotificationKind::PasswordChanges,
        NotificationKind::SpecialOffers,
        NotificationKind::Newsletter,
    ];

    /// Stable snake_case key used by FFI and CLI callers.
    pub fn key(self) -> &'static str {
        match self {
            Self::OrderStatuses => "order_statuses",
            Self::PasswordChanges => "password_changes",
            Self::SpecialOffers => "special_offers",
            Self::Newsletter => "newsletter",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|kind| kind.key() == value)
    }
}

impl NotificationPreferences {
    pub fn get(&self, kind: NotificationKind) -> bool {
        *self.flag(kind)
    }

    pub fn set(&mut self, kind: NotificationKind, enabled: bool) {
        *self.flag_mut(kind) = enabled;
    }

    pub fn toggle(&mut self, kind: NotificationKind) {
        let flag = self.flag_mut(kind);
        *flag = !*flag;
    }

    fn flag(&self, kind: NotificationKind) -> &bool {
        match kind {
            NotificationKind::OrderStatuses => &self.order_statuses,
            NotificationKind::PasswordChanges => &self.password_changes,
            NotificationKind::SpecialOffers => &self.special_offers,
            NotificationKind::Newsletter => &self.newsletter,
        }
    }

    fn flag_mut(&mut self, kind: NotificationKind) -> &mut bool {
        match kind {
            NotificationKind::OrderStatuses => &mut self.order_statuses,
            NotificationKind::PasswordChanges => &mut self.password_changes,
            NotificationKind::SpecialOffers => &mut self.special_offers,
            NotificationKind::Newsletter => &mut self.newsletter,
        }
    }
}

/// Locally stored user contact and preference record.
///
/// Field order matches the persisted JSON layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub first_name: String,
    pub email: String,
    pub last_name: String,
    pub phone_number: String,
    pub notification_preferences: NotificationPreferences,
}

/// Text fields of a profile that the form can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl ProfileField {
    /// All text fields in form order.
    pub const ALL: [ProfileField; 4] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::PhoneNumber,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|field| field.key() == value)
    }
}

/// One user edit forwarded from the form: a keystroke or a checkbox tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    SetText(ProfileField, String),
    ToggleNotification(NotificationKind),
}

impl PersonaProfile {
    /// Applies a single field-level edit.
    pub fn apply(&mut self, edit: ProfileEdit) {
        match edit {
            ProfileEdit::SetText(field, value) => *self.text_mut(field) = value,
            ProfileEdit::ToggleNotification(kind) => self.notification_preferences.toggle(kind),
        }
    }

    pub fn text(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::PhoneNumber => &self.phone_number,
        }
    }

    /// Returns every field to its default value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn text_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::PhoneNumber => &mut self.phone_number,
        }
    }
}
