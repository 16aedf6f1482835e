//! Domain model for the menu catalog and the locally stored profile.
//!
//! # Responsibility
//! - Define the value types shared by filters, storage and sessions.
//!
//! # Invariants
//! - Menu items are immutable once constructed.
//! - Profiles are always fully populated; absence is expressed with `Option`.

pub mod menu;
pub mod profile;
