//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into profile persistence and session
//!   lifecycle APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod profile_session;
pub mod profile_store;
