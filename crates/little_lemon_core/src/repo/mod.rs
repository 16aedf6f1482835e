//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value data access contract used by profile storage.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Keys are non-blank.
//! - Repository APIs return semantic errors (`InvalidKey`, `InvalidData`) in
//!   addition to DB transport errors.

pub mod kv_repo;
