//! Flutter-facing bindings for Little Lemon core.

pub mod api;
