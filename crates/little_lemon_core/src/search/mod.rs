//! Menu filtering entry points.
//!
//! # Responsibility
//! - Narrow catalog items by category facet and free-text query.
//! - Keep list shaping inside core so every UI renders the same result.

pub mod menu_filter;
