//! Page transform implementations.
//!
//! This module contains the concrete transforms that can be composed into
//! a TransformChain.

pub mod favorite_first;
pub mod status_tab;

// Re-export for convenience
pub use favorite_first::{FavoriteFirst, sort_by_favorite};
pub use status_tab::{StatusTab, StatusTabFilter, tab_counts};
