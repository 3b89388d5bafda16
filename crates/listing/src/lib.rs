//! Filter state and client-side page transforms for the project listing.
//!
//! This crate provides:
//! - FilterState, the single-select facets + search + page of the listing
//! - PageTransform trait and implementations (favorite-first sort, status tabs)
//! - TransformChain for composing transforms
//!
//! ## Architecture
//! A listing goes through two stages:
//! 1. FilterState becomes query parameters; filtering happens on the server
//! 2. The fetched page goes through a TransformChain on the client
//!
//! ## Example Usage
//! ```ignore
//! use listing::{Facet, FilterState, TransformChain, ViewContext};
//! use listing::transforms::FavoriteFirst;
//!
//! let mut filter = FilterState::new();
//! filter.set_filter(Facet::Location(Some(Location::Seoul)));
//! let page = api.list_projects(&filter.to_query(10)).await?;
//!
//! let chain = TransformChain::new().add_transform(FavoriteFirst);
//! let shown = chain.apply(page.items, &ViewContext::new(&favorites, true));
//! ```

pub mod filter_state;
pub mod traits;
pub mod transform_chain;
pub mod transforms;

// Re-export main types
pub use filter_state::{Facet, FilterEffect, FilterState};
pub use traits::{PageTransform, ViewContext};
pub use transform_chain::TransformChain;
pub use transforms::{FavoriteFirst, StatusTab, StatusTabFilter, sort_by_favorite, tab_counts};
