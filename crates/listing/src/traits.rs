//! Core traits for client-side page transforms.
//!
//! This module defines the `PageTransform` trait that lets a fetched page
//! be reordered or narrowed on the client before it is shown.

use market_types::{FavoriteSet, Project};

/// Client-side facts a transform may consult.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub favorites: &'a FavoriteSet,
    pub authenticated: bool,
}

impl<'a> ViewContext<'a> {
    pub fn new(favorites: &'a FavoriteSet, authenticated: bool) -> Self {
        Self {
            favorites,
            authenticated,
        }
    }
}

/// Core trait for transforming the items of one fetched page.
///
/// ## Design Note
/// - Transforms only see the items already fetched; they never request more
/// - `Send + Sync` lets a chain be shared between controllers
/// - Transforms take ownership of the items and return the new order
pub trait PageTransform: Send + Sync {
    /// Returns the name of this transform (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this transform to the items of one page.
    fn apply(&self, items: Vec<Project>, context: &ViewContext<'_>) -> Vec<Project>;
}
