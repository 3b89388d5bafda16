//! Sort-by-favorite policy.
//!
//! Favorited projects float to the top of the page they are on. Nothing is
//! pulled in from other pages: a favorite on page 3 stays on page 3.

use crate::traits::{PageTransform, ViewContext};
use market_types::{FavoriteSet, Identified, Project};

/// Stable partition of `items`: favorited first, then the rest.
///
/// Both groups keep their original relative order, which also makes the
/// function idempotent. Items without an id count as not favorited.
pub fn sort_by_favorite<T: Identified>(items: Vec<T>, favorites: &FavoriteSet) -> Vec<T> {
    let (mut favorited, rest): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| item.project_id().is_some_and(|id| favorites.contains(id)));
    favorited.extend(rest);
    favorited
}

/// Moves favorited projects to the top for signed-in users.
///
/// Anonymous sessions have no favorites, so the page is returned untouched.
/// When sorting, projects without an id are left out.
pub struct FavoriteFirst;

impl PageTransform for FavoriteFirst {
    fn name(&self) -> &str {
        "FavoriteFirst"
    }

    fn apply(&self, items: Vec<Project>, context: &ViewContext<'_>) -> Vec<Project> {
        if !context.authenticated || items.is_empty() {
            return items;
        }
        let identified: Vec<Project> = items.into_iter().filter(|p| p.id.is_some()).collect();
        sort_by_favorite(identified, context.favorites)
    }
}
