//! Favorite set synchronization for one page.
//!
//! ## Algorithm
//! The page keeps the signed-in member's favorite set and re-reads it from
//! the directory on every relevant trigger:
//!
//! 1. Sign-in: `Unauthenticated -> Loading -> Ready | Stale`
//! 2. Toggle event or visibility restored: `Ready -> Loading -> Ready | Stale`
//! 3. Sign-out: any state -> `Unauthenticated`
//!
//! Sign-in first seeds the set from the session cache (stored list plus
//! per-project overrides), so a page shows favorites while `Loading`.
//! A failed read degrades to an empty set, except after a toggle event: the
//! last known set is patched with the toggle instead, so the change the user
//! just made stays visible. Every successful read or patch is written through
//! to the session cache.

use std::sync::{Arc, LazyLock};

use tracing::{debug, info, warn};

use market_types::{ClientError, FavoriteSet, MemberId, ProjectId, Result};

use crate::cache::SessionFavoriteCache;
use crate::directory::FavoriteDirectory;

static NO_FAVORITES: LazyLock<FavoriteSet> = LazyLock::new(FavoriteSet::empty);

/// Where the page's favorite set currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteState {
    Unauthenticated,
    /// Waiting on the directory; holds the last known set
    Loading(FavoriteSet),
    Ready(FavoriteSet),
    Stale {
        favorites: FavoriteSet,
        error: ClientError,
    },
}

impl FavoriteState {
    pub fn favorites(&self) -> Option<&FavoriteSet> {
        match self {
            FavoriteState::Loading(favorites)
            | FavoriteState::Ready(favorites)
            | FavoriteState::Stale { favorites, .. } => Some(favorites),
            FavoriteState::Unauthenticated => None,
        }
    }
}

/// Result of re-reading the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh set from the directory
    Refreshed,
    /// Read failed after a toggle; the last known set was patched
    Patched(ClientError),
    /// Read failed; the set is now empty
    Degraded(ClientError),
    /// Nobody is signed in
    Skipped,
}

impl SyncOutcome {
    /// Sorting by favorite against an unknown set is meaningless.
    pub fn forces_sort_off(&self) -> bool {
        matches!(self, SyncOutcome::Degraded(_))
    }
}

/// Owns the favorite set of one page and keeps it in step with the directory.
pub struct FavoriteSync {
    directory: Arc<dyn FavoriteDirectory>,
    cache: Arc<dyn SessionFavoriteCache>,
    user: Option<MemberId>,
    state: FavoriteState,
}

impl FavoriteSync {
    pub fn new(
        directory: Arc<dyn FavoriteDirectory>,
        cache: Arc<dyn SessionFavoriteCache>,
    ) -> Self {
        Self {
            directory,
            cache,
            user: None,
            state: FavoriteState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &FavoriteState {
        &self.state
    }

    pub fn user(&self) -> Option<MemberId> {
        self.user
    }

    /// The set to render with. Empty unless a user is signed in and loaded.
    pub fn favorites(&self) -> &FavoriteSet {
        self.state.favorites().unwrap_or(&NO_FAVORITES)
    }

    pub fn is_favorite(&self, project: ProjectId) -> bool {
        self.favorites().contains(project)
    }

    /// Start tracking `user`'s favorites and load them.
    ///
    /// Until the directory answers, the set cached for this session is shown.
    pub async fn sign_in(&mut self, user: MemberId) -> SyncOutcome {
        if self.user.is_some_and(|current| current != user) {
            self.sign_out();
        }
        info!("Loading favorites for member {}", user);
        self.user = Some(user);
        self.state = FavoriteState::Loading(self.cached_favorites(user));
        self.refresh(None).await
    }

    /// The cached list with the recorded toggles applied on top.
    fn cached_favorites(&self, user: MemberId) -> FavoriteSet {
        let mut favorites = FavoriteSet::for_user(
            user,
            self.cache.favorite_list(user).unwrap_or_default(),
        );
        for (project, is_favorite) in self.cache.favorite_overrides(user) {
            favorites.apply_toggle(project, is_favorite);
        }
        if !favorites.is_empty() {
            debug!("Seeded {} favorites of member {} from cache", favorites.len(), user);
        }
        favorites
    }

    /// Forget the current user and their cached favorites.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            debug!("Clearing favorites of member {}", user);
            self.cache.clear(user);
        }
        self.state = FavoriteState::Unauthenticated;
    }

    pub async fn on_visibility_restored(&mut self) -> SyncOutcome {
        self.refresh(None).await
    }

    /// React to a toggle made anywhere on the page.
    pub async fn on_favorite_toggled(
        &mut self,
        project: ProjectId,
        is_favorite: bool,
    ) -> SyncOutcome {
        self.refresh(Some((project, is_favorite))).await
    }

    /// Persist a toggle made by the signed-in user.
    ///
    /// On success the override is recorded in the session cache and the
    /// local set reflects the new state. Nothing changes on failure.
    pub async fn toggle(&mut self, project: ProjectId, is_favorite: bool) -> Result<()> {
        let user = self
            .user
            .ok_or_else(|| ClientError::auth_required("toggle favorite"))?;

        self.directory
            .set_favorite(user, project, is_favorite)
            .await?;
        self.cache.set_favorite_status(user, project, is_favorite);

        if let FavoriteState::Loading(favorites)
        | FavoriteState::Ready(favorites)
        | FavoriteState::Stale { favorites, .. } = &mut self.state
        {
            favorites.apply_toggle(project, is_favorite);
        }
        info!("Project {} favorite set to {}", project, is_favorite);
        Ok(())
    }

    async fn refresh(&mut self, toggled: Option<(ProjectId, bool)>) -> SyncOutcome {
        let Some(user) = self.user else {
            debug!("Favorites refresh skipped: not signed in");
            return SyncOutcome::Skipped;
        };

        let last_known = self.favorites().clone();
        self.state = FavoriteState::Loading(last_known.clone());
        match self.directory.fetch_favorites(user).await {
            Ok(favorites) => {
                debug!("Member {} has {} favorites", user, favorites.len());
                self.cache.set_favorite_list(user, &favorites.to_sorted_vec());
                self.state = FavoriteState::Ready(favorites);
                SyncOutcome::Refreshed
            }
            Err(error) => match toggled {
                Some((project, is_favorite)) => {
                    warn!(
                        "Favorites refresh failed, patching project {} locally: {}",
                        project, error
                    );
                    let mut favorites = last_known;
                    favorites.apply_toggle(project, is_favorite);
                    self.cache.set_favorite_list(user, &favorites.to_sorted_vec());
                    self.cache.set_favorite_status(user, project, is_favorite);
                    self.state = FavoriteState::Stale {
                        favorites,
                        error: error.clone(),
                    };
                    SyncOutcome::Patched(error)
                }
                None => {
                    warn!("Favorites refresh failed, falling back to none: {}", error);
                    self.state = FavoriteState::Stale {
                        favorites: FavoriteSet::for_user(user, std::iter::empty()),
                        error: error.clone(),
                    };
                    SyncOutcome::Degraded(error)
                }
            },
        }
    }
}
