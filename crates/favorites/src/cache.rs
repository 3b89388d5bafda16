//! Session-scoped cache of favorite lists and per-project overrides.
//!
//! Lets a freshly mounted page show favorites before the directory answers.
//! The cache is best-effort: a miss is never an error and nothing here is
//! authoritative over the directory.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use market_types::{MemberId, ProjectId};

/// Storage for favorites that lives as long as the user's session.
pub trait SessionFavoriteCache: Send + Sync {
    /// Last favorite list stored for `user`.
    fn favorite_list(&self, user: MemberId) -> Option<Vec<ProjectId>>;

    /// Replace the stored list. A fresh list supersedes earlier overrides.
    fn set_favorite_list(&self, user: MemberId, ids: &[ProjectId]);

    /// Toggle states recorded since the list was last stored.
    fn favorite_overrides(&self, user: MemberId) -> Vec<(ProjectId, bool)>;

    fn set_favorite_status(&self, user: MemberId, project: ProjectId, is_favorite: bool);

    /// Forget everything stored for `user`.
    fn clear(&self, user: MemberId);
}

#[derive(Debug, Default, Clone)]
struct CachedFavorites {
    list: Option<Vec<ProjectId>>,
    overrides: HashMap<ProjectId, bool>,
}

/// Process-local session cache keyed by member.
#[derive(Debug, Default)]
pub struct InMemorySessionCache {
    entries: RwLock<HashMap<MemberId, CachedFavorites>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFavoriteCache for InMemorySessionCache {
    fn favorite_list(&self, user: MemberId) -> Option<Vec<ProjectId>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&user).and_then(|entry| entry.list.clone())
    }

    fn set_favorite_list(&self, user: MemberId, ids: &[ProjectId]) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(user).or_default();
        entry.list = Some(ids.to_vec());
        entry.overrides.clear();
    }

    fn favorite_overrides(&self, user: MemberId) -> Vec<(ProjectId, bool)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut overrides: Vec<_> = entries
            .get(&user)
            .map(|entry| entry.overrides.iter().map(|(id, fav)| (*id, *fav)).collect())
            .unwrap_or_default();
        overrides.sort_unstable();
        overrides
    }

    fn set_favorite_status(&self, user: MemberId, project: ProjectId, is_favorite: bool) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(user)
            .or_default()
            .overrides
            .insert(project, is_favorite);
    }

    fn clear(&self, user: MemberId) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&user);
    }
}
