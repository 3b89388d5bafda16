//! In-memory directory for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use market_types::{ClientError, FavoriteSet, MemberId, ProjectId, Result};

use crate::directory::FavoriteDirectory;

pub struct ScriptedDirectory {
    favorites: Mutex<HashSet<ProjectId>>,
    failing: AtomicBool,
    hanging: AtomicBool,
    fetches: AtomicUsize,
    toggles: Mutex<Vec<(MemberId, ProjectId, bool)>>,
}

impl ScriptedDirectory {
    pub fn with_favorites(ids: impl IntoIterator<Item = ProjectId>) -> Self {
        Self {
            favorites: Mutex::new(ids.into_iter().collect()),
            failing: AtomicBool::new(false),
            hanging: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            toggles: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let directory = Self::with_favorites(std::iter::empty());
        directory.set_failing(true);
        directory
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make fetches wait forever.
    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn toggles(&self) -> Vec<(MemberId, ProjectId, bool)> {
        self.toggles.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteDirectory for ScriptedDirectory {
    async fn fetch_favorites(&self, user: MemberId) -> Result<FavoriteSet> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.check()?;
        let ids = self.favorites.lock().unwrap().clone();
        Ok(FavoriteSet::for_user(user, ids))
    }

    async fn set_favorite(
        &self,
        user: MemberId,
        project: ProjectId,
        is_favorite: bool,
    ) -> Result<()> {
        self.check()?;
        let mut favorites = self.favorites.lock().unwrap();
        if is_favorite {
            favorites.insert(project);
        } else {
            favorites.remove(&project);
        }
        self.toggles.lock().unwrap().push((user, project, is_favorite));
        Ok(())
    }
}
