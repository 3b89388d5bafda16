//! The favorites directory: the remote source of truth for favorites.

use async_trait::async_trait;

use api_client::ApiClient;
use market_types::{FavoriteSet, MemberId, ProjectId, Result};

/// Reads and writes the favorite set of a member.
#[async_trait]
pub trait FavoriteDirectory: Send + Sync {
    async fn fetch_favorites(&self, user: MemberId) -> Result<FavoriteSet>;

    async fn set_favorite(
        &self,
        user: MemberId,
        project: ProjectId,
        is_favorite: bool,
    ) -> Result<()>;
}

#[async_trait]
impl FavoriteDirectory for ApiClient {
    async fn fetch_favorites(&self, user: MemberId) -> Result<FavoriteSet> {
        let ids = self.favorite_project_ids(user).await?;
        Ok(FavoriteSet::for_user(user, ids))
    }

    // The backend identifies the member from the session credentials
    async fn set_favorite(
        &self,
        _user: MemberId,
        project: ProjectId,
        is_favorite: bool,
    ) -> Result<()> {
        ApiClient::set_favorite(self, project, is_favorite).await
    }
}
