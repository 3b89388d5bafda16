//! Favorites directory endpoints.
//!
//! - `GET /api/v1/members/{memberId}/favorite-projects` -> `[id, ...]`
//!   (bare or under `data`)
//! - `POST /api/v1/projects/{id}/favorite` marks a favorite
//! - `DELETE /api/v1/projects/{id}/favorite` removes it

use reqwest::Method;
use tracing::debug;

use market_types::{MemberId, ProjectId, Result};

use crate::ApiClient;

impl ApiClient {
    /// Ids of every project `member_id` has favorited.
    pub async fn favorite_project_ids(&self, member_id: MemberId) -> Result<Vec<ProjectId>> {
        let ids: Vec<ProjectId> = self
            .send_enveloped(self.request(
                Method::GET,
                &format!("/api/v1/members/{member_id}/favorite-projects"),
            ))
            .await?;
        debug!("Member {} has {} favorite projects", member_id, ids.len());
        Ok(ids)
    }

    /// Persist a favorite toggle for the signed-in member.
    pub async fn set_favorite(&self, project_id: ProjectId, is_favorite: bool) -> Result<()> {
        let method = if is_favorite { Method::POST } else { Method::DELETE };
        self.send(self.request(method, &format!("/api/v1/projects/{project_id}/favorite")))
            .await?;
        debug!("Project {} favorite set to {}", project_id, is_favorite);
        Ok(())
    }
}
