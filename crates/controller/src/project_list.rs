//! # Project List Controller
//!
//! Drives the public project listing page:
//! 1. Keep the filter state (facets, search, page)
//! 2. Fetch one page of projects per change
//! 3. Keep the signed-in user's favorites in step with the directory
//! 4. Optionally float favorites to the top of the fetched page
//!
//! ## Transition Table
//! Every external trigger maps to exactly one named action:
//!
//! | Trigger                    | Action                                   |
//! |----------------------------|------------------------------------------|
//! | `SessionChanged`           | sign in/out favorites, fetch page        |
//! | `FilterChanged`            | set one facet, scroll top, fetch page    |
//! | `FiltersChanged`           | set several facets, scroll top, fetch    |
//! | `SearchSubmitted`          | set search text, scroll top, fetch page  |
//! | `FiltersReset`             | default filters, scroll top, fetch page  |
//! | `PageSelected`             | set page, fetch page                     |
//! | `SortToggled`              | flip sort mode (auth), fetch page        |
//! | `FavoriteToggleRequested`  | persist toggle (auth), publish event     |
//! | `Bridge`                   | refresh favorites                        |
//!
//! ## Design Note
//! All actions take `&mut self`, so one trigger runs to completion before
//! the next starts and fetches cannot overlap. Bridge events that arrive
//! while a trigger runs are handled at the end of that trigger, in order.

use std::sync::Arc;

use tracing::{debug, error, info};

use api_client::{ApiClient, DEFAULT_PAGE_SIZE};
use favorites::{
    BridgeEvent, EventBridge, FavoriteDirectory, FavoriteState, FavoriteSync,
    SessionFavoriteCache, Subscription, SyncOutcome,
};
use listing::{Facet, FavoriteFirst, FilterEffect, FilterState, TransformChain, ViewContext};
use market_types::{ClientError, FavoriteSet, Page, Project, ProjectId, Session};

use crate::notice::{Notices, UiEffect};

/// External triggers the listing page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    SessionChanged(Session),
    FilterChanged(Facet),
    FiltersChanged(Vec<Facet>),
    SearchSubmitted(String),
    FiltersReset,
    PageSelected(u32),
    SortToggled,
    FavoriteToggleRequested(ProjectId),
    Bridge(BridgeEvent),
}

/// What the pagination bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based number of the highlighted page
    pub current: u32,
    pub total_pages: u32,
}

/// Keeps clearing the loading flag on every exit path of a fetch,
/// including a fetch that is dropped mid-flight.
struct LoadingGuard<'a> {
    loading: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a mut bool) -> Self {
        *loading = true;
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.loading = false;
    }
}

/// Controller of the public project listing.
pub struct ProjectListController {
    api: ApiClient,
    favorites: FavoriteSync,
    bridge: EventBridge,
    events: Subscription,
    session: Session,
    filter: FilterState,
    sort_by_favorite: bool,
    page: Page<Project>,
    loading: bool,
    notices: Notices,
}

impl ProjectListController {
    /// Create a listing controller that reads favorites through `api`.
    ///
    /// # Arguments
    /// * `api` - Client for the project listing and the favorites directory
    /// * `bridge` - Event bridge shared with the other components of the page
    /// * `cache` - Session cache for favorites
    pub fn new(
        api: ApiClient,
        bridge: EventBridge,
        cache: Arc<dyn SessionFavoriteCache>,
    ) -> Self {
        let directory: Arc<dyn FavoriteDirectory> = Arc::new(api.clone());
        Self::with_directory(api, directory, bridge, cache)
    }

    /// Same as `new`, with a separate favorites directory.
    pub fn with_directory(
        api: ApiClient,
        directory: Arc<dyn FavoriteDirectory>,
        bridge: EventBridge,
        cache: Arc<dyn SessionFavoriteCache>,
    ) -> Self {
        let events = bridge.subscribe();
        Self {
            api,
            favorites: FavoriteSync::new(directory, cache),
            bridge,
            events,
            session: Session::default(),
            filter: FilterState::new(),
            sort_by_favorite: false,
            page: Page::default(),
            loading: false,
            notices: Notices::default(),
        }
    }

    // ========================================================================
    // Read side
    // ========================================================================

    pub fn page(&self) -> &Page<Project> {
        &self.page
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort_by_favorite(&self) -> bool {
        self.sort_by_favorite
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    pub fn favorite_state(&self) -> &FavoriteState {
        self.favorites.state()
    }

    pub fn is_favorite(&self, project_id: ProjectId) -> bool {
        self.favorites.is_favorite(project_id)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current: self.page.display_number(),
            total_pages: self.page.total_pages,
        }
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }

    /// Effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        self.notices.take()
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    /// Run the action for `trigger`, then any bridge events it caused.
    pub async fn handle(&mut self, trigger: Trigger) {
        debug!("Handling trigger {:?}", trigger);
        match trigger {
            Trigger::SessionChanged(session) => self.apply_session(session).await,
            Trigger::FilterChanged(facet) => {
                let effect = self.filter.set_filter(facet);
                self.refetch(effect).await;
            }
            Trigger::FiltersChanged(facets) => {
                let effect = self.filter.set_filters(facets);
                self.refetch(effect).await;
            }
            Trigger::SearchSubmitted(text) => {
                let effect = self.filter.set_search_text(text);
                self.refetch(effect).await;
            }
            Trigger::FiltersReset => {
                let effect = self.filter.reset();
                self.refetch(effect).await;
            }
            Trigger::PageSelected(page_index) => {
                let effect = self.filter.set_page(page_index);
                self.refetch(effect).await;
            }
            Trigger::SortToggled => self.toggle_sort().await,
            Trigger::FavoriteToggleRequested(project_id) => {
                self.toggle_favorite(project_id).await;
            }
            Trigger::Bridge(event) => {
                if self.on_bridge_event(event).await {
                    self.fetch_page().await;
                }
            }
        }
        self.process_pending_events().await;
    }

    /// Handle every bridge event queued so far, oldest first.
    pub async fn process_pending_events(&mut self) {
        let mut order_stale = false;
        for event in self.events.drain() {
            order_stale |= self.on_bridge_event(event).await;
        }
        if order_stale {
            self.fetch_page().await;
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    async fn apply_session(&mut self, session: Session) {
        match session.current_user_id() {
            Some(user) => {
                if self.favorites.user() != Some(user) {
                    let outcome = self.favorites.sign_in(user).await;
                    self.apply_sync_outcome(&outcome);
                }
            }
            None => {
                self.favorites.sign_out();
                self.sort_by_favorite = false;
            }
        }
        self.session = session;
        self.fetch_page().await;
    }

    async fn refetch(&mut self, effect: FilterEffect) {
        if effect.scrolls_to_top() {
            self.notices.push(UiEffect::ScrollToTop);
        }
        self.fetch_page().await;
    }

    async fn toggle_sort(&mut self) {
        if !self.session.is_authenticated() {
            self.notices.report(
                "Sort by favorite",
                &ClientError::auth_required("sort by favorite"),
            );
            return;
        }
        self.sort_by_favorite = !self.sort_by_favorite;
        info!("Sort by favorite: {}", self.sort_by_favorite);
        self.fetch_page().await;
    }

    /// Flip the favorite state of one project for the signed-in user.
    async fn toggle_favorite(&mut self, project_id: ProjectId) {
        if !self.session.is_authenticated() {
            self.notices.report(
                "Favorite",
                &ClientError::auth_required("favorite a project"),
            );
            return;
        }

        let is_favorite = !self.favorites.is_favorite(project_id);
        match self.favorites.toggle(project_id, is_favorite).await {
            Ok(()) => {
                self.bridge.publish(BridgeEvent::FavoriteToggled {
                    project_id,
                    is_favorite,
                });
            }
            Err(err) => self.notices.report("Failed to update favorite", &err),
        }
    }

    /// Returns whether the displayed page was ordered by a favorite set
    /// that may have changed, including when sorting was just forced off.
    async fn on_bridge_event(&mut self, event: BridgeEvent) -> bool {
        if !self.session.is_authenticated() {
            debug!("Ignoring {:?}: not signed in", event);
            return false;
        }
        let outcome = match event {
            BridgeEvent::FavoriteToggled {
                project_id,
                is_favorite,
            } => {
                self.favorites
                    .on_favorite_toggled(project_id, is_favorite)
                    .await
            }
            BridgeEvent::VisibilityRestored => self.favorites.on_visibility_restored().await,
        };
        let was_sorted = self.sort_by_favorite;
        self.apply_sync_outcome(&outcome);
        was_sorted && outcome != SyncOutcome::Skipped
    }

    fn apply_sync_outcome(&mut self, outcome: &SyncOutcome) {
        if outcome.forces_sort_off() && self.sort_by_favorite {
            info!("Favorites unavailable, turning sort by favorite off");
            self.sort_by_favorite = false;
        }
    }

    /// Fetch the page for the current filter and publish it.
    ///
    /// On failure the previous page stays in place. The loading flag is
    /// cleared on every path.
    async fn fetch_page(&mut self) {
        let query = self.filter.to_query(DEFAULT_PAGE_SIZE);
        let result = {
            let _loading = LoadingGuard::start(&mut self.loading);
            self.api.list_projects(&query).await
        };

        match result {
            Ok(page) => {
                let chain = if self.sort_by_favorite {
                    TransformChain::new().add_transform(FavoriteFirst)
                } else {
                    TransformChain::new()
                };
                let context =
                    ViewContext::new(self.favorites.favorites(), self.session.is_authenticated());
                let Page {
                    items,
                    page_index,
                    total_pages,
                } = page;
                let items = chain.apply(items, &context);
                info!(
                    "Showing page {} of {} ({} projects)",
                    page_index + 1,
                    total_pages,
                    items.len()
                );
                self.page = Page::new(items, page_index, total_pages);
            }
            Err(err) => {
                error!("Project list fetch failed, keeping previous page: {}", err);
                self.notices.report("Failed to load projects", &err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::ApiConfig;
    use favorites::InMemorySessionCache;
    use market_types::{Location, ProjectStatus};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(ids: &[i64], number: u32, total_pages: u32) -> String {
        let content: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({ "id": id, "title": format!("project {id}") }))
            .collect();
        serde_json::json!({ "content": content, "number": number, "totalPages": total_pages })
            .to_string()
    }

    async fn mount_list(server: &MockServer, ids: &[i64]) {
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_body(ids, 0, 3)))
            .mount(server)
            .await;
    }

    async fn mount_favorites(server: &MockServer, member_id: i64, ids: &[i64]) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/members/{member_id}/favorite-projects")))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(serde_json::json!(ids).to_string()),
            )
            .mount(server)
            .await;
    }

    fn controller_for(server: &MockServer) -> ProjectListController {
        let api = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
        ProjectListController::new(
            api,
            EventBridge::default(),
            Arc::new(InMemorySessionCache::new()),
        )
    }

    fn member() -> Session {
        Session::signed_in(10, "kim", vec![])
    }

    #[tokio::test]
    async fn test_anonymous_initial_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .and(query_param("page", "0"))
            .and(query_param("size", "10"))
            .and(query_param("status", "RECRUITING"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_body(&[1, 2], 0, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::SessionChanged(Session::anonymous())).await;

        assert_eq!(controller.page().ids(), vec![1, 2]);
        assert_eq!(
            controller.pagination(),
            Pagination {
                current: 1,
                total_pages: 3
            }
        );
        assert!(!controller.is_loading());
        assert!(controller.take_effects().is_empty());
    }

    #[tokio::test]
    async fn test_filter_change_scrolls_and_resets_page() {
        let server = MockServer::start().await;
        mount_list(&server, &[1]).await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::PageSelected(2)).await;
        assert_eq!(controller.filter().page_index(), 2);
        assert!(controller.take_effects().is_empty());

        controller
            .handle(Trigger::FilterChanged(Facet::Location(Some(Location::Seoul))))
            .await;
        assert_eq!(controller.filter().page_index(), 0);
        assert_eq!(controller.take_effects(), vec![UiEffect::ScrollToTop]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_body(&[1, 2], 0, 3)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::SessionChanged(Session::anonymous())).await;
        controller.handle(Trigger::PageSelected(1)).await;

        assert_eq!(controller.page().ids(), vec![1, 2]);
        assert!(!controller.is_loading());
        let effects = controller.take_effects();
        assert!(matches!(&effects[..], [UiEffect::Alert(_)]));
    }

    #[tokio::test]
    async fn test_sort_toggle_requires_sign_in() {
        let server = MockServer::start().await;
        mount_list(&server, &[1, 2, 3]).await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::SessionChanged(Session::anonymous())).await;
        controller.handle(Trigger::SortToggled).await;

        assert!(!controller.sort_by_favorite());
        let effects = controller.take_effects();
        assert_eq!(effects.last(), Some(&UiEffect::RedirectToSignIn));
    }

    #[tokio::test]
    async fn test_sort_toggle_reorders_page() {
        let server = MockServer::start().await;
        mount_list(&server, &[1, 2, 3]).await;
        mount_favorites(&server, 10, &[2]).await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::SessionChanged(member())).await;
        assert_eq!(controller.page().ids(), vec![1, 2, 3]);

        controller.handle(Trigger::SortToggled).await;
        assert!(controller.sort_by_favorite());
        assert_eq!(controller.page().ids(), vec![2, 1, 3]);
        // Sorting keeps the scroll position
        assert!(controller.take_effects().is_empty());

        controller.handle(Trigger::SortToggled).await;
        assert_eq!(controller.page().ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_sign_out_turns_sort_off() {
        let server = MockServer::start().await;
        mount_list(&server, &[1, 2, 3]).await;
        mount_favorites(&server, 10, &[3]).await;

        let mut controller = controller_for(&server);
        controller.handle(Trigger::SessionChanged(member())).await;
        controller.handle(Trigger::SortToggled).await;
        assert_eq!(controller.page().ids(), vec![3, 1, 2]);

        controller.handle(Trigger::SessionChanged(Session::anonymous())).await;
        assert!(!controller.sort_by_favorite());
        assert!(controller.favorites().is_empty());
        assert_eq!(controller.favorite_state(), &FavoriteState::Unauthenticated);
        assert_eq!(controller.page().ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_status_any_omits_status_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .and(query_param("status", "RECRUITING"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_list(&server, &[4]).await;

        let mut controller = controller_for(&server);
        controller
            .handle(Trigger::FiltersChanged(vec![
                Facet::Status(None),
                Facet::ProjectField(None),
            ]))
            .await;
        assert_eq!(controller.page().ids(), vec![4]);
        assert_eq!(controller.filter().status(), None::<ProjectStatus>);
    }
}
