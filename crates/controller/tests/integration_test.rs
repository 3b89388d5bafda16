//! End-to-end tests of the listing page against a mock backend.

use std::sync::Arc;

use controller::{Pagination, ProjectListController, Trigger, UiEffect};
use favorites::{BridgeEvent, EventBridge, FavoriteState, InMemorySessionCache, SessionFavoriteCache};
use market_types::Session;

use api_client::{ApiClient, ApiConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEMBER: i64 = 10;
const FAVORITES_PATH: &str = "/api/v1/members/10/favorite-projects";

async fn mount_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn mount_favorites_once(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(FAVORITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

async fn mount_favorites_failure(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FAVORITES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

struct Page {
    controller: ProjectListController,
    bridge: EventBridge,
    cache: Arc<InMemorySessionCache>,
}

fn open_page(server: &MockServer) -> Page {
    let api = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
    let bridge = EventBridge::default();
    let cache = Arc::new(InMemorySessionCache::new());
    let controller = ProjectListController::new(api, bridge.clone(), cache.clone());
    Page {
        controller,
        bridge,
        cache,
    }
}

fn member() -> Session {
    Session::signed_in(MEMBER, "kim", vec![])
}

#[tokio::test]
async fn test_page_envelope_is_displayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .and(query_param("status", "RECRUITING"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"content":[{"id":1},{"id":2}],"totalPages":3,"number":0}"#),
        )
        .mount(&server)
        .await;

    let mut page = open_page(&server);
    page.controller
        .handle(Trigger::SessionChanged(Session::anonymous()))
        .await;

    assert_eq!(page.controller.page().ids(), vec![1, 2]);
    assert_eq!(
        page.controller.pagination(),
        Pagination {
            current: 1,
            total_pages: 3
        }
    );
}

#[tokio::test]
async fn test_favorites_first_on_fetched_page() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":1},{"id":2},{"id":3}],"totalPages":1,"number":0}"#).await;
    mount_favorites_once(&server, "[2]").await;

    let mut page = open_page(&server);
    page.controller.handle(Trigger::SessionChanged(member())).await;
    page.controller.handle(Trigger::SortToggled).await;

    assert_eq!(page.controller.page().ids(), vec![2, 1, 3]);
    assert_eq!(page.cache.favorite_list(MEMBER), Some(vec![2]));
}

#[tokio::test]
async fn test_unauthenticated_toggle_is_rejected() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":7},{"id":8}],"totalPages":1,"number":0}"#).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/7/favorite"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = open_page(&server);
    page.controller
        .handle(Trigger::SessionChanged(Session::anonymous()))
        .await;
    let before = page.controller.page().clone();

    page.controller.handle(Trigger::FavoriteToggleRequested(7)).await;

    let effects = page.controller.take_effects();
    assert!(effects.contains(&UiEffect::RedirectToSignIn));
    assert!(matches!(effects.first(), Some(UiEffect::Alert(_))));
    assert_eq!(page.controller.page(), &before);
    assert!(!page.controller.is_favorite(7));
}

#[tokio::test]
async fn test_directory_failure_forces_sort_off() {
    for sort_on in [false, true] {
        let server = MockServer::start().await;
        mount_page(&server, r#"{"content":[{"id":1},{"id":2}],"totalPages":1,"number":0}"#).await;
        mount_favorites_once(&server, "[2]").await;
        mount_favorites_failure(&server).await;

        let mut page = open_page(&server);
        page.controller.handle(Trigger::SessionChanged(member())).await;
        if sort_on {
            page.controller.handle(Trigger::SortToggled).await;
            assert!(page.controller.sort_by_favorite());
        }

        page.bridge.publish(BridgeEvent::VisibilityRestored);
        page.controller.process_pending_events().await;

        assert!(!page.controller.sort_by_favorite());
        assert!(page.controller.favorites().is_empty());
        assert!(matches!(
            page.controller.favorite_state(),
            FavoriteState::Stale { .. }
        ));
        // Server order again, not the favorite-first [2, 1]
        assert_eq!(page.controller.page().ids(), vec![1, 2]);
    }
}

#[tokio::test]
async fn test_forced_sort_off_refetches_in_server_order() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":1},{"id":2},{"id":3}],"totalPages":1,"number":0}"#).await;
    mount_favorites_once(&server, "[2]").await;
    mount_favorites_failure(&server).await;

    let mut page = open_page(&server);
    page.controller.handle(Trigger::SessionChanged(member())).await;
    page.controller.handle(Trigger::SortToggled).await;
    assert_eq!(page.controller.page().ids(), vec![2, 1, 3]);

    page.controller
        .handle(Trigger::Bridge(BridgeEvent::VisibilityRestored))
        .await;

    assert!(!page.controller.sort_by_favorite());
    assert_eq!(page.controller.page().ids(), vec![1, 2, 3]);
    assert!(!page.controller.is_loading());
}

#[tokio::test]
async fn test_sign_in_failure_leaves_sort_off() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":1}],"totalPages":1,"number":0}"#).await;
    mount_favorites_failure(&server).await;

    let mut page = open_page(&server);
    page.controller.handle(Trigger::SessionChanged(member())).await;

    assert!(page.controller.favorites().is_empty());
    assert!(!page.controller.sort_by_favorite());
    assert_eq!(page.controller.page().ids(), vec![1]);
}

#[tokio::test]
async fn test_toggle_event_with_failing_directory_patches_once() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":5},{"id":42}],"totalPages":1,"number":0}"#).await;
    mount_favorites_once(&server, "[5]").await;
    mount_favorites_failure(&server).await;

    let mut page = open_page(&server);
    page.controller.handle(Trigger::SessionChanged(member())).await;
    page.controller.handle(Trigger::SortToggled).await;

    // Another component on the page toggled 42 twice
    for _ in 0..2 {
        page.bridge.publish(BridgeEvent::FavoriteToggled {
            project_id: 42,
            is_favorite: true,
        });
    }
    page.controller.process_pending_events().await;

    let favorites = page.controller.favorites();
    assert_eq!(favorites.to_sorted_vec(), vec![5, 42]);
    assert_eq!(favorites.len(), 2);
    assert!(page.controller.sort_by_favorite());
    assert_eq!(page.cache.favorite_list(MEMBER), Some(vec![5, 42]));
    assert_eq!(page.cache.favorite_overrides(MEMBER), vec![(42, true)]);
}

#[tokio::test]
async fn test_toggle_persists_and_refreshes_favorites() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":1},{"id":7}],"totalPages":1,"number":0}"#).await;
    mount_favorites_once(&server, "[]").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/7/favorite"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // Re-read triggered by the toggle event
    mount_favorites_once(&server, r#"{"data":[7]}"#).await;

    let mut page = open_page(&server);
    let mut other_component = page.bridge.subscribe();
    page.controller.handle(Trigger::SessionChanged(member())).await;
    page.controller.handle(Trigger::SortToggled).await;
    assert_eq!(page.controller.page().ids(), vec![1, 7]);

    page.controller.handle(Trigger::FavoriteToggleRequested(7)).await;

    assert!(page.controller.is_favorite(7));
    assert_eq!(
        page.controller.favorite_state(),
        &FavoriteState::Ready(market_types::FavoriteSet::for_user(MEMBER, [7]))
    );
    assert_eq!(page.controller.page().ids(), vec![7, 1]);
    assert!(page.cache.favorite_overrides(MEMBER).is_empty());
    assert_eq!(
        other_component.try_recv(),
        Some(BridgeEvent::FavoriteToggled {
            project_id: 7,
            is_favorite: true
        })
    );
    assert!(page.controller.take_effects().is_empty());
}

#[tokio::test]
async fn test_failed_toggle_alerts_without_event() {
    let server = MockServer::start().await;
    mount_page(&server, r#"{"content":[{"id":7}],"totalPages":1,"number":0}"#).await;
    mount_favorites_once(&server, "[]").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/7/favorite"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page = open_page(&server);
    let mut other_component = page.bridge.subscribe();
    page.controller.handle(Trigger::SessionChanged(member())).await;
    page.controller.handle(Trigger::FavoriteToggleRequested(7)).await;

    assert!(!page.controller.is_favorite(7));
    assert_eq!(other_component.try_recv(), None);
    assert!(matches!(
        &page.controller.take_effects()[..],
        [UiEffect::Alert(_)]
    ));
}

#[tokio::test]
async fn test_dropping_page_unsubscribes() {
    let server = MockServer::start().await;
    let page = open_page(&server);
    assert_eq!(page.bridge.subscriber_count(), 1);

    let Page { controller, bridge, .. } = page;
    drop(controller);
    assert_eq!(bridge.subscriber_count(), 0);
}
