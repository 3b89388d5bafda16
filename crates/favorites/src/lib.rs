//! # Favorites Crate
//!
//! Keeps a page's favorite set consistent with the favorites directory.
//!
//! ## Components
//!
//! ### FavoriteDirectory
//! The remote source of truth. Implemented for `ApiClient`; tests plug in
//! their own implementation.
//!
//! ### SessionFavoriteCache
//! A session-scoped, non-authoritative mirror of the favorite list plus
//! per-project toggle overrides. Always injected, never required.
//!
//! ### EventBridge
//! Broadcast of `FavoriteToggled` and `VisibilityRestored` between
//! components that do not know each other.
//!
//! ### FavoriteSync
//! The per-page state machine: `Unauthenticated`, `Loading`, `Ready`,
//! `Stale`. Re-reads the directory on every trigger and degrades instead
//! of showing inconsistent data.
//!
//! ## Example Usage
//!
//! ```ignore
//! use favorites::{BridgeEvent, EventBridge, FavoriteSync, InMemorySessionCache};
//! use std::sync::Arc;
//!
//! let bridge = EventBridge::default();
//! let mut events = bridge.subscribe();
//! let mut sync = FavoriteSync::new(Arc::new(api), Arc::new(InMemorySessionCache::new()));
//!
//! sync.sign_in(member_id).await;
//! sync.toggle(42, true).await?;
//! bridge.publish(BridgeEvent::FavoriteToggled { project_id: 42, is_favorite: true });
//!
//! while let Some(event) = events.try_recv() {
//!     // route to sync.on_favorite_toggled / sync.on_visibility_restored
//! }
//! ```

pub mod cache;
pub mod directory;
pub mod events;
pub mod sync;

#[cfg(test)]
mod testing;

pub use cache::{InMemorySessionCache, SessionFavoriteCache};
pub use directory::FavoriteDirectory;
pub use events::{BridgeEvent, DEFAULT_BRIDGE_CAPACITY, EventBridge, Subscription};
pub use sync::{FavoriteState, FavoriteSync, SyncOutcome};
