//! Session registry abstraction.
//!
//! The registry trait lives in the domain layer; the in-memory implementation
//! lives in the infrastructure layer (dependency inversion). The usecase layer
//! depends only on this trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    entity::{GameSession, GameSnapshot},
    value_object::{PlayerName, RoomId},
};

/// Shared handle to one room's session.
///
/// The per-room mutex serializes all transitions of a session, which is what
/// keeps every transition atomic on a multi-threaded runtime.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Process-wide mapping from room identifier to game session.
///
/// Entries are added on the first join of a room and never removed: there is
/// no eviction, no capacity bound and no TTL. Whether "not found" means
/// create-new or is an error is decided by the caller, not the registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Return the existing session for the room, or None.
    async fn lookup(&self, room: &RoomId) -> Option<SessionHandle>;

    /// Return the existing session for the room, or atomically create a fresh
    /// one hosted by `host`. The boolean is true when a session was created.
    async fn lookup_or_create(&self, room: &RoomId, host: &PlayerName) -> (SessionHandle, bool);

    /// Snapshot every registered room.
    async fn list(&self) -> Vec<(RoomId, GameSnapshot)>;
}
