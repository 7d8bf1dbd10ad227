//! Server state and connection management.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, mpsc};

use crate::domain::SessionRegistry;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp when connected (in JST, milliseconds)
    pub connected_at: i64,
}

/// Shared application state
pub struct AppState {
    /// Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn SessionRegistry>,
    /// Broadcast membership: room id -> connection id -> sender channel
    pub room_members: Mutex<HashMap<String, HashMap<String, ClientInfo>>>,
}

impl AppState {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self {
            registry,
            room_members: Mutex::new(HashMap::new()),
        }
    }
}
