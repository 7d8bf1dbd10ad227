//! Data transfer objects: the JSON wire formats of the WebSocket protocol
//! and the HTTP observability endpoint.

pub mod http;
pub mod websocket;
