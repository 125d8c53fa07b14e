//! eegview Client - Backend transport adapters
//!
//! Two transports satisfy the same analysis port: a plain request/response
//! HTTP adapter and a persistent WebSocket channel with bounded
//! reconnection. Both map every failure into the core error taxonomy; no
//! raw transport error type crosses a port boundary.

pub mod channel;
pub mod http;

pub use channel::{SocketBackend, SocketChannel};
pub use http::HttpBackend;
