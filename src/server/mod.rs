//! HTTP and WebSocket surface over the profile registry.
//!
//! ```text
//! ┌──────────┐   HTTP   ┌───────────────────────────────────────────────┐
//! │  Client  │ ───────> │  app.rs  (build_router, start_server)         │
//! │          │ <─────── │    ├─ api.rs  (JSON handlers, AppState)       │
//! └──────────┘ WebSocket│    └─ ws.rs   (invalidation stream, displays) │
//!                       │         │                                     │
//!                       │         v                                     │
//!                       │  ProfileRegistry → SectionService             │
//!                       └───────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod app;
pub mod ws;

pub use api::{AppState, SharedState, api_router};
pub use app::{build_router, start_server};
pub use ws::WsMessage;
