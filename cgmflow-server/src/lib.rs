//! HTTP service for CgmFlow
//!
//! Serves the eligible-device lookup and runs flows over JSON. No session lives in memory
//! between requests: each request rebuilds its session from the snapshot in the store, acts on
//! it, and the session writes the new snapshot back.

mod id;
pub use id::SessionId;

mod config;
pub use config::{ ServerConfig, ServerError, DEFAULT_BIND };

mod state;
pub use state::AppState;

mod view;
pub use view::{ FlowView, ErrorBody };

mod handlers;

mod routes;
pub use routes::{ routes, handle_rejection };
