//! REST surface of the dashboard.
//!
//! Everything the browser SPA fetches is served from here: the patient
//! panel, per-patient dashboard metrics, the calendar history view, and
//! the chat assistant. The router is composable — `api_router()` returns
//! a `Router` that can be mounted on any axum server instance. There is
//! no authentication: the UI's "login" is a role selector, and the role
//! travels as plain request data.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
