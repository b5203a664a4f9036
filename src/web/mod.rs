//! Web layer: HTTP server, routes, sessions, and server-rendered views
//!
//! This module contains everything between the browser and the analytics
//! backend: the axum server and its routes, the in-memory session store,
//! the Handlebars view engine, and the chart view-models the pages embed.

pub mod charts;
pub mod routes;
pub mod server;
pub mod session;
pub mod views;

pub use charts::{ChartKind, ChartRegistry, ChartSpec};
pub use routes::{create_router, ApiResponse, ErrorResponse};
pub use server::{AppState, DashboardServer, ServerInfo};
pub use session::{SessionData, SessionError, SessionKind, SessionStore};
pub use views::{PageContext, ViewEngine};
