//! # CreatorPulse Client
//!
//! Dashboard-side flow driver: builds the login redirect, handles the OAuth
//! callback, keeps the session, and runs the authenticated data-fetch
//! sequence. Rendering is left to the embedding UI.
//!
//! ## Modules
//!
//! - `login` - Authorization URL building
//! - `callback` - OAuth redirect handling and URL cleanup
//! - `session` - Typed access to the persisted login state
//! - `backend` - Client for the token-exchange gateway
//! - `graph` - Authenticated data API client
//! - `dashboard` - The identity → profile → metrics fetch sequence

pub mod backend;
pub mod callback;
pub mod dashboard;
pub mod graph;
pub mod login;
pub mod session;

pub use backend::BackendClient;
pub use callback::{handle_callback, CallbackHandled};
pub use dashboard::{fetch_dashboard, page_load, DashboardData, PageLoad};
pub use graph::GraphClient;
pub use login::{authorization_url, default_authorization_url};
pub use session::Session;
