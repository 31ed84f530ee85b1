//! # CreatorPulse Gateway
//!
//! Token-exchange backend for the dashboard. Holds the provider app secret
//! and performs the code-for-token exchange server-side so the secret never
//! reaches the browser.
//!
//! ## Modules
//!
//! - `settings` - Immutable process configuration from the environment
//! - `provider` - Client for the provider's secret-bearing token endpoints
//! - `server` - Axum HTTP server exposing the exchange API

pub mod provider;
pub mod server;
pub mod settings;

pub use provider::{ExchangeError, ProviderClient};
pub use server::{AppState, GatewayConfig, GatewayServer};
pub use settings::{GatewaySettings, OAUTH_CALLBACK_PATH};
