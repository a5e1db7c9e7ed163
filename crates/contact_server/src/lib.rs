//! # Contact server
//!
//! HTTP backend for the portfolio desktop's contact window.
//!
//! - `GET /health` reports liveness and whether submissions are persisted
//! - `POST /api/contact` validates a submission and hands it to the configured
//!   [`store::ContactStore`]
//!
//! Submissions go to a Supabase table when `SUPABASE_URL` and `SUPABASE_ANON_KEY` are set, and
//! are only logged otherwise (demo mode).
//!
//! ## Module Overview
//!
//! - [`config`] - CLI and environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`http_server`] - router, handlers, and server loop
//! - [`cors`] - origin allow-list
//! - [`rate_limit`] - per-client fixed-window limiter
//! - [`store`] - Supabase and demo-mode persistence
//! - [`error`] - API error envelope

pub mod config;
pub mod cors;
pub mod error;
pub mod http_server;
pub mod logging;
pub mod rate_limit;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use http_server::{create_router, run_server, AppState};
pub use store::{select_store, ContactStore, LoggingStore, StoreError, StoredContact, SupabaseStore};
