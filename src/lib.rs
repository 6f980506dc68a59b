//! # Forecourt - Dealership API Client and Admin Console
//!
//! Typed client for the Forecourt Motors storefront/back-office REST
//! API, with the state machines behind its screens and a small admin
//! console that drives them end to end.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   fetch/invalidate  ┌──────────────┐   requests  ┌──────────┐
//! │ View Models │◄───────────────────►│ Query Cache  │────────────►│ Services │
//! │             │                     │  Mutations   │             │          │
//! │ - Boards    │                     └──────────────┘             │ - REST   │
//! │ - Forms     │                                                  │ - Images │
//! │ - Lists     │──────────── uploads ───────────────────────────► │ - Session│
//! └─────────────┘                                                  └──────────┘
//! ```
//!
//! The cache de-duplicates reads per key and re-fetches on
//! invalidation; mutations are the only writers, and they invalidate by
//! key instead of touching anyone's cached data directly.

pub mod client;
pub mod cmd_args;
pub mod config;

// Re-export the types most callers wire together at startup.
pub use client::cache::{MutationExecutor, QueryCache, QueryKey, QueryResult};
pub use client::services::{ApiClient, CatalogApi, ImageStore, RemoteImageStore, SessionStore};
pub use client::{ApiError, FieldErrors, FormError, UploadError};
pub use config::{Config, ConfigError};
