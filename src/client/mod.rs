//! # Dealership Client
//!
//! Typed client for the Forecourt Motors REST API, organized in layers:
//! models carry the wire entities with boundary normalization, services
//! own transport and session concerns, the cache layer de-duplicates and
//! invalidates reads, and view models hold the screen-facing state
//! machines (lists, forms, boards).
//!
//! ```text
//! ┌──────────────┐   fetch/invalidate   ┌─────────────┐    requests   ┌──────────┐
//! │ View Models  │◄────────────────────►│ Query Cache │──────────────►│ Services │
//! │              │                      │  Mutations  │               │          │
//! │ - Boards     │                      └─────────────┘               │ - Api    │
//! │ - Forms      │                                                    │ - Images │
//! │ - Lists      │─────────────── uploads ───────────────────────────►│ - Session│
//! └──────────────┘                                                    └──────────┘
//! ```

pub mod cache;
pub mod error;
pub mod models;
pub mod services;
pub mod view_models;

pub use error::{ApiError, FieldErrors, FormError, UploadError};
