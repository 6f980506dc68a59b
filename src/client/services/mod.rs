//! # Services
//!
//! Collaborator adapters: the REST transport, the remote image store,
//! and the session token. Services own every network and credential
//! concern so the cache and view-model layers never touch a URL.

pub mod catalog;
pub mod http;
pub mod image_store;
pub mod session;

pub use catalog::CatalogApi;
pub use http::ApiClient;
pub use image_store::{ImageStore, LocalImage, RemoteImageStore, UploadFuture};
pub use session::SessionStore;
