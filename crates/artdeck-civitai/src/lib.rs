//! CivitAI REST client for artdeck.
//!
//! Implements the `CatalogHttp` port from `artdeck-core` over the public
//! CivitAI v1 API: URL construction from typed queries, retry with
//! exponential backoff for transient failures, and API-key authentication.
//!
//! External consumers interact with this crate through the port trait; the
//! HTTP backend and error types here are implementation details mapped to
//! core types at the boundary.

mod client;
mod config;
mod error;
mod http;
mod url_builder;

pub use client::{CivitaiClient, DefaultCivitaiClient};
pub use config::CivitaiConfig;
pub use error::{CivitaiError, CivitaiResult};
pub use http::{HttpBackend, ReqwestBackend};
