//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the durable
//! store and the cache. Services consume repository and cache traits and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short code creation and resolution

pub mod services;
