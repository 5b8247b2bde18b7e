//! Domain layer containing the URL mapping entity and data access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::UrlRecord`] mapping
//! - [`repositories`] - Durable store trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
