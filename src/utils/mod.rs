//! Key derivation helpers shared by the service and the admin CLI.
//!
//! - [`url_normalizer`] - URL canonicalization and request-boundary validation
//! - [`code_generator`] - Deterministic short code derivation

pub mod code_generator;
pub mod url_normalizer;
