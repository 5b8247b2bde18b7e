//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::config::ResolveMode;
use crate::infrastructure::persistence::PgUrlRepository;

/// How the resolve endpoint answers a found code.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub mode: ResolveMode,
    /// Prepended as `<scheme>://` to the stored URL when redirecting.
    pub redirect_scheme: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            mode: ResolveMode::Redirect,
            redirect_scheme: "https".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub resolve: ResolveOptions,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService<PgUrlRepository>>, resolve: ResolveOptions) -> Self {
        Self {
            url_service,
            resolve,
        }
    }
}
