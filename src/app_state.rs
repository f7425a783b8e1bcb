//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::backend::Backend;
use crate::config::AppConfig;
use crate::service::{
    AccountService, AdminService, CatalogService, OrganizerService, ParticipantService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Login and registration.
    pub account: Arc<AccountService>,
    /// Admin dashboard.
    pub admin: Arc<AdminService>,
    /// Home page.
    pub catalog: Arc<CatalogService>,
    /// Organizer dashboard.
    pub organizer: Arc<OrganizerService>,
    /// Participant dashboard.
    pub participant: Arc<ParticipantService>,
    /// Whether session cookies are marked `Secure`.
    pub secure_cookies: bool,
    /// Name of the backend in use.
    pub backend_name: &'static str,
}

impl AppState {
    /// Wires every page component to `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, config: &AppConfig) -> Self {
        let backend_name = backend.name();
        Self {
            account: Arc::new(AccountService::new(Arc::clone(&backend))),
            admin: Arc::new(AdminService::new(Arc::clone(&backend))),
            catalog: Arc::new(CatalogService::new(
                Arc::clone(&backend),
                config.featured_events_limit,
            )),
            organizer: Arc::new(OrganizerService::new(Arc::clone(&backend))),
            participant: Arc::new(ParticipantService::new(backend)),
            secure_cookies: config.session_cookie_secure,
            backend_name,
        }
    }
}
