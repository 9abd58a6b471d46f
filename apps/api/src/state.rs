use std::sync::Arc;

use crate::catalog::Catalog;
use crate::llm_client::TextGenerator;
use crate::session::SharedSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Production: GeminiClient; tests: a stub.
    pub llm: Arc<dyn TextGenerator>,
    pub catalog: Arc<Catalog>,
    /// The one session this process serves; the SPA is single-user.
    pub session: SharedSession,
}
