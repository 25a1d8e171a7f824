//! Provider metadata shared by all resource handlers

use capella_client::{AuthContext, CapellaApi, Credentials};
use std::sync::Arc;

/// Configured API client plus the credentials that sign its calls
///
/// Built once during provider configuration and read-only afterwards.
#[derive(Clone)]
pub struct CapellaMeta {
    api: Arc<dyn CapellaApi>,
    credentials: Credentials,
}

impl CapellaMeta {
    pub fn new(api: Arc<dyn CapellaApi>, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    pub fn api(&self) -> &dyn CapellaApi {
        self.api.as_ref()
    }

    /// Context that signs one API call
    pub fn auth(&self) -> AuthContext<'_> {
        self.credentials.auth_context()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl std::fmt::Debug for CapellaMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapellaMeta")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
