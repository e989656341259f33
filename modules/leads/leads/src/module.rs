use std::sync::Arc;

use axum::Router;
use tracing::{debug, info};

use leads_sdk::LeadsClient;

use crate::api::rest::auth::SessionState;
use crate::api::rest::routes;
use crate::config::LeadsConfig;
use crate::domain::ports::{ResumeStore, SessionProvider};
use crate::domain::repo::LeadsRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::auth::StaticSessionProvider;
use crate::infra::resume::NamingResumeStore;
use crate::infra::storage::InMemoryLeadStore;
use crate::local_client::LeadsLocalClient;

/// Composition root of the leads module: wires the store, the resume
/// store and the session provider into the service and the REST router.
#[derive(Clone)]
pub struct LeadsModule {
    service: Arc<Service>,
    sessions: SessionState,
    body_limit_bytes: usize,
}

impl LeadsModule {
    /// Build the module with the in-memory store and the configured admin account.
    ///
    /// # Errors
    /// Returns an error when the configuration is inconsistent.
    pub fn new(config: &LeadsConfig) -> anyhow::Result<Self> {
        Self::with_ports(
            config,
            Arc::new(InMemoryLeadStore::new()),
            Arc::new(NamingResumeStore::new(config.upload_base_path.clone())),
            Arc::new(StaticSessionProvider::new(&config.auth)),
        )
    }

    /// Build the module around caller-supplied adapters.
    ///
    /// # Errors
    /// Returns an error when the configuration is inconsistent.
    pub fn with_ports(
        config: &LeadsConfig,
        repo: Arc<dyn LeadsRepository>,
        resumes: Arc<dyn ResumeStore>,
        sessions: Arc<dyn SessionProvider>,
    ) -> anyhow::Result<Self> {
        info!("Initializing leads module");
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid leads config: {e}"))?;
        debug!(
            "Loaded leads config: default_page_size={}, max_page_size={}, auth_enabled={}",
            config.default_page_size, config.max_page_size, config.auth.enabled
        );

        let service = Arc::new(Service::new(
            repo,
            resumes,
            ServiceConfig {
                limits: config.query_limits(),
                max_resume_bytes: config.max_resume_bytes,
            },
        ));

        Ok(Self {
            service,
            sessions: SessionState::new(sessions, &config.auth),
            body_limit_bytes: config.body_limit_bytes,
        })
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client over the same service the router uses.
    #[must_use]
    pub fn client(&self) -> Arc<dyn LeadsClient> {
        Arc::new(LeadsLocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service.clone(), self.sessions.clone(), self.body_limit_bytes)
    }
}
