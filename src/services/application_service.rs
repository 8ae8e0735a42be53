use std::sync::Arc;

use tracing::info;

use crate::database::ApplicationStore;
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationChanges, ApplicationStats, NewApplication,
};
use crate::services::transition_policy::TransitionPolicy;

/// Owns application state changes and the status summary.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    policy: Arc<TransitionPolicy>,
}

fn not_found(id: i32) -> Error {
    Error::NotFound(format!("Application {} not found", id))
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self {
            store,
            policy: Arc::new(TransitionPolicy::default()),
        }
    }

    /// Library hook for a stricter workflow; the server keeps the default.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Stores the candidacy as given. Every new application starts `submitted`.
    pub async fn create(&self, application: NewApplication) -> Result<Application> {
        let application = self.store.insert(application).await?;
        info!(
            application_id = application.id,
            position = %application.position,
            "Application created"
        );
        Ok(application)
    }

    pub async fn list_all(&self) -> Result<Vec<Application>> {
        self.store.list_all().await
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Application>> {
        self.store.list_by_email(email).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Application> {
        self.store.find(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i32, changes: ApplicationChanges) -> Result<Application> {
        let current = self.get_by_id(id).await?;
        if let Some(next) = changes.status {
            self.policy.check(current.status, next)?;
        }

        let updated = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(
            application_id = id,
            from = %current.status,
            to = %updated.status,
            "Application updated"
        );
        Ok(updated)
    }

    pub async fn stats(&self) -> Result<ApplicationStats> {
        let counts = self.store.count_by_status().await?;
        Ok(ApplicationStats::from_counts(counts))
    }
}
