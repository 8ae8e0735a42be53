pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::Stores;
use crate::services::{application_service::ApplicationService, greeting_service::GreetingService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub application_service: ApplicationService,
    pub greeting_service: GreetingService,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Self {
        let application_service = ApplicationService::new(stores.applications);
        let greeting_service = GreetingService::new(stores.greetings);

        Self {
            config: Arc::new(config),
            application_service,
            greeting_service,
        }
    }
}
