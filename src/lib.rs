use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use models::Session;
use services::auth::AuthManager;

// Application state
pub struct AppState {
    pub config: Config,
    pub auth: AuthManager,
    pub sessions: Mutex<HashMap<Uuid, Session>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let auth = AuthManager::new(config.demo_users.clone());
        Self {
            config,
            auth,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}
