use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{ClinicProfile, Session};

pub struct AppState {
    pub config: AppConfig,
    pub clinic: ClinicProfile,
    /// In-memory session store. Bookings are never persisted; everything is
    /// lost on restart, matching the widget's page-reload semantics.
    pub sessions: Mutex<HashMap<Uuid, Session>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let clinic = ClinicProfile::from_config(&config);
        AppState {
            config,
            clinic,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}
