//! Shared state for the API router.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::assistant::OllamaClient;
use crate::config::Settings;

/// Shared context for all API routes.
///
/// The SQLite connection is behind a mutex; handlers take the lock only
/// for the duration of their queries and never across an await point.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub assistant: Arc<OllamaClient>,
    pub settings: Arc<Settings>,
}

impl ApiContext {
    pub fn new(conn: Connection, settings: Settings) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            assistant: Arc::new(OllamaClient::from_settings(&settings)),
            settings: Arc::new(settings),
        }
    }
}
