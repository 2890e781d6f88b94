use std::sync::Arc;

use crate::config::ServerConfig;
use crate::context::DashboardContext;

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<DashboardContext>,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(context: DashboardContext, server: ServerConfig) -> Self {
        Self {
            context: Arc::new(context),
            server: Arc::new(server),
        }
    }
}
