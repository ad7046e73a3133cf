use crate::engine::Engine;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    // Handlers lock, run one synchronous engine call, and release.
    pub engine: Arc<RwLock<Engine>>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

pub type SharedState = Arc<AppState>;
