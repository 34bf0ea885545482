use std::sync::Arc;

use crate::{config::Config, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, config: Config) -> Self {
        Self { store, config }
    }
}
