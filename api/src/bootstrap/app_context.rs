use std::sync::Arc;

use crate::application::ports::poll_repository::PollRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    poll_repo: Arc<dyn PollRepository>,
}

impl AppServices {
    pub fn new(poll_repo: Arc<dyn PollRepository>) -> Self {
        Self { poll_repo }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn poll_repo(&self) -> Arc<dyn PollRepository> {
        self.services.poll_repo.clone()
    }
}
