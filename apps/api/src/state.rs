use std::sync::Arc;

use crate::config::Config;
use crate::grading::grader::EssayGrader;
use crate::shell::sessions::ShellRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable grader. Default: GeminiEssayGrader.
    pub grader: Arc<dyn EssayGrader>,
    /// One view-state record per browser, keyed by client cookie.
    pub shells: Arc<ShellRegistry>,
    pub config: Config,
}

impl AppState {
    pub fn new(grader: Arc<dyn EssayGrader>, config: Config) -> Self {
        Self {
            grader,
            shells: Arc::new(ShellRegistry::new(config.thresholds)),
            config,
        }
    }
}
