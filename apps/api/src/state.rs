use std::sync::Arc;

use crate::config::Config;
use crate::gateway::{AssessmentGateway, ScoringGateway};
use crate::store::AppStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: AppStore,
    pub scorer: Arc<ScoringGateway>,
    pub assessor: Arc<AssessmentGateway>,
    pub config: Config,
}
