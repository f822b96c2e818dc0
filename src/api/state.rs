use std::sync::Arc;

use crate::{
    repository::{Catalog, CourseRepository, InMemoryStore, UserRepository},
    services::{Artifacts, RecommendationEngine},
};

/// Shared application state
///
/// Everything here is built once before the listener starts. The engine and
/// catalog are read-only; user state lives behind the user repository.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub catalog: Arc<dyn CourseRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        engine: Arc<RecommendationEngine>,
        catalog: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            engine,
            catalog,
            users,
        }
    }

    /// State backed by a single in-memory store for both catalog and users
    pub fn in_memory(catalog: Catalog, artifacts: Artifacts) -> Self {
        let store = Arc::new(InMemoryStore::new(catalog));
        let engine = Arc::new(RecommendationEngine::new(artifacts, store.clone()));
        Self::new(engine, store.clone(), store)
    }
}
