use type_map::concurrent::TypeMap;

use crate::{
    config::ServiceConfig,
    repository::{RepositoryObject, SetRepository},
};

/// Everything a service shares between requests: its configuration and the
/// store handles, looked up by the type they hold.
pub struct ServiceState {
    pub config: ServiceConfig,
    pub repositories: TypeMap,
}

impl ServiceState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            repositories: TypeMap::new(),
        }
    }

    pub fn insert<T: 'static>(&mut self, repository: RepositoryObject<T>) {
        self.repositories.insert(repository);
    }

    pub fn with<T, R>(mut self, repository: R) -> Self
    where
        T: 'static,
        R: SetRepository<T> + Send + Sync + 'static,
    {
        self.insert::<T>(std::sync::Arc::new(repository));
        self
    }
}
