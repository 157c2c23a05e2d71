use crate::container::Container;
use std::any::Any;
use std::sync::{OnceLock, RwLock};

/// Global config repository - stores config instances by type
static CONFIG_REPOSITORY: OnceLock<RwLock<Container>> = OnceLock::new();

/// Register a config in the global repository
pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    let repo = CONFIG_REPOSITORY.get_or_init(|| RwLock::new(Container::new()));
    if let Ok(mut repo) = repo.write() {
        repo.singleton(config);
    }
}

/// Get a copy of a config from the global repository
pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    let repo = CONFIG_REPOSITORY.get()?;
    let config = repo.read().ok()?.get::<T>()?;
    Some(T::clone(&config))
}
