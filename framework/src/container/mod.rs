//! Type-keyed state container
//!
//! Holds shared singletons (stores, clients, config) that handlers resolve
//! from the incoming `Request`. One container is attached to a `Router` and
//! shared by every request it dispatches.
//!
//! # Example
//!
//! ```rust,ignore
//! let router = Router::new()
//!     .with_state(UserStore::new())
//!     .get("/users", controllers::user::index);
//!
//! pub async fn index(req: Request) -> Response {
//!     let store = req.state::<UserStore>()?;
//!     // ...
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Stores one shared instance per concrete type
#[derive(Clone, Default)]
pub struct Container {
    bindings: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    /// Create a new empty container
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Register a singleton instance, replacing any previous one of the same type
    pub fn singleton<T: Any + Send + Sync + 'static>(&mut self, instance: T) {
        self.bindings.insert(TypeId::of::<T>(), Arc::new(instance));
    }

    /// Resolve a shared handle to a registered instance
    pub fn get<T: Any + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.bindings
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|arc| arc.downcast::<T>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    struct Counter(u32);

    #[test]
    fn test_singleton_is_shared() {
        let mut container = Container::new();
        container.singleton(Mutex::new(Counter(0)));

        let first = container.get::<Mutex<Counter>>().unwrap();
        first.lock().unwrap().0 += 1;

        let second = container.get::<Mutex<Counter>>().unwrap();
        assert_eq!(*second.lock().unwrap(), Counter(1));
    }

    #[test]
    fn test_missing_type_resolves_to_none() {
        let container = Container::new();
        assert!(container.get::<Counter>().is_none());
    }

    #[test]
    fn test_singleton_replaces_previous() {
        let mut container = Container::new();
        container.singleton(Counter(1));
        container.singleton(Counter(2));

        assert_eq!(*container.get::<Counter>().unwrap(), Counter(2));
    }
}
