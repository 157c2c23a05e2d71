//! In-memory user store
//!
//! An ordered list guarded by a single `RwLock`. Ids come from a counter kept
//! under the same lock, so concurrent creates never share an id and an id is
//! never handed out twice, even after deletes.

use crate::models::{User, UserInput};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
}

#[derive(Debug)]
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    // Every mutation is a single push/remove/assign, so a poisoned lock still
    // guards a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assign the next id and append to the end
    pub fn append(&self, input: UserInput) -> User {
        let mut inner = self.write();
        let user = User::from_input(inner.next_id, input);
        inner.next_id += 1;
        inner.users.push(user.clone());
        user
    }

    /// First record with `id`, if any
    pub fn find(&self, id: i64) -> Option<User> {
        self.read().users.iter().find(|user| user.id == id).cloned()
    }

    /// Overwrite name, email and password of the record with `id`
    pub fn update(&self, id: i64, input: UserInput) -> Option<User> {
        let mut inner = self.write();
        let user = inner.users.iter_mut().find(|user| user.id == id)?;
        user.apply(input);
        Some(user.clone())
    }

    /// Remove the record with `id`, keeping the order of the rest
    pub fn remove(&self, id: i64) -> Option<User> {
        let mut inner = self.write();
        let index = inner.users.iter().position(|user| user.id == id)?;
        Some(inner.users.remove(index))
    }

    /// Every record in insertion order
    pub fn list_all(&self) -> Vec<User> {
        self.read().users.clone()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn input(name: &str) -> UserInput {
        UserInput {
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            password: "p".to_string(),
        }
    }

    fn names(store: &UserStore) -> Vec<String> {
        store.list_all().into_iter().map(|u| u.name).collect()
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let store = UserStore::new();
        assert_eq!(store.append(input("A")).id, 1);
        assert_eq!(store.append(input("B")).id, 2);
        assert_eq!(store.list_all().len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = UserStore::new();
        store.append(input("A"));
        store.append(input("B"));
        store.remove(2);

        // len + 1 would hand out 2 again here
        assert_eq!(store.append(input("C")).id, 3);
    }

    #[test]
    fn test_find() {
        let store = UserStore::new();
        let created = store.append(input("A"));

        assert_eq!(store.find(created.id), Some(created));
        assert_eq!(store.find(999), None);
        assert_eq!(store.find(0), None);
    }

    #[test]
    fn test_update_keeps_id() {
        let store = UserStore::new();
        store.append(input("A"));

        let updated = store.update(1, input("Z")).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Z");
        assert_eq!(store.find(1), Some(updated));
        assert_eq!(store.update(7, input("Y")), None);
    }

    #[test]
    fn test_remove_preserves_order() {
        let store = UserStore::new();
        for name in ["A", "B", "C"] {
            store.append(input(name));
        }

        assert_eq!(store.remove(2).map(|u| u.name), Some("B".to_string()));
        assert_eq!(names(&store), vec!["A", "C"]);
        assert_eq!(store.remove(2), None);
    }

    #[test]
    fn test_empty_store() {
        let store = UserStore::new();
        assert!(store.list_all().is_empty());
        assert_eq!(store.find(1), None);
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let store = Arc::new(UserStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| store.append(input(&format!("U{}-{}", t, i))).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 400);
        assert_eq!(ids, (1..=400).collect::<Vec<_>>());
    }
}
