//! In-memory user repository.
//!
//! # Design Decisions
//! - One `RwLock` around the whole collection; every operation holds it for
//!   its full duration, so each call is atomic with respect to the others
//! - Poisoning is recovered: the collection holds plain values and a panic
//!   mid-operation cannot leave a half-written `User`
//! - Reads return owned snapshots so no lock escapes the store

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::users::model::User;

/// Storage seam between the HTTP handlers and the collection.
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// All users in insertion order.
    fn list(&self) -> Vec<User>;

    /// First user whose id equals `id`.
    fn find(&self, id: i64) -> Option<User>;

    /// Append `user` and return the updated collection.
    fn insert(&self, user: User) -> Vec<User>;

    /// Replace every user whose id equals `id`. Returns how many were replaced.
    fn replace(&self, id: i64, user: User) -> usize;

    /// Remove every user whose id equals `id`. Returns how many were removed.
    fn remove(&self, id: i64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Vec`-backed repository living for the lifetime of the service.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given users, in order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Create a store holding the startup fixture.
    pub fn seeded() -> Self {
        Self::with_users(vec![
            User::new(1, "Helton", 30),
            User::new(2, "Laiz", 28),
            User::new(3, "Thomas", 0),
        ])
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryUserStore {
    fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    fn find(&self, id: i64) -> Option<User> {
        self.read().iter().find(|user| user.id == id).cloned()
    }

    fn insert(&self, user: User) -> Vec<User> {
        let mut users = self.write();
        tracing::debug!(user_id = user.id, "Inserting user");
        users.push(user);
        users.clone()
    }

    fn replace(&self, id: i64, user: User) -> usize {
        let mut users = self.write();
        let mut replaced = 0;
        for slot in users.iter_mut().filter(|existing| existing.id == id) {
            *slot = user.clone();
            replaced += 1;
        }
        tracing::debug!(user_id = id, replaced, "Replaced users");
        replaced
    }

    fn remove(&self, id: i64) -> usize {
        let mut users = self.write();
        let before = users.len();
        users.retain(|user| user.id != id);
        let removed = before - users.len();
        tracing::debug!(user_id = id, removed, "Removed users");
        removed
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
