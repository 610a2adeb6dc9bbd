//! Local mirror of the remote user collection.
//!
//! The list is overwritten wholesale by a successful load and afterwards only
//! patched in place: [`UserList::apply_update`] after a confirmed save and
//! [`UserList::remove`] after a confirmed delete. It is never merged, never
//! persisted and never re-fetched after mount.

use std::any::Any;
use std::collections::HashSet;

use log::warn;
use roster_states::{State, snapshot_clone};

use crate::users::model::{User, UserId};

/// Progress of the one-shot initial load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    Failed,
}

impl LoadStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// Ordered users in server response order. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct UserList {
    users: Vec<User>,
    status: LoadStatus,
}

impl UserList {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// True from mount until the initial fetch settles.
    pub fn is_loading(&self) -> bool {
        !self.status.is_settled()
    }

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Overwrite the list with a fresh server response.
    ///
    /// Duplicate ids keep their first occurrence. Returns the number of
    /// entries dropped.
    pub fn replace_all(&mut self, users: Vec<User>) -> usize {
        let received = users.len();
        let mut seen = HashSet::with_capacity(received);
        self.users = users
            .into_iter()
            .filter(|user| {
                let fresh = seen.insert(user.id);
                if !fresh {
                    warn!("Ignoring duplicate user id {} in list response", user.id);
                }
                fresh
            })
            .collect();
        self.status = LoadStatus::Loaded;
        received - self.users.len()
    }

    /// The list stays as it was, normally empty.
    pub fn load_failed(&mut self) {
        self.status = LoadStatus::Failed;
    }

    /// Replace the entry with the same id. Returns false when no entry matched.
    pub fn apply_update(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|entry| entry.id == user.id) {
            Some(entry) => {
                *entry = user;
                true
            }
            None => false,
        }
    }

    /// Drop the entry with `id`. Returns false when no entry matched.
    pub fn remove(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }
}

impl State for UserList {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}
