//! Admin user directory
//!
//! Users are loaded from the seed file and edited in memory; there is no
//! login behind them.

use serde::Serialize;

use crate::model::{RoleFilter, User, UserStatus, UserUpdate};

/// Search constraints for the users list
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring of name or email
    pub term: String,
    pub role: RoleFilter,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub active: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Users matching both the term and the role, in directory order
    pub fn filter(&self, filter: &UserFilter) -> Vec<User> {
        let term = filter.term.to_lowercase();

        self.users
            .iter()
            .filter(|user| {
                term.is_empty()
                    || user.name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
            })
            .filter(|user| filter.role.accepts(user.role))
            .cloned()
            .collect()
    }

    pub fn update(&mut self, id: &str, changes: UserUpdate) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        Some(user.clone())
    }

    pub fn counts(&self) -> UserCounts {
        let active = self
            .users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count();
        UserCounts {
            active,
            inactive: self.users.len() - active,
        }
    }
}
