//! Super-users, whose messages are never moderated

use std::collections::HashSet;

/// Membership check for the super-user list
pub trait SuperUsers: Send + Sync {
    fn is_super(&self, username: &str) -> bool;
}

/// Static list of usernames, compared case-insensitively, `@` optional
#[derive(Debug, Clone, Default)]
pub struct SuperUserList {
    names: HashSet<String>,
}

impl SuperUserList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| normalize(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SuperUsers for SuperUserList {
    fn is_super(&self, username: &str) -> bool {
        let name = normalize(username);
        !name.is_empty() && self.names.contains(&name)
    }
}

fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('@').to_lowercase()
}
