use indexmap::IndexMap;

use crate::models::Profile;

/// Profile storage keyed by user identifier
///
/// Iterates in insertion order; removal keeps the order of the remaining
/// profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: IndexMap<String, Profile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.profiles.contains_key(user_id)
    }

    pub fn get(&self, user_id: &str) -> Option<&Profile> {
        self.profiles.get(user_id)
    }

    /// Insert a profile, handing it back if the identifier is already taken
    pub fn insert(&mut self, profile: Profile) -> Result<&Profile, Profile> {
        if self.contains(profile.user_id()) {
            return Err(profile);
        }
        let entry = self.profiles.entry(profile.user_id().to_string());
        Ok(entry.or_insert(profile))
    }

    pub fn remove(&mut self, user_id: &str) -> Option<Profile> {
        self.profiles.shift_remove(user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> + Clone {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
