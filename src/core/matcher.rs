use thiserror::Error;

use crate::core::{
    registry::ProfileRegistry,
    scoring::{compatibility_score, is_match},
};
use crate::models::{MatchNotification, PairOutcome, Profile};

/// Errors raised by registry mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchmakerError {
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

/// Observer for the notification raised after each registry mutation
pub trait MatchNotifier {
    fn notify(&mut self, notification: MatchNotification);
}

impl<F> MatchNotifier for F
where
    F: FnMut(MatchNotification),
{
    fn notify(&mut self, notification: MatchNotification) {
        self(notification)
    }
}

/// Default notifier, reports through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl MatchNotifier for LogNotifier {
    fn notify(&mut self, notification: MatchNotification) {
        tracing::info!(?notification, "{}", notification);
    }
}

/// Every comparison performed by one add/remove call, plus what was emitted
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub comparisons: Vec<PairOutcome>,
    pub notification: MatchNotification,
}

impl UpdateOutcome {
    /// True if any comparison in this update crossed the threshold
    pub fn any_match(&self) -> bool {
        self.comparisons.iter().any(|c| c.matched)
    }
}

/// Owns the profile registry and raises match notifications on change
///
/// `flag` and `status` only describe the last pairwise comparison run by
/// the most recent add/remove. They are not an aggregate over the update.
pub struct Matchmaker {
    registry: ProfileRegistry,
    flag: bool,
    status: bool,
    notifier: Box<dyn MatchNotifier>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::with_notifier(LogNotifier)
    }

    pub fn with_notifier(notifier: impl MatchNotifier + 'static) -> Self {
        Self {
            registry: ProfileRegistry::new(),
            flag: false,
            status: false,
            notifier: Box::new(notifier),
        }
    }

    /// Register a new profile and compare it against everyone already present
    ///
    /// Each existing profile is scored in both directions, in registry order.
    /// Exactly one notification is emitted after all comparisons.
    pub fn add_user(&mut self, profile: Profile) -> Result<UpdateOutcome, MatchmakerError> {
        let subject = match self.registry.insert(profile) {
            Ok(inserted) => inserted.clone(),
            Err(rejected) => {
                tracing::warn!("Rejected duplicate registration for {}", rejected.user_id());
                return Err(MatchmakerError::DuplicateUser(rejected.user_id().to_string()));
            }
        };

        tracing::info!("Registered user {} ({} profiles)", subject.user_id(), self.registry.len());

        Ok(self.recompute(&subject))
    }

    /// Remove a profile and compare it against everyone who remains
    pub fn remove_user(&mut self, user_id: &str) -> Result<(Profile, UpdateOutcome), MatchmakerError> {
        let Some(removed) = self.registry.remove(user_id) else {
            tracing::warn!("Cannot remove unknown user {}", user_id);
            return Err(MatchmakerError::UserNotFound(user_id.to_string()));
        };

        tracing::info!("Removed user {} ({} profiles left)", user_id, self.registry.len());

        let outcome = self.recompute(&removed);
        Ok((removed, outcome))
    }

    /// Exact lookup by identifier
    pub fn get_user(&self, user_id: &str) -> Option<&Profile> {
        self.registry.get(user_id)
    }

    /// Profiles whose score from `subject` is above the match threshold
    ///
    /// The subject itself is skipped; registry order is preserved.
    pub fn find_matches(&self, subject: &Profile) -> Vec<&Profile> {
        self.registry
            .iter()
            .filter(|candidate| candidate.user_id() != subject.user_id())
            .filter(|candidate| is_match(compatibility_score(subject, candidate)))
            .collect()
    }

    pub fn users(&self) -> impl Iterator<Item = &Profile> + Clone {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Whether the registry was non-empty after the last add/remove
    pub fn last_flag(&self) -> bool {
        self.flag
    }

    /// Result of the last pairwise comparison performed
    pub fn last_status(&self) -> bool {
        self.status
    }

    fn recompute(&mut self, subject: &Profile) -> UpdateOutcome {
        self.flag = !self.registry.is_empty();
        self.status = false;

        let others: Vec<Profile> = self
            .registry
            .iter()
            .filter(|other| other.user_id() != subject.user_id())
            .cloned()
            .collect();

        let mut comparisons = Vec::with_capacity(others.len() * 2);
        for other in &others {
            comparisons.push(self.update_flag(other, subject));
            comparisons.push(self.update_flag(subject, other));
        }

        let notification = MatchNotification::from_status(self.status);
        self.notifier.notify(notification);

        UpdateOutcome {
            comparisons,
            notification,
        }
    }

    fn update_flag(&mut self, from: &Profile, to: &Profile) -> PairOutcome {
        self.flag = !self.registry.is_empty();
        let score = compatibility_score(from, to);
        self.status = self.flag && is_match(score);

        tracing::debug!(
            "Compared {} -> {}: score={:.2}, status={}",
            from.user_id(),
            to.user_id(),
            score,
            self.status
        );

        PairOutcome {
            from_id: from.user_id().to_string(),
            to_id: to.user_id().to_string(),
            score,
            matched: self.status,
        }
    }
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Matchmaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matchmaker")
            .field("registry", &self.registry)
            .field("flag", &self.flag)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_profile(id: &str, interests: &[&str]) -> Profile {
        Profile::new(
            id,
            format!("User {}", id),
            format!("{}@example.com", id),
            "female",
            27,
            "42 Test Lane",
            interests.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn recording_matchmaker() -> (Matchmaker, Rc<RefCell<Vec<MatchNotification>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let matchmaker = Matchmaker::with_notifier(move |n: MatchNotification| sink.borrow_mut().push(n));
        (matchmaker, seen)
    }

    #[test]
    fn test_first_user_has_no_comparisons() {
        let (mut matchmaker, seen) = recording_matchmaker();

        let outcome = matchmaker.add_user(create_profile("a", &["chess"])).unwrap();

        assert!(outcome.comparisons.is_empty());
        assert_eq!(outcome.notification, MatchNotification::NoMatch);
        assert!(matchmaker.last_flag());
        assert!(!matchmaker.last_status());
        assert_eq!(*seen.borrow(), vec![MatchNotification::NoMatch]);
    }

    #[test]
    fn test_low_overlap_is_no_match() {
        let (mut matchmaker, seen) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &["hiking", "chess", "movies"])).unwrap();
        let outcome = matchmaker
            .add_user(create_profile("b", &["chess", "movies", "reading"]))
            .unwrap();

        assert!(!matchmaker.last_status());
        assert_eq!(outcome.comparisons.len(), 2);
        assert_eq!(seen.borrow().last(), Some(&MatchNotification::NoMatch));
    }

    #[test]
    fn test_match_found_notification() {
        let (mut matchmaker, seen) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &["x", "y", "z"])).unwrap();
        let outcome = matchmaker.add_user(create_profile("b", &["x", "y", "z"])).unwrap();

        assert!(matchmaker.last_status());
        assert_eq!(outcome.notification, MatchNotification::MatchFound);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_last_comparison_wins() {
        let (mut matchmaker, _) = recording_matchmaker();
        // "a" matches the newcomer, "b" (compared last) does not
        matchmaker.add_user(create_profile("a", &["x", "y", "z"])).unwrap();
        matchmaker.add_user(create_profile("b", &["q"])).unwrap();
        let outcome = matchmaker.add_user(create_profile("c", &["x", "y", "z"])).unwrap();

        assert!(outcome.any_match());
        assert!(!matchmaker.last_status());
        assert_eq!(outcome.notification, MatchNotification::NoMatch);

        let order: Vec<(&str, &str)> = outcome
            .comparisons
            .iter()
            .map(|c| (c.from_id.as_str(), c.to_id.as_str()))
            .collect();
        assert_eq!(order, vec![("a", "c"), ("c", "a"), ("b", "c"), ("c", "b")]);
    }

    #[test]
    fn test_directional_last_comparison() {
        let (mut matchmaker, _) = recording_matchmaker();
        // existing -> new scores 0.6, new -> existing scores 0.2; the latter runs last
        matchmaker.add_user(create_profile("a", &["x", "x", "x"])).unwrap();
        matchmaker.add_user(create_profile("b", &["x"])).unwrap();

        assert!(!matchmaker.last_status());
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let (mut matchmaker, seen) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &["chess"])).unwrap();

        let err = matchmaker.add_user(create_profile("a", &["go"])).unwrap_err();

        assert_eq!(err, MatchmakerError::DuplicateUser("a".to_string()));
        assert_eq!(matchmaker.len(), 1);
        assert_eq!(matchmaker.get_user("a").unwrap().interests(), ["chess"]);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_remove_unknown_user() {
        let (mut matchmaker, seen) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &[])).unwrap();

        let err = matchmaker.remove_user("ghost").unwrap_err();

        assert_eq!(err, MatchmakerError::UserNotFound("ghost".to_string()));
        assert_eq!(matchmaker.len(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_remove_recomputes_against_remaining() {
        let (mut matchmaker, seen) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &["x", "y", "z"])).unwrap();
        matchmaker.add_user(create_profile("b", &["x", "y", "z"])).unwrap();

        let (removed, outcome) = matchmaker.remove_user("b").unwrap();

        assert_eq!(removed.user_id(), "b");
        assert_eq!(outcome.comparisons.len(), 2);
        assert_eq!(outcome.notification, MatchNotification::MatchFound);
        assert!(matchmaker.get_user("b").is_none());
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_remove_last_user_resets_state() {
        let (mut matchmaker, _) = recording_matchmaker();
        matchmaker.add_user(create_profile("a", &["x", "y", "z"])).unwrap();
        matchmaker.add_user(create_profile("b", &["x", "y", "z"])).unwrap();
        matchmaker.remove_user("a").unwrap();

        let (_, outcome) = matchmaker.remove_user("b").unwrap();

        assert!(outcome.comparisons.is_empty());
        assert!(!matchmaker.last_flag());
        assert!(!matchmaker.last_status());
        assert!(matchmaker.is_empty());
    }

    #[test]
    fn test_find_matches_excludes_subject_and_keeps_order() {
        let (mut matchmaker, _) = recording_matchmaker();
        let subject = create_profile("me", &["a", "b", "c"]);
        matchmaker.add_user(create_profile("z", &["a", "b", "c"])).unwrap();
        matchmaker.add_user(subject.clone()).unwrap();
        matchmaker.add_user(create_profile("low", &["a"])).unwrap();
        matchmaker.add_user(create_profile("m", &["c", "b", "a", "d"])).unwrap();

        let ids: Vec<&str> = matchmaker
            .find_matches(&subject)
            .into_iter()
            .map(Profile::user_id)
            .collect();

        assert_eq!(ids, vec!["z", "m"]);
    }
}
