//! Matchmate - interest-based matchmaking and chat
//!
//! This library provides the compatibility scoring, the matchmaker that keeps
//! the profile registry and raises match notifications, and the chatroom that
//! gates message delivery on membership. The `shell` module is the console
//! front-end built on top of them.

pub mod config;
pub mod core;
pub mod models;
pub mod shell;

// Re-export commonly used types
pub use crate::core::{compatibility_score, ChatError, Chatroom, Matchmaker, MatchmakerError, MATCH_THRESHOLD};
pub use crate::models::{MatchNotification, Message, Profile, RegistrationForm};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let a = Profile::new("a", "A", "a@example.com", "female", 20, "", vec!["x".to_string()]);
        assert_eq!(compatibility_score(&a, &a), 0.2);
        assert!(Matchmaker::new().find_matches(&a).is_empty());
    }
}
