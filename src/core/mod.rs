// Core matchmaking exports
pub mod chatroom;
pub mod matcher;
pub mod registry;
pub mod scoring;

pub use chatroom::{ChatError, Chatroom, DeliverySink, LogSink};
pub use matcher::{LogNotifier, MatchNotifier, Matchmaker, MatchmakerError, UpdateOutcome};
pub use registry::ProfileRegistry;
pub use scoring::{compatibility_score, is_match, shared_interests, INTEREST_NORMALIZER, MATCH_THRESHOLD};
