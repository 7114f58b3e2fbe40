// Model exports
pub mod domain;
pub mod requests;

pub use domain::{MatchNotification, Message, PairOutcome, Profile};
pub use requests::{parse_interests, RegistrationForm};
