use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registered user profile with demographic data and interests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    user_id: String,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub age: u32,
    pub address: String,
    /// Interest tags in the order they were entered, duplicates kept
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Profile {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
        age: u32,
        address: impl Into<String>,
        interests: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            gender: gender.into(),
            age,
            address: address.into(),
            interests,
        }
    }

    /// Identifier is fixed at creation
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

/// A chat message recorded by a chatroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "senderId")]
    pub sender_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    pub content: String,
    #[serde(rename = "sentAt")]
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: &str, receiver_id: &str, content: &str) -> Self {
        Self {
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            sent_at: Utc::now(),
        }
    }

    pub fn is_self_sent(&self) -> bool {
        self.sender_id == self.receiver_id
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.sender_id, self.receiver_id, self.content)
    }
}

/// Notification raised once per registry mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchNotification {
    MatchFound,
    NoMatch,
}

impl MatchNotification {
    pub fn from_status(status: bool) -> Self {
        if status {
            Self::MatchFound
        } else {
            Self::NoMatch
        }
    }
}

impl fmt::Display for MatchNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchFound => write!(f, "Congratulations! You have a new match!"),
            Self::NoMatch => write!(f, "No matches found. Please wait for potential matches."),
        }
    }
}

/// Score of one directed pairwise comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    #[serde(rename = "fromId")]
    pub from_id: String,
    #[serde(rename = "toId")]
    pub to_id: String,
    pub score: f64,
    pub matched: bool,
}
