use indexmap::IndexSet;
use thiserror::Error;

use crate::models::{Message, Profile};

/// Errors that can occur when sending a message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Sender not in the chatroom: {0}")]
    SenderNotInRoom(String),

    #[error("Receiver not in the chatroom: {0}")]
    ReceiverNotInRoom(String),
}

/// Receives messages handed to another participant
pub trait DeliverySink {
    fn deliver(&mut self, sender: &Profile, receiver: &Profile, content: &str);
}

impl<F> DeliverySink for F
where
    F: FnMut(&Profile, &Profile, &str),
{
    fn deliver(&mut self, sender: &Profile, receiver: &Profile, content: &str) {
        self(sender, receiver, content)
    }
}

/// Default sink, reports deliveries through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DeliverySink for LogSink {
    fn deliver(&mut self, sender: &Profile, receiver: &Profile, content: &str) {
        tracing::info!(
            "{} received message from {}: {}",
            receiver.user_id(),
            sender.user_id(),
            content
        );
    }
}

/// Membership-gated message log
///
/// Participants are tracked by identifier only; the matchmaker keeps
/// ownership of the profiles. The log is append-only.
pub struct Chatroom {
    participants: IndexSet<String>,
    messages: Vec<Message>,
    sink: Box<dyn DeliverySink>,
}

impl Chatroom {
    pub fn new() -> Self {
        Self::with_sink(LogSink)
    }

    pub fn with_sink(sink: impl DeliverySink + 'static) -> Self {
        Self {
            participants: IndexSet::new(),
            messages: Vec::new(),
            sink: Box::new(sink),
        }
    }

    /// Adding someone already present is a no-op
    pub fn add_participant(&mut self, profile: &Profile) {
        if self.participants.insert(profile.user_id().to_string()) {
            tracing::debug!("{} joined the chatroom", profile.user_id());
        }
    }

    pub fn remove_participant(&mut self, profile: &Profile) {
        if self.participants.shift_remove(profile.user_id()) {
            tracing::debug!("{} left the chatroom", profile.user_id());
        }
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.contains(user_id)
    }

    /// Participant identifiers in join order
    pub fn participants(&self) -> impl Iterator<Item = &str> + Clone {
        self.participants.iter().map(String::as_str)
    }

    /// Log a message and hand it to the receiver
    ///
    /// The sender is checked before the receiver. Self-sent messages are
    /// logged but never delivered.
    pub fn send_message(
        &mut self,
        sender: &Profile,
        receiver: &Profile,
        content: &str,
    ) -> Result<&Message, ChatError> {
        if !self.is_participant(sender.user_id()) {
            tracing::warn!("Dropped message: sender {} not in the chatroom", sender.user_id());
            return Err(ChatError::SenderNotInRoom(sender.user_id().to_string()));
        }

        if !self.is_participant(receiver.user_id()) {
            tracing::warn!("Dropped message: receiver {} not in the chatroom", receiver.user_id());
            return Err(ChatError::ReceiverNotInRoom(receiver.user_id().to_string()));
        }

        let message = Message::new(sender.user_id(), receiver.user_id(), content);
        tracing::info!("Logged message {}", message);

        if !message.is_self_sent() {
            self.sink.deliver(sender, receiver, content);
        }

        self.messages.push(message);
        let idx = self.messages.len() - 1;
        Ok(&self.messages[idx])
    }

    /// Messages in send order; call again to restart
    pub fn messages(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Chatroom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chatroom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatroom")
            .field("participants", &self.participants)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}
