use std::io::{BufRead, Write};

use super::{render, Shell, ShellError};
use crate::models::{MatchNotification, Profile};

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Logged-in menu; returns on Logout
    pub(super) fn session(&mut self, current: &Profile) -> Result<(), ShellError> {
        loop {
            writeln!(self.output, "1. Find Matches")?;
            writeln!(self.output, "2. Chat")?;
            writeln!(self.output, "3. Chat History")?;
            writeln!(self.output, "4. Logout")?;

            let choice = self.prompt("Enter your choice: ")?;
            let result = match choice.trim().parse::<u32>() {
                Ok(1) => self.show_matches(current),
                Ok(2) => self.chat(current),
                Ok(3) => self.show_history(),
                Ok(4) => {
                    writeln!(self.output, "Logging out...")?;
                    return Ok(());
                }
                _ => Err(ShellError::InvalidChoice),
            };

            match result {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn current_matches(&self, current: &Profile) -> Vec<Profile> {
        self.matchmaker
            .find_matches(current)
            .into_iter()
            .cloned()
            .collect()
    }

    fn show_matches(&mut self, current: &Profile) -> Result<(), ShellError> {
        let matches = self.current_matches(current);
        if matches.is_empty() {
            writeln!(self.output, "{}", MatchNotification::NoMatch)?;
        } else {
            render::render_profiles(&mut self.output, &matches)?;
        }
        Ok(())
    }

    fn chat(&mut self, current: &Profile) -> Result<(), ShellError> {
        let matches = self.current_matches(current);
        if matches.is_empty() {
            writeln!(self.output, "{}", MatchNotification::NoMatch)?;
            return Ok(());
        }

        render::render_profiles(&mut self.output, &matches)?;
        let chat_id = self.prompt_token("Enter the User ID of the profile you want to chat with: ")?;

        let Some(partner) = matches.iter().find(|p| p.user_id() == chat_id) else {
            writeln!(self.output, "Invalid User ID. Please try again.")?;
            return Ok(());
        };

        self.chatroom.add_participant(current);
        self.chatroom.add_participant(partner);

        let typed = self.prompt_trimmed("Enter your message (leave blank to send a greeting): ")?;
        let content = if typed.is_empty() {
            self.settings.chat.greeting_for(&current.name)
        } else {
            typed
        };

        let message = self.chatroom.send_message(current, partner, &content)?;
        if !message.is_self_sent() {
            writeln!(self.output, "Message received from {}: {}", current.name, content)?;
        }
        Ok(())
    }

    fn show_history(&mut self) -> Result<(), ShellError> {
        if self.chatroom.message_count() == 0 {
            writeln!(self.output, "No messages yet.")?;
            return Ok(());
        }
        render::render_history(
            &mut self.output,
            self.chatroom.messages(),
            self.settings.chat.history_format,
        )
    }
}
