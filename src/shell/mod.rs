//! Interactive console front-end
//!
//! Reads menu choices and form fields line by line and drives the
//! matchmaker and chatroom. Generic over its input and output so a whole
//! session can be scripted.

pub mod render;
mod session;

use std::io::{BufRead, Write};
use thiserror::Error;
use validator::ValidationErrors;

use crate::config::Settings;
use crate::core::{ChatError, Chatroom, Matchmaker, MatchmakerError};
use crate::models::RegistrationForm;

/// Errors surfaced to the console user
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", validation_summary(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Error: {0}")]
    Matchmaker(#[from] MatchmakerError),

    #[error("Error: {0}")]
    Chat(#[from] ChatError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid choice. Try again.")]
    InvalidChoice,

    #[error("User not found. Please register or try again.")]
    UnknownLogin,

    #[error("Input closed")]
    EndOfInput,
}

impl ShellError {
    /// Errors after which the shell cannot keep reading
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::EndOfInput)
    }
}

fn validation_summary(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("Error: {}", message),
                None => format!("Error: invalid {}", field),
            })
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    matchmaker: Matchmaker,
    chatroom: Chatroom,
    settings: Settings,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self::with_components(input, output, settings, Matchmaker::new(), Chatroom::new())
    }

    pub fn with_components(
        input: R,
        output: W,
        settings: Settings,
        matchmaker: Matchmaker,
        chatroom: Chatroom,
    ) -> Self {
        Self {
            input,
            output,
            matchmaker,
            chatroom,
            settings,
        }
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    pub fn chatroom(&self) -> &Chatroom {
        &self.chatroom
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Main menu loop; returns on Exit or when input runs out
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            writeln!(self.output, "{}", self.settings.shell.banner)?;
            writeln!(self.output, "1. Register")?;
            writeln!(self.output, "2. Login")?;
            writeln!(self.output, "3. Exit")?;

            let choice = match self.prompt("Enter your choice: ") {
                Ok(line) => line,
                Err(ShellError::EndOfInput) => return Ok(()),
                Err(e) => return Err(e),
            };

            let result = match choice.trim().parse::<u32>() {
                Ok(1) => self.register(),
                Ok(2) => self.login(),
                Ok(3) => {
                    writeln!(self.output, "Goodbye! Exiting the application.")?;
                    return Ok(());
                }
                _ => Err(ShellError::InvalidChoice),
            };

            match result {
                Ok(()) => {}
                Err(ShellError::EndOfInput) => return Ok(()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::debug!("Menu action failed: {:?}", e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }

    fn register(&mut self) -> Result<(), ShellError> {
        let user_id = loop {
            let user_id = self.prompt_token("Enter your user ID: ")?;
            if self.matchmaker.get_user(&user_id).is_none() {
                break user_id;
            }
            writeln!(self.output, "User ID already exists. Please choose another.")?;
        };

        let form = RegistrationForm {
            user_id,
            name: self.prompt_trimmed("Enter your name: ")?,
            email: self.prompt_token("Enter your email: ")?,
            gender: self.prompt_token("Enter your gender: ")?,
            age: self.prompt_token("Enter your age: ")?,
            address: self.prompt_trimmed("Enter your address: ")?,
            interests: self.prompt("Enter your interests (separated by spaces): ")?,
        };

        let profile = form.into_profile()?;
        let outcome = self.matchmaker.add_user(profile)?;

        writeln!(self.output, "{}", outcome.notification)?;
        writeln!(self.output, "Registration successful!")?;
        Ok(())
    }

    fn login(&mut self) -> Result<(), ShellError> {
        let user_id = self.prompt_token("Enter your user ID or email: ")?;

        // Lookup is by identifier only
        let current = self
            .matchmaker
            .get_user(&user_id)
            .cloned()
            .ok_or(ShellError::UnknownLogin)?;

        // Password is collected but not checked
        let _password = self.prompt_token("Enter your password: ")?;

        tracing::info!("User {} logged in", current.user_id());
        self.session(&current)
    }

    /// Write a prompt and read one line, without the trailing newline
    fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_trimmed(&mut self, label: &str) -> Result<String, ShellError> {
        Ok(self.prompt(label)?.trim().to_string())
    }

    /// First whitespace-separated word of the line, empty if none
    fn prompt_token(&mut self, label: &str) -> Result<String, ShellError> {
        let line = self.prompt(label)?;
        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }
}
