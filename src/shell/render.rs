use std::io::{self, Write};

use crate::config::HistoryFormat;
use crate::models::{Message, Profile};

const RULE: &str = "--------------------------------------------------";

/// Print profiles as an identifier/interests table between two rules
pub fn render_profiles<'a, W, I>(out: &mut W, profiles: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Profile>,
{
    writeln!(out, "{}", RULE)?;
    writeln!(out, "List of Profiles with Interests:")?;
    for profile in profiles {
        writeln!(
            out,
            "User ID: {:>10} | Interests: {}",
            profile.user_id(),
            profile.interests().join(", ")
        )?;
    }
    writeln!(out, "{}", RULE)
}

/// Print the chat log as plain lines or as a JSON array
pub fn render_history<'a, W, I>(
    out: &mut W,
    messages: I,
    format: HistoryFormat,
) -> Result<(), super::ShellError>
where
    W: Write,
    I: Iterator<Item = &'a Message>,
{
    match format {
        HistoryFormat::Text => {
            for message in messages {
                writeln!(out, "{}", message)?;
            }
        }
        HistoryFormat::Json => {
            let messages: Vec<&Message> = messages.collect();
            serde_json::to_writer_pretty(&mut *out, &messages)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_profiles_layout() {
        let profile = Profile::new(
            "kim",
            "Kim",
            "kim@example.com",
            "female",
            31,
            "Harbour Rd",
            vec!["sailing".to_string(), "jazz".to_string()],
        );
        let mut out = Vec::new();
        render_profiles(&mut out, [&profile]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[2], "User ID:        kim | Interests: sailing, jazz");
        assert_eq!(lines[3], RULE);
    }

    #[test]
    fn test_render_history_json() {
        let messages = vec![Message::new("a", "b", "hey")];
        let mut out = Vec::new();
        render_history(&mut out, messages.iter(), HistoryFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["senderId"], "a");
        assert_eq!(parsed[0]["content"], "hey");
    }
}
