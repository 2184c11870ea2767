//! Redaction.
//!
//! Positional: the secret is the value of the final flag pair, so only that
//! token is masked. Nothing searches the text for words like "password",
//! which would miss or mangle values that contain them.

use serde::Serialize;
use zeroize::Zeroizing;

use crate::core::command::Command;
use crate::core::constants::REDACTED;

/// Display-only rendering of a command with the secret masked.
///
/// This is the only form of a command that may reach logs, error messages
/// or any other sink. It is never handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedactedCommand(String);

impl RedactedCommand {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RedactedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RedactedCommand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Mask the secret value of an assembled command.
///
/// Commands without a secret come back unchanged.
pub fn redact(command: &Command) -> RedactedCommand {
    let mut line = shell_words::join(command.tokens());
    if let Some(flag) = command.secret_flag() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&shell_words::quote(flag));
        line.push(' ');
        line.push_str(REDACTED);
    }
    RedactedCommand(line)
}

/// Mask the secret in an arbitrary command line.
///
/// Checks the last two tokens for `<flag> <value>` and the last token for
/// `<flag>=<value>`. A line that cannot be tokenized but mentions the flag
/// is masked from the flag's first occurrence onwards. Anything else is
/// returned as is.
pub fn redact_line(line: &str, secret_flag: &str) -> RedactedCommand {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => Zeroizing::new(tokens),
        Err(_) => {
            return match line.find(secret_flag) {
                Some(idx) => RedactedCommand(format!("{}{} {}", &line[..idx], secret_flag, REDACTED)),
                None => RedactedCommand(line.to_string()),
            };
        }
    };

    let n = tokens.len();
    if n >= 2 && tokens[n - 2] == secret_flag {
        return RedactedCommand(join_masked(&tokens[..n - 2], &format!(
            "{} {}",
            shell_words::quote(secret_flag),
            REDACTED
        )));
    }

    let inline = tokens
        .last()
        .and_then(|t| t.strip_prefix(secret_flag))
        .is_some_and(|rest| rest.starts_with('='));
    if inline {
        return RedactedCommand(join_masked(
            &tokens[..n - 1],
            &format!("{}={}", secret_flag, REDACTED),
        ));
    }

    RedactedCommand(line.to_string())
}

fn join_masked(head: &[String], masked: &str) -> String {
    let mut line = shell_words::join(head);
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(masked);
    line
}
