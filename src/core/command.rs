//! Command assembly.
//!
//! A [`Command`] is an ordered token list: the base command, the
//! configuration flag pairs, and at most one secret pair. The secret pair has
//! its own slot in the builder and is always rendered last, which is what
//! positional redaction relies on.

use std::borrow::Cow;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::{ConfigOptions, EngineFlags};
use crate::core::secret::{redact, RedactedCommand, Secret};
use crate::core::types::FlagName;
use crate::error::{CommandError, Result};

/// The secret flag and a private copy of its value, wiped on drop.
struct SecretPair {
    flag: FlagName,
    value: Zeroizing<String>,
}

/// Mutable builder for [`Command`].
#[derive(Default)]
pub struct CommandBuilder {
    tokens: Vec<String>,
    secret: Option<SecretPair>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional token.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Append positional tokens.
    pub fn args<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append a flag/value pair. Always lands before the secret pair.
    pub fn flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.push(name.into());
        self.tokens.push(value.into());
        self
    }

    /// Set the secret pair, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `EmptySecret` or `NonUtf8Secret` when the bytes cannot be a token.
    pub fn secret(
        mut self,
        flag: impl Into<String>,
        secret: &Secret<'_>,
    ) -> std::result::Result<Self, CommandError> {
        let value = Zeroizing::new(secret.as_token()?.to_owned());
        self.secret = Some(SecretPair {
            flag: flag.into(),
            value,
        });
        Ok(self)
    }

    pub fn build(self) -> Command {
        Command {
            tokens: self.tokens,
            secret: self.secret,
        }
    }
}

/// An assembled engine command.
///
/// There is deliberately no `Display` or `Serialize`: the only textual forms
/// are [`Command::expose_line`] for the engine and [`Command::redacted`] for
/// everything else. `Debug` prints the redacted form.
pub struct Command {
    tokens: Vec<String>,
    secret: Option<SecretPair>,
}

impl Command {
    /// Tokens before the secret pair.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Flag of the trailing secret pair, if any.
    pub fn secret_flag(&self) -> Option<&str> {
        self.secret.as_ref().map(|s| s.flag.as_str())
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Number of tokens including the secret pair.
    pub fn len(&self) -> usize {
        self.tokens.len() + if self.secret.is_some() { 2 } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the full command line, secret included, for the engine.
    ///
    /// The buffer is sized before the secret is written so it never
    /// reallocates, and it is wiped when dropped.
    pub fn expose_line(&self) -> Zeroizing<String> {
        let head: Vec<Cow<'_, str>> = self.tokens.iter().map(|t| shell_words::quote(t)).collect();
        let tail = self.secret.as_ref().map(|s| {
            (
                shell_words::quote(&s.flag),
                Zeroizing::new(shell_words::quote(&s.value).into_owned()),
            )
        });

        let mut capacity: usize = head.iter().map(|t| t.len() + 1).sum();
        if let Some((flag, value)) = &tail {
            capacity += flag.len() + 1 + value.len() + 1;
        }

        let mut line = Zeroizing::new(String::with_capacity(capacity));
        for token in head.iter() {
            push_token(&mut line, token);
        }
        if let Some((flag, value)) = &tail {
            push_token(&mut line, flag);
            push_token(&mut line, value);
        }
        line
    }

    /// Loggable form with the secret value masked.
    pub fn redacted(&self) -> RedactedCommand {
        redact(self)
    }
}

fn push_token(line: &mut String, token: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(token);
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Command")
            .field(&self.redacted().as_str())
            .finish()
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        let secrets_match = match (&self.secret, &other.secret) {
            (None, None) => true,
            (Some(a), Some(b)) => a.flag == b.flag && *a.value == *b.value,
            _ => false,
        };
        self.tokens == other.tokens && secrets_match
    }
}

impl Eq for Command {}

/// Build the engine command for `base_command`.
///
/// Appends, in this order: the storage location flag, the output format
/// flag when not the default, and the secret flag when a secret is given.
///
/// # Errors
///
/// Returns `InvalidCommand` when the base command is blank or unparseable,
/// already contains a bridge-managed flag, when the storage location is
/// missing, or when the secret cannot be written as a token. Invalid
/// configuration (bad flag names, unsupported version) is rejected too.
pub fn assemble(
    base_command: &str,
    config: &ConfigOptions,
    secret: Option<Secret<'_>>,
) -> Result<Command> {
    config.validate()?;

    let base = split_base(base_command, &config.flags)?;
    let storage = config.storage_token()?;

    let mut builder = CommandBuilder::new()
        .args(base)
        .flag(config.flags.storage_location.as_str(), storage);

    if !config.output_format.is_default() {
        let flag = config.flags.output_format.as_str();
        builder = if config.flags.output_format_value {
            builder.flag(flag, config.output_format.as_str())
        } else {
            builder.arg(flag)
        };
    }

    if let Some(secret) = secret {
        builder = builder.secret(config.flags.secret.as_str(), &secret)?;
    }

    let command = builder.build();
    debug!(command = %command.redacted(), tokens = command.len(), "command assembled");
    Ok(command)
}

/// Split the base command into shell words and reject managed flags.
fn split_base(base_command: &str, flags: &EngineFlags) -> std::result::Result<Vec<String>, CommandError> {
    if base_command.trim().is_empty() {
        return Err(CommandError::EmptyCommand);
    }

    let tokens =
        shell_words::split(base_command).map_err(|e| CommandError::Unparseable(e.to_string()))?;
    if tokens.iter().all(|t| t.is_empty()) {
        return Err(CommandError::EmptyCommand);
    }

    for token in &tokens {
        for flag in flags.managed() {
            let inline = token
                .strip_prefix(flag)
                .is_some_and(|rest| rest.starts_with('='));
            if token == flag || inline {
                return Err(CommandError::ReservedFlag {
                    flag: flag.to_string(),
                });
            }
        }
    }

    Ok(tokens)
}
