use std::{env::VarError, fmt};

use crate::{discord::constants::DEFAULT_GEMINI_MODEL, error::ConfigError};

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_STATUS: &str = "your messages";

#[derive(Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Prefix for message commands. Only slash commands are served, kept for compatibility.
    pub prefix: String,
    /// Shown as "Listening to <status>" in the bot's presence
    pub status: String,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("prefix", &self.prefix)
            .field("status", &self.status)
            .finish()
    }
}

type Lookup<'a> = &'a dyn Fn(&str) -> Result<String, VarError>;

fn var(lookup: Lookup, key: &'static str) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
    }
}

fn required_var(lookup: Lookup, key: &'static str) -> Result<String, ConfigError> {
    var(lookup, key)?.ok_or(ConfigError::Missing(key))
}

fn var_or(lookup: Lookup, key: &'static str, default: &str) -> Result<String, ConfigError> {
    Ok(var(lookup, key)?.unwrap_or_else(|| {
        tracing::debug!("Environment variable `{key}` not set, using `{default}`");
        default.to_string()
    }))
}

impl BotConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key))
    }

    fn from_lookup(lookup: Lookup) -> Result<Self, ConfigError> {
        Ok(BotConfig {
            discord_token: required_var(lookup, "DISCORD_TOKEN")?,
            gemini_api_key: required_var(lookup, "GEMINI_API_KEY")?,
            gemini_model: var_or(lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL)?,
            prefix: var_or(lookup, "BOT_PREFIX", DEFAULT_PREFIX)?,
            status: var_or(lookup, "BOT_STATUS", DEFAULT_STATUS)?,
        })
    }
}
