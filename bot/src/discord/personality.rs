use std::fmt;

use crate::error::BotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Personality {
    Funny,
    Serious,
    Sarcastic,
    #[default]
    Friendly,
}

impl Personality {
    /// Every personality, in the order they are listed to users
    pub const ALL: [Personality; 4] = [
        Personality::Funny,
        Personality::Serious,
        Personality::Sarcastic,
        Personality::Friendly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Personality::Funny => "funny",
            Personality::Serious => "serious",
            Personality::Sarcastic => "sarcastic",
            Personality::Friendly => "friendly",
        }
    }

    /// Capitalized name used in embed titles and footers, e.g. "Friendly"
    pub fn display_name(&self) -> &'static str {
        match self {
            Personality::Funny => "Funny",
            Personality::Serious => "Serious",
            Personality::Sarcastic => "Sarcastic",
            Personality::Friendly => "Friendly",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Personality::Funny => SYSTEM_PROMPT_FUNNY,
            Personality::Serious => SYSTEM_PROMPT_SERIOUS,
            Personality::Sarcastic => SYSTEM_PROMPT_SARCASTIC,
            Personality::Friendly => SYSTEM_PROMPT_FRIENDLY,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&'_ str> for Personality {
    type Error = BotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Personality::ALL
            .into_iter()
            .find(|p| p.name() == value)
            .ok_or_else(|| BotError::UnknownPersonality(value.to_string()))
    }
}

/// Look up the system prompt of a personality by name
pub fn get_prompt(name: &str) -> Result<&'static str, BotError> {
    Personality::try_from(name).map(|p| p.system_prompt())
}

/// All personalities as `(name, prompt)` pairs, in a stable order
pub fn list_all() -> impl Iterator<Item = (&'static str, &'static str)> {
    Personality::ALL
        .into_iter()
        .map(|p| (p.name(), p.system_prompt()))
}

const SYSTEM_PROMPT_FUNNY: &str = "You are a funny and humorous assistant. Make jokes and use \
puns in your responses. Keep your tone light and entertaining.";

const SYSTEM_PROMPT_SERIOUS: &str = "You are a serious and professional assistant. Provide \
factual and straightforward responses without humor or casual language.";

const SYSTEM_PROMPT_SARCASTIC: &str = "You are a sarcastic assistant. Use dry humor and irony in \
your responses, but still be helpful.";

const SYSTEM_PROMPT_FRIENDLY: &str = "You are a friendly and supportive assistant. Be warm, \
encouraging, and positive in your interactions.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_prompt_known_names() {
        assert!(get_prompt("funny").unwrap().starts_with("You are a funny"));
        assert!(get_prompt("sarcastic").unwrap().starts_with("You are a sarcastic"));
    }

    #[test]
    fn test_get_prompt_unknown_name() {
        match get_prompt("grumpy") {
            Err(BotError::UnknownPersonality(name)) => assert_eq!(name, "grumpy"),
            other => panic!("Expected UnknownPersonality, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(get_prompt("Funny").is_err());
    }

    #[test]
    fn test_list_all_order() {
        let names: Vec<_> = list_all().map(|(name, _)| name).collect();
        assert_eq!(names, ["funny", "serious", "sarcastic", "friendly"]);
    }

    #[test]
    fn test_default_is_friendly() {
        assert_eq!(Personality::default(), Personality::Friendly);
        assert_eq!(Personality::default().display_name(), "Friendly");
    }

    #[test]
    fn test_prompt_text_is_unbroken() {
        // Line continuations must not leave stray whitespace in the prompt
        for (_, prompt) in list_all() {
            assert!(!prompt.contains("  "), "Double space in prompt: {prompt}");
            assert!(!prompt.contains('\n'));
        }
    }
}
