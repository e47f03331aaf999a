use crate::discord::{
    constants::{ASSISTANT_CUE, CODE_HELP_INSTRUCTIONS, HISTORY_HEADER, HISTORY_WINDOW},
    state::{Role, history_line},
};

/// Build the completion prompt for a chat turn.
///
/// `history` is the committed conversation before this turn. The new message is added as the
/// latest `User:` line and the combined conversation is capped to the history window, so the
/// backend sees exactly what the history will look like once the turn is committed (minus the
/// reply). The prompt ends with the assistant cue because the backend is a plain text completion
/// model without chat roles.
pub fn build_chat_prompt(
    personality_prompt: &str,
    history: &[String],
    new_user_message: &str,
) -> String {
    let new_line = history_line(Role::User, new_user_message);
    let skip = (history.len() + 1).saturating_sub(HISTORY_WINDOW);
    let lines: Vec<&str> = history
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(new_line.as_str()))
        .skip(skip)
        .collect();

    format!(
        "{personality_prompt}\n\n{HISTORY_HEADER}\n{}\n\n{ASSISTANT_CUE}",
        lines.join("\n")
    )
}

/// Build the prompt for a one-off code help request. Conversation history is not involved.
pub fn build_code_help_prompt(personality_prompt: &str, language: &str, question: &str) -> String {
    format!(
        "{personality_prompt}\n\nThe user is asking for help with {}.\nUser question: {question}\n\n{CODE_HELP_INSTRUCTIONS}",
        language.to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_golden() {
        let history = vec!["User: hi".to_string(), "Assistant: hello!".to_string()];
        let prompt = build_chat_prompt("Be nice.", &history, "how are you?");
        assert_eq!(
            prompt,
            "Be nice.\n\nConversation history:\nUser: hi\nAssistant: hello!\nUser: how are you?\n\nAssistant:"
        );
    }

    #[test]
    fn test_chat_prompt_empty_history() {
        let prompt = build_chat_prompt("Be nice.", &[], "hello");
        assert_eq!(
            prompt,
            "Be nice.\n\nConversation history:\nUser: hello\n\nAssistant:"
        );
    }

    #[test]
    fn test_chat_prompt_is_deterministic() {
        let history: Vec<String> = (0..4).map(|i| format!("User: {i}")).collect();
        let a = build_chat_prompt("P", &history, "x");
        let b = build_chat_prompt("P", &history, "x");
        assert_eq!(a, b);
        assert!(a.ends_with("Assistant:"));
    }

    #[test]
    fn test_chat_prompt_caps_window() {
        let history: Vec<String> = (0..10).map(|i| format!("User: line {i}")).collect();
        let prompt = build_chat_prompt("P", &history, "newest");

        assert!(!prompt.contains("User: line 0\n"));
        assert!(prompt.contains("User: line 1\n"));
        assert!(prompt.contains("User: newest\n\nAssistant:"));
        let body = prompt
            .strip_prefix("P\n\nConversation history:\n")
            .and_then(|p| p.strip_suffix("\n\nAssistant:"))
            .unwrap();
        assert_eq!(body.lines().count(), HISTORY_WINDOW);
    }

    #[test]
    fn test_code_help_prompt_golden() {
        let prompt = build_code_help_prompt("Be nice.", "rust", "What is a lifetime?");
        assert_eq!(
            prompt,
            format!(
                "Be nice.\n\nThe user is asking for help with RUST.\nUser question: What is a lifetime?\n\n{CODE_HELP_INSTRUCTIONS}"
            )
        );
        assert!(prompt.ends_with("used in professional development."));
    }
}
