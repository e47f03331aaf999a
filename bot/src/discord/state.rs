use std::{collections::VecDeque, fmt};

use serenity::all::UserId;

use crate::discord::{constants::HISTORY_WINDOW, personality::Personality};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// Format a single history line, e.g. `User: hello`
pub fn history_line(role: Role, text: &str) -> String {
    format!("{role}: {text}")
}

/// Rolling window of the most recent conversation lines of one user
#[derive(Debug, Default)]
struct History {
    lines: VecDeque<String>,
}

impl History {
    fn push(&mut self, line: String) {
        self.lines.push_back(line);

        if self.lines.len() > HISTORY_WINDOW {
            let excess = self.lines.len() - HISTORY_WINDOW;
            self.lines.drain(0..excess);
        }
    }

    fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// In-memory per-user state: the selected personality and the recent conversation.
///
/// Owned by the bot instance and lives as long as it does. Each operation is atomic for the
/// entry it touches, but a chat turn spans an await on the backend, so overlapping turns of the
/// same user may interleave.
#[derive(Default)]
pub struct UserStateStore {
    personalities: scc::HashMap<UserId, Personality>,
    histories: scc::HashMap<UserId, History>,
}

impl UserStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_personality(&self, user_id: UserId) -> Personality {
        self.personalities
            .read_sync(&user_id, |_, p| *p)
            .unwrap_or_default()
    }

    pub fn set_personality(&self, user_id: UserId, personality: Personality) {
        self.personalities.upsert_sync(user_id, personality);
    }

    /// Copy of the user's current history, oldest line first
    pub fn get_history(&self, user_id: UserId) -> Vec<String> {
        self.histories
            .read_sync(&user_id, |_, h| h.snapshot())
            .unwrap_or_default()
    }

    pub fn append_turn(&self, user_id: UserId, role: Role, text: &str) {
        self.histories
            .entry_sync(user_id)
            .or_default()
            .get_mut()
            .push(history_line(role, text));
    }

    /// Record a completed exchange. Both lines land together so a turn is never half-committed.
    pub fn commit_exchange(&self, user_id: UserId, user_text: &str, assistant_text: &str) {
        let mut entry = self.histories.entry_sync(user_id).or_default();
        let history = entry.get_mut();
        history.push(history_line(Role::User, user_text));
        history.push(history_line(Role::Assistant, assistant_text));
    }

    /// Empty the user's history. Returns whether there was anything to clear.
    pub fn clear_history(&self, user_id: UserId) -> bool {
        self.histories
            .update_sync(&user_id, |_, h| {
                let had_lines = !h.lines.is_empty();
                h.lines.clear();
                had_lines
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    #[test]
    fn test_unseen_user_defaults() {
        let store = UserStateStore::new();
        assert_eq!(store.get_personality(user(1)), Personality::Friendly);
        assert!(store.get_history(user(1)).is_empty());
    }

    #[test]
    fn test_set_personality() {
        let store = UserStateStore::new();
        store.set_personality(user(1), Personality::Funny);
        assert_eq!(store.get_personality(user(1)), Personality::Funny);

        store.set_personality(user(1), Personality::Serious);
        assert_eq!(store.get_personality(user(1)), Personality::Serious);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = UserStateStore::new();
        store.set_personality(user(1), Personality::Sarcastic);
        store.append_turn(user(1), Role::User, "hello");

        assert_eq!(store.get_personality(user(2)), Personality::Friendly);
        assert!(store.get_history(user(2)).is_empty());

        store.clear_history(user(2));
        assert_eq!(store.get_history(user(1)), vec!["User: hello"]);
    }

    #[test]
    fn test_append_turn_formats_role() {
        let store = UserStateStore::new();
        store.append_turn(user(1), Role::User, "hello");
        store.append_turn(user(1), Role::Assistant, "hi there");
        assert_eq!(
            store.get_history(user(1)),
            vec!["User: hello", "Assistant: hi there"]
        );
    }

    #[test]
    fn test_history_keeps_last_window() {
        let store = UserStateStore::new();
        for i in 0..25 {
            store.append_turn(user(1), Role::User, &format!("message {i}"));
        }

        let history = store.get_history(user(1));
        assert_eq!(history.len(), HISTORY_WINDOW);
        let expected: Vec<String> = (15..25).map(|i| format!("User: message {i}")).collect();
        assert_eq!(history, expected);
    }

    #[test]
    fn test_commit_exchange_trims() {
        let store = UserStateStore::new();
        for i in 0..9 {
            store.append_turn(user(1), Role::User, &i.to_string());
        }
        store.commit_exchange(user(1), "question", "answer");

        let history = store.get_history(user(1));
        assert_eq!(history.len(), HISTORY_WINDOW);
        assert_eq!(history[0], "User: 1");
        assert_eq!(history[8], "User: question");
        assert_eq!(history[9], "Assistant: answer");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = UserStateStore::new();
        store.append_turn(user(1), Role::User, "hello");

        let mut snapshot = store.get_history(user(1));
        snapshot.push("User: injected".to_string());

        assert_eq!(store.get_history(user(1)), vec!["User: hello"]);
    }

    #[test]
    fn test_clear_history() {
        let store = UserStateStore::new();
        assert!(!store.clear_history(user(1)));

        store.append_turn(user(1), Role::User, "hello");
        assert!(store.clear_history(user(1)));
        assert!(store.get_history(user(1)).is_empty());
        assert!(!store.clear_history(user(1)));
    }
}
