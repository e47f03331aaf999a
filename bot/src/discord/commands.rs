use std::{collections::HashMap, sync::Arc};

use futures::{FutureExt as _, future::BoxFuture};
use serenity::all::UserId;

use crate::{
    discord::{
        agent::TextGenerator,
        constants::{
            COLOR_ERROR, COLOR_RESPONSE, COLOR_SUCCESS, COLOR_WARNING, PERSONALITY_PREVIEW_LEN,
        },
        personality::{self, Personality},
        prompt::{build_chat_prompt, build_code_help_prompt},
        state::UserStateStore,
    },
    error::BotError,
    utils::{capitalize, truncate_chars},
};

/// Everything the handlers share: per-user state and the generation backend.
pub struct BotState {
    pub users: UserStateStore,
    pub generator: Arc<dyn TextGenerator>,
}

impl BotState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            users: UserStateStore::new(),
            generator,
        }
    }
}

/// A slash command invocation, already lifted out of the Discord SDK types
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Command path, subcommands separated by a space, e.g. `personality change`
    pub command: String,
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub options: HashMap<String, String>,
}

impl Invocation {
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Platform independent rendering of a command response (shown as an embed on Discord)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub author: Option<ReplyAuthor>,
    pub fields: Vec<(String, String)>,
    pub footer: Option<String>,
}

impl Reply {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            author: None,
            fields: vec![],
            footer: None,
        }
    }

    pub fn error(e: &BotError) -> Self {
        Self::new("Error", format!("An error occurred: {e}"), COLOR_ERROR)
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn requested_by(self, invocation: &Invocation) -> Self {
        self.footer(format!("Requested by {}", invocation.display_name))
    }

    pub fn author(mut self, invocation: &Invocation) -> Self {
        self.author = Some(ReplyAuthor {
            name: invocation.display_name.clone(),
            icon_url: invocation.avatar_url.clone(),
        });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

pub type Handler = for<'a> fn(&'a BotState, &'a Invocation) -> BoxFuture<'a, Reply>;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub handler: Handler,
    /// Acknowledge first and answer with a follow-up, for commands that wait on the backend
    pub deferred: bool,
}

/// Maps command paths to their handlers
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandSpec>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: &'static str, deferred: bool, handler: Handler) {
        self.commands
            .insert(command, CommandSpec { handler, deferred });
    }

    pub fn get(&self, command: &str) -> Option<CommandSpec> {
        self.commands.get(command).copied()
    }

    /// Run the handler registered for the invocation's command, if any
    pub async fn dispatch(&self, state: &BotState, invocation: &Invocation) -> Option<Reply> {
        let spec = self.get(&invocation.command)?;
        Some((spec.handler)(state, invocation).await)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("personality change", false, personality_change);
        registry.register("personality current", false, personality_current);
        registry.register("personality list", false, personality_list);
        registry.register("chat", true, chat);
        registry.register("clear_history", false, clear_history);
        registry.register("code_help", true, code_help);
        registry
    }
}

fn missing_option(name: &str) -> Reply {
    Reply::new(
        "Error",
        format!("An error occurred: missing option `{name}`"),
        COLOR_ERROR,
    )
}

fn personality_change<'a>(state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        let Some(name) = inv.option("personality") else {
            return missing_option("personality");
        };

        let personality = match Personality::try_from(name) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(?e, "Personality change rejected");
                return Reply::error(&e);
            }
        };

        state.users.set_personality(inv.user_id, personality);
        tracing::debug!(user_id = inv.user_id.get(), %personality, "Personality changed");

        Reply::new(
            "Personality Changed",
            format!("My personality has been changed to **{personality}**!"),
            COLOR_SUCCESS,
        )
        .requested_by(inv)
    }
    .boxed()
}

fn personality_current<'a>(state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        let personality = state.users.get_personality(inv.user_id);
        Reply::new(
            "Current Personality",
            format!("My current personality is **{personality}**!"),
            COLOR_SUCCESS,
        )
        .requested_by(inv)
    }
    .boxed()
}

fn personality_list<'a>(_state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        personality::list_all()
            .fold(
                Reply::new(
                    "Available Personalities",
                    "Here are all the personalities I can adopt:",
                    COLOR_SUCCESS,
                ),
                |reply, (name, prompt)| {
                    reply.field(
                        capitalize(name),
                        format!("{}...", truncate_chars(prompt, PERSONALITY_PREVIEW_LEN)),
                    )
                },
            )
            .requested_by(inv)
    }
    .boxed()
}

fn chat<'a>(state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        let Some(message) = inv.option("message") else {
            return missing_option("message");
        };

        let personality = state.users.get_personality(inv.user_id);
        let personality_prompt = match personality::get_prompt(personality.name()) {
            Ok(p) => p,
            Err(e) => return Reply::error(&e),
        };
        let history = state.users.get_history(inv.user_id);
        let prompt = build_chat_prompt(personality_prompt, &history, message);

        match state.generator.generate(&prompt).await {
            Ok(response) => {
                // The user's line is only kept together with a reply
                state
                    .users
                    .commit_exchange(inv.user_id, message, &response);

                Reply::new(
                    format!("Chat ({} Mode)", personality.display_name()),
                    response,
                    COLOR_RESPONSE,
                )
                .author(inv)
                .footer(format!("Personality: {}", personality.display_name()))
            }
            Err(e) => {
                tracing::error!(?e, user_id = inv.user_id.get(), "Chat generation failed");
                Reply::error(&BotError::from(e))
            }
        }
    }
    .boxed()
}

fn clear_history<'a>(state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        let reply = if state.users.clear_history(inv.user_id) {
            Reply::new(
                "History Cleared",
                "Your conversation history has been cleared!",
                COLOR_SUCCESS,
            )
        } else {
            Reply::new(
                "No History",
                "You don't have any conversation history to clear.",
                COLOR_WARNING,
            )
        };
        reply.requested_by(inv)
    }
    .boxed()
}

fn code_help<'a>(state: &'a BotState, inv: &'a Invocation) -> BoxFuture<'a, Reply> {
    async move {
        let (Some(language), Some(question)) = (inv.option("language"), inv.option("question"))
        else {
            return missing_option("language/question");
        };

        let personality = state.users.get_personality(inv.user_id);
        let personality_prompt = match personality::get_prompt(personality.name()) {
            Ok(p) => p,
            Err(e) => return Reply::error(&e),
        };
        let prompt = build_code_help_prompt(personality_prompt, language, question);

        match state.generator.generate(&prompt).await {
            Ok(response) => Reply::new(
                format!("Code Help ({})", capitalize(language)),
                response,
                COLOR_RESPONSE,
            )
            .author(inv)
            .footer(format!("Personality: {}", personality.display_name())),
            Err(e) => {
                tracing::error!(?e, user_id = inv.user_id.get(), "Code help generation failed");
                Reply::error(&BotError::from(e))
            }
        }
    }
    .boxed()
}
