use std::collections::HashMap;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, ResolvedOption,
    ResolvedValue,
};

use crate::{
    discord::{
        commands::{Invocation, Reply},
        constants::EMBED_DESCRIPTION_LIMIT,
        personality::Personality,
    },
    utils::truncate_chars,
};

/// Slash command schema registered with Discord on startup
pub fn command_definitions() -> Vec<CreateCommand> {
    let personality_choice = Personality::ALL.into_iter().fold(
        CreateCommandOption::new(
            CommandOptionType::String,
            "personality",
            "Choose the bot's personality",
        )
        .required(true),
        |option, p| option.add_string_choice(p.name(), p.name()),
    );

    vec![
        CreateCommand::new("personality")
            .description("Commands to interact with the bot's personality")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "change",
                    "Change the bot's personality",
                )
                .add_sub_option(personality_choice),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "current",
                "View the bot's current personality",
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "list",
                "List all available personalities",
            )),
        CreateCommand::new("chat")
            .description("Chat with the AI bot")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Your message to the bot",
                )
                .required(true),
            ),
        CreateCommand::new("clear_history")
            .description("Clear your conversation history with the bot"),
        CreateCommand::new("code_help")
            .description("Get help with code in a specific language")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "language",
                    "The programming language you need help with",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "Your question about the code",
                )
                .required(true),
            ),
    ]
}

/// Flatten subcommands into the command path and collect string options
fn collect_options(
    resolved: Vec<ResolvedOption<'_>>,
    command: &mut String,
    options: &mut HashMap<String, String>,
) {
    for option in resolved {
        match option.value {
            ResolvedValue::SubCommand(nested) | ResolvedValue::SubCommandGroup(nested) => {
                command.push(' ');
                command.push_str(option.name);
                collect_options(nested, command, options);
            }
            ResolvedValue::String(value) => {
                options.insert(option.name.to_string(), value.to_string());
            }
            _ => {
                tracing::debug!(option = option.name, "Ignoring non-string option");
            }
        }
    }
}

pub fn invocation_from_command(interaction: &CommandInteraction) -> Invocation {
    let mut command = interaction.data.name.clone();
    let mut options = HashMap::new();
    collect_options(interaction.data.options(), &mut command, &mut options);

    // Guild nickname when available, like the name shown next to the message
    let display_name = interaction
        .member
        .as_ref()
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| interaction.user.display_name().to_string());

    Invocation {
        command,
        user_id: interaction.user.id,
        display_name,
        avatar_url: interaction.user.avatar_url(),
        options,
    }
}

pub fn reply_to_embed(reply: Reply) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(reply.title)
        .description(truncate_chars(&reply.description, EMBED_DESCRIPTION_LIMIT))
        .color(reply.color);

    for (name, value) in reply.fields {
        embed = embed.field(name, value, false);
    }

    if let Some(author) = reply.author {
        let mut embed_author = CreateEmbedAuthor::new(author.name);
        if let Some(icon_url) = author.icon_url {
            embed_author = embed_author.icon_url(icon_url);
        }
        embed = embed.author(embed_author);
    }

    if let Some(footer) = reply.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

/// Acknowledge an interaction whose answer will arrive as a follow-up
pub async fn defer(ctx: &Context, interaction: &CommandInteraction) -> Result<(), eyre::Error> {
    interaction.defer(&ctx.http).await?;
    Ok(())
}

pub async fn send_reply(
    ctx: &Context,
    interaction: &CommandInteraction,
    reply: Reply,
    deferred: bool,
) -> Result<(), eyre::Error> {
    let embed = reply_to_embed(reply);

    if deferred {
        interaction
            .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
            .await?;
    } else {
        interaction
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().embed(embed),
                ),
            )
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definitions_cover_registry() {
        let registry = crate::discord::commands::CommandRegistry::default();
        for command in [
            "personality change",
            "personality current",
            "personality list",
            "chat",
            "clear_history",
            "code_help",
        ] {
            assert!(registry.get(command).is_some(), "{command} not registered");
        }
        assert_eq!(command_definitions().len(), 4);
    }
}
