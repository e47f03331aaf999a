use crate::discord::{
    commands::{BotState, CommandRegistry},
    interaction::{command_definitions, defer, invocation_from_command, send_reply},
};
use serenity::all::{ActivityData, Command, Interaction, Ready};
use serenity::async_trait;
use serenity::prelude::*;

pub struct DiscordEventHandler {
    state: BotState,
    registry: CommandRegistry,
    status: String,
}

impl DiscordEventHandler {
    pub fn new(state: BotState, status: String) -> Self {
        Self {
            state,
            registry: CommandRegistry::default(),
            status,
        }
    }

    async fn register_commands(&self, ctx: &Context) -> Result<(), eyre::Error> {
        let commands = Command::set_global_commands(&ctx.http, command_definitions()).await?;
        tracing::info!("Registered {} slash commands", commands.len());
        Ok(())
    }
}

#[async_trait]
impl EventHandler for DiscordEventHandler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let invocation = invocation_from_command(&command);
        tracing::info!(
            command = %invocation.command,
            user_id = invocation.user_id.get(),
            "Received slash command"
        );

        let Some(spec) = self.registry.get(&invocation.command) else {
            tracing::warn!(command = %invocation.command, "Unknown command");
            return;
        };

        if spec.deferred {
            // Generation can take longer than Discord's initial response window
            if let Err(e) = defer(&ctx, &command).await {
                tracing::error!(?e, "Failed to defer interaction");
                return;
            }
        }

        let reply = (spec.handler)(&self.state, &invocation).await;

        let _ = send_reply(&ctx, &command, reply, spec.deferred)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to respond to command {} from user {}: {}",
                    invocation.command,
                    invocation.user_id,
                    e
                );
            });
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("Discord bot {} is connected!", ready.user.name);

        ctx.set_activity(Some(ActivityData::listening(&self.status)));

        if let Err(e) = self.register_commands(&ctx).await {
            tracing::error!("Failed to register slash commands: {}", e);
        }
    }
}
