use std::sync::Arc;
use std::time::Duration;

use serenity::async_trait;
use serenity::gateway::ActivityData;
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::user::User;
use serenity::prelude::*;
use tracing::{debug, error, info, warn};

use crate::command::{CallerContext, GuildSnapshot, Invocation};
use crate::commands::welcome::WELCOME_COMMAND;
use crate::state::AppState;

use super::ShardManagerContainer;
use super::interactions::slash_commands;
use super::send::send_response;

/// Discord event handler. All command work goes through the dispatcher.
pub struct Bot {
    pub(super) state: Arc<AppState>,
}

impl Bot {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Capture the caller context for an invocation.
    pub(super) async fn caller_context(
        &self,
        ctx: &Context,
        user: &User,
        guild_id: Option<GuildId>,
    ) -> CallerContext {
        CallerContext {
            user: Some(user.display_name().to_string()),
            guild: guild_id.and_then(|id| guild_snapshot(ctx, id)),
            latency: shard_latency(ctx).await,
            avatar_url: Some(user.face()),
        }
    }

    async fn welcome_channel(&self, ctx: &Context, guild_id: GuildId) -> Option<ChannelId> {
        if let Some(id) = self.state.discord.welcome_channel_id.filter(|id| *id != 0) {
            return Some(ChannelId::new(id));
        }
        let cached = ctx
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.system_channel_id);
        if cached.is_some() {
            return cached;
        }
        guild_id
            .to_partial_guild(&ctx.http)
            .await
            .ok()
            .and_then(|guild| guild.system_channel_id)
    }
}

/// Strip the prefix from a message and split it into an invocation.
pub(super) fn prefixed_invocation(content: &str, prefix: &str) -> Option<Invocation> {
    let line = content.trim_start().strip_prefix(prefix)?;
    // "! ping" is not a command
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    Invocation::from_text(line)
}

fn guild_snapshot(ctx: &Context, guild_id: GuildId) -> Option<GuildSnapshot> {
    let guild = ctx.cache.guild(guild_id)?;
    Some(GuildSnapshot {
        id: guild.id.get(),
        name: guild.name.clone(),
        owner_id: guild.owner_id.get(),
        member_count: guild.member_count,
        icon_url: guild.icon_url(),
    })
}

async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>()?.clone()
    };
    let runners = manager.runners.lock().await;
    runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
}

#[async_trait]
impl EventHandler for Bot {
    /// Handle prefix commands
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(invocation) = prefixed_invocation(&msg.content, &self.state.prefix) else {
            return;
        };

        debug!(
            "Prefix command from {} ({}): {}",
            msg.author.name, msg.author.id, msg.content
        );

        let caller = self.caller_context(&ctx, &msg.author, msg.guild_id).await;
        let response = self
            .state
            .dispatcher
            .dispatch(invocation.with_caller(caller))
            .await;

        if let Err(e) = send_response(&ctx, msg.channel_id, &response).await {
            error!("Failed to send response to {}: {}", msg.channel_id, e);
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if new_member.user.bot {
            return;
        }
        info!(
            "Member {} joined guild {}",
            new_member.user.name, new_member.guild_id
        );

        let Some(channel_id) = self.welcome_channel(&ctx, new_member.guild_id).await else {
            warn!(
                "No welcome channel for guild {}, skipping welcome",
                new_member.guild_id
            );
            return;
        };

        let caller = self
            .caller_context(&ctx, &new_member.user, Some(new_member.guild_id))
            .await;
        let invocation = Invocation::event(
            WELCOME_COMMAND,
            vec![format!("<@{}>", new_member.user.id)],
        )
        .with_caller(caller);
        let response = self.state.dispatcher.dispatch(invocation).await;

        if let Err(e) = send_response(&ctx, channel_id, &response).await {
            error!("Failed to send welcome message to {}: {}", channel_id, e);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        self.handle_interaction(ctx, interaction).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Discord bot connected as {}", ready.user.name);

        let commands = slash_commands(self.state.dispatcher.registry());
        let count = commands.len();
        let registered = match self.state.discord.guild_id.filter(|id| *id != 0) {
            Some(id) => GuildId::new(id)
                .set_commands(&ctx.http, commands)
                .await
                .map(|_| format!("guild {}", id)),
            None => Command::set_global_commands(&ctx.http, commands)
                .await
                .map(|_| "global scope".to_string()),
        };
        match registered {
            Ok(scope) => info!("Registered {} slash commands ({})", count, scope),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }

        ctx.set_activity(Some(ActivityData::watching(
            self.state.discord.activity.clone(),
        )));
    }
}
