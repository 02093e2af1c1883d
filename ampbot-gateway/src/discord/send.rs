//! Rendering of [`ResponseMessage`] into Discord embeds.

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::id::ChannelId;
use serenity::prelude::*;

use crate::messages;
use crate::response::{ResponseMessage, Status};

pub const OK_EMBED_COLOR: u32 = 0x2E_CC_71;
pub const WARNING_EMBED_COLOR: u32 = 0xF2_99_4A;
pub const ERROR_EMBED_COLOR: u32 = 0xE0_3B_24;

const DISCORD_EMBED_TITLE_LIMIT: usize = 256;
const DISCORD_EMBED_DESC_LIMIT: usize = 4096;
const DISCORD_FIELD_NAME_LIMIT: usize = 256;
const DISCORD_FIELD_VALUE_LIMIT: usize = 1024;
const DISCORD_EMBED_FIELD_LIMIT: usize = 25;

/// Discord rejects empty field names/values.
const ZERO_WIDTH_SPACE: &str = "\u{200B}";

pub fn status_color(status: Status) -> u32 {
    match status {
        Status::Ok => OK_EMBED_COLOR,
        Status::Warn => WARNING_EMBED_COLOR,
        Status::Error => ERROR_EMBED_COLOR,
    }
}

pub fn to_embed(message: &ResponseMessage) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(truncate(&message.title, DISCORD_EMBED_TITLE_LIMIT))
        .color(status_color(message.status));

    if let Some(description) = &message.description {
        embed = embed.description(truncate(description, DISCORD_EMBED_DESC_LIMIT));
    }
    if let Some(url) = &message.thumbnail {
        embed = embed.thumbnail(url);
    }

    // Keep the last slot for a note naming how many sections were cut.
    let (shown, hidden) = if message.sections.len() > DISCORD_EMBED_FIELD_LIMIT {
        let shown = DISCORD_EMBED_FIELD_LIMIT - 1;
        (shown, message.sections.len() - shown)
    } else {
        (message.sections.len(), 0)
    };

    let mut fields: Vec<(String, String, bool)> = message.sections[..shown]
        .iter()
        .map(|section| {
            (
                non_empty(truncate(&section.name, DISCORD_FIELD_NAME_LIMIT)),
                non_empty(truncate(&section.text, DISCORD_FIELD_VALUE_LIMIT)),
                section.inline,
            )
        })
        .collect();
    if hidden > 0 {
        fields.push((
            messages::more_sections(hidden),
            ZERO_WIDTH_SPACE.to_string(),
            false,
        ));
    }
    embed.fields(fields)
}

pub async fn send_response(
    ctx: &Context,
    channel_id: ChannelId,
    message: &ResponseMessage,
) -> serenity::Result<()> {
    channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(to_embed(message)))
        .await?;
    Ok(())
}

/// Cut to `limit` characters, marking the cut with an ellipsis.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn non_empty(text: String) -> String {
    if text.trim().is_empty() {
        ZERO_WIDTH_SPACE.to_string()
    } else {
        text
    }
}
