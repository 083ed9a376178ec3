//! Medal commands: `!medal`, `!unmedal`, `!medallist`.
//!
//! Awarding or removing a medal is limited to admins. The target is named
//! by nickname but the medal is stored against the nickname's identity
//! token, so it follows the person across nick changes and rejoins.

use super::context::{Context, Handler, Outcome};
use crate::protocol::normalize_command;
use crate::services::ServiceEffect;
use crate::state::MedalLevel;
use tracing::{error, info};

const MEDAL_USAGE: &str = "Usage: !medal <nick> <Platinum|Gold|Silver>";
const UNMEDAL_USAGE: &str = "Usage: !unmedal <nick>";
const INVALID_LEVEL: &str = "Invalid medal type. Use: Platinum, Gold, or Silver.";

pub struct MedalHandler;

impl Handler for MedalHandler {
    fn name(&self) -> &'static str {
        "medal"
    }

    fn process(
        &self,
        ctx: &mut Context<'_>,
        sender: &str,
        message: &str,
        _raw_line: &str,
    ) -> Outcome {
        let message = normalize_command(message);
        let args: Vec<&str> = message.split_whitespace().collect();
        let Some(cmd) = args.first() else {
            return Outcome::Pass;
        };

        match cmd.to_ascii_lowercase().as_str() {
            "!medallist" => Outcome::Reply(medal_list(ctx)),
            "!medal" | "!unmedal" if !ctx.admins.is_admin(sender) => {
                Outcome::Reply(format!("⚠️ {}: only admins can use this command.", sender))
            }
            "!medal" => Outcome::Reply(award(ctx, sender, &args)),
            "!unmedal" => Outcome::Reply(remove(ctx, sender, &args)),
            _ => Outcome::Pass,
        }
    }
}

/// `!medal <nick> <level>`
fn award(ctx: &mut Context<'_>, sender: &str, args: &[&str]) -> String {
    let [_, target, level_name, ..] = args else {
        return MEDAL_USAGE.to_string();
    };
    let Some(level) = MedalLevel::from_name(level_name) else {
        return INVALID_LEVEL.to_string();
    };
    let Some(token) = ctx.identities.resolve_token(target) else {
        return format!(
            "⚠️ Could not find hostmask for {}. Ask them to send a message or rejoin.",
            target
        );
    };

    let token = token.to_string();
    ctx.medals.grant(&token, level);
    let saved = ctx.medals.save();
    ctx.request(ServiceEffect::voice(*target));
    info!(sender = %sender, target = %target, token = %token, level = %level, "Medal awarded");

    match saved {
        Ok(()) => format!(
            "✅ {} awarded {} {} to {}.",
            sender,
            level,
            level.emblem(),
            target
        ),
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Failed to save medal records");
            format!(
                "⚠️ {} now holds {} {} but the medal list could not be saved.",
                target,
                level,
                level.emblem()
            )
        }
    }
}

/// `!unmedal <nick>`
fn remove(ctx: &mut Context<'_>, sender: &str, args: &[&str]) -> String {
    let [_, target, ..] = args else {
        return UNMEDAL_USAGE.to_string();
    };
    let Some(token) = ctx.identities.resolve_token(target) else {
        return format!("⚠️ Could not find hostmask for {}.", target);
    };

    let token = token.to_string();
    if !ctx.medals.revoke(&token) {
        return format!("⚠️ {} had no recorded medal.", target);
    }
    let saved = ctx.medals.save();
    ctx.request(ServiceEffect::devoice(*target));
    info!(sender = %sender, target = %target, token = %token, "Medal removed");

    match saved {
        Ok(()) => format!("❌ {} removed the medal from {}.", sender, target),
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Failed to save medal records");
            format!(
                "⚠️ {} lost their medal but the medal list could not be saved.",
                target
            )
        }
    }
}

/// `!medallist`
fn medal_list(ctx: &Context<'_>) -> String {
    if ctx.medals.is_empty() {
        return "No medalled players yet.".to_string();
    }
    let items: Vec<String> = ctx
        .medals
        .list()
        .map(|(token, level)| format!("{}({})", token, level))
        .collect();
    format!("🏅 Medallist: {}", items.join(", "))
}
