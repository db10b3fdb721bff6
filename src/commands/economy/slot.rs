//! The slot machine. The reel layout and payout table are fixed; only
//! the bid bounds come from guild settings.

use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::commands::error_reply;
use crate::db::EconomyError;
use crate::utils::format_credits;
use crate::{CommandResult, Context};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Symbol {
    Cherry,
    Orange,
    Lemon,
    Grape,
    Bell,
    Seven,
    Gem,
}

impl Symbol {
    fn emoji(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Orange => "🍊",
            Symbol::Lemon => "🍋",
            Symbol::Grape => "🍇",
            Symbol::Bell => "🔔",
            Symbol::Seven => "7️⃣",
            Symbol::Gem => "💎",
        }
    }
}

/// One weighted reel; the rarer the symbol, the richer the payout.
const REEL: &[Symbol] = &[
    Symbol::Cherry,
    Symbol::Cherry,
    Symbol::Cherry,
    Symbol::Orange,
    Symbol::Orange,
    Symbol::Orange,
    Symbol::Lemon,
    Symbol::Lemon,
    Symbol::Lemon,
    Symbol::Grape,
    Symbol::Grape,
    Symbol::Bell,
    Symbol::Bell,
    Symbol::Seven,
    Symbol::Gem,
];

/// Payout multiplier applied to the bid. Zero means the bid is lost.
pub fn payout_multiplier(reels: [Symbol; 3]) -> i64 {
    let [a, b, c] = reels;
    if a == b && b == c {
        return match a {
            Symbol::Seven => 20,
            Symbol::Gem => 12,
            Symbol::Bell => 8,
            _ => 6,
        };
    }
    match reels.iter().filter(|&&s| s == Symbol::Cherry).count() {
        2 => 3,
        1 => 1, // bid back
        _ => 0,
    }
}

fn spin() -> [Symbol; 3] {
    let mut rng = rand::rng();
    // REEL is non-empty, so choose can't fail.
    std::array::from_fn(|_| REEL.choose(&mut rng).copied().unwrap_or(Symbol::Lemon))
}

/// Try your luck at the slot machine
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn slot(
    ctx: Context<'_>,
    #[description = "Your bid in credits"]
    #[min = 1]
    bid: i64,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    let data = ctx.data();
    let settings = data.db.guild_settings(guild_id)?;
    if bid < settings.slot_min || bid > settings.slot_max {
        ctx.send(error_reply(format!(
            "Bid must be between {} and {}.",
            format_credits(settings.slot_min),
            format_credits(settings.slot_max)
        )))
        .await?;
        return Ok(());
    }

    let reels = spin();
    let multiplier = payout_multiplier(reels);
    let winnings = bid * multiplier;

    match data
        .db
        .adjust_balance(guild_id, ctx.author().id, winnings - bid)
    {
        Ok(new_balance) => {
            debug!(
                guild = guild_id.get(),
                user = ctx.author().id.get(),
                bid,
                multiplier,
                "slot spin settled"
            );
            let row = format!(
                "{} {} {}",
                reels[0].emoji(),
                reels[1].emoji(),
                reels[2].emoji()
            );
            let outcome = if multiplier > 1 {
                format!("You won {}! 🎉", format_credits(winnings))
            } else if multiplier == 1 {
                "You got your bid back.".to_string()
            } else {
                format!("You lost {}.", format_credits(bid))
            };
            ctx.send(
                CreateReply::default().embed(
                    CreateEmbed::new()
                        .title("🎰 Slot machine")
                        .description(format!(
                            "{row}\n{outcome}\nBalance: {}",
                            format_credits(new_balance)
                        ))
                        .color(if multiplier > 1 { 0x2ecc71 } else { 0x95a5a6 }),
                ),
            )
            .await?;
        }
        Err(EconomyError::InsufficientFunds) => {
            ctx.send(error_reply("You can't cover that bid.")).await?;
        }
        Err(EconomyError::NoAccount) => {
            ctx.send(error_reply(
                "You don't have an account yet; use `register` first.",
            ))
            .await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use Symbol::*;

    #[test_case([Seven, Seven, Seven], 20)]
    #[test_case([Gem, Gem, Gem], 12)]
    #[test_case([Bell, Bell, Bell], 8)]
    #[test_case([Lemon, Lemon, Lemon], 6)]
    #[test_case([Cherry, Cherry, Cherry], 6)]
    #[test_case([Cherry, Cherry, Lemon], 3)]
    #[test_case([Cherry, Grape, Lemon], 1)]
    #[test_case([Orange, Grape, Lemon], 0)]
    fn payout_table(reels: [Symbol; 3], expected: i64) {
        assert_eq!(payout_multiplier(reels), expected);
    }

    #[test]
    fn spin_always_lands_on_the_reel() {
        for _ in 0..100 {
            for symbol in spin() {
                assert!(REEL.contains(&symbol));
            }
        }
    }
}
