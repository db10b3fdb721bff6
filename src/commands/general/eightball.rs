use rand::seq::IndexedRandom;

use crate::{CommandResult, Context};

const ANSWERS: &[&str] = &[
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes, definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

/// Ask the magic eight ball a question
#[poise::command(slash_command, prefix_command, aliases("8ball"), category = "General")]
pub async fn eightball(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: String,
) -> CommandResult {
    let answer = {
        let mut rng = rand::rng();
        ANSWERS.choose(&mut rng).copied().unwrap_or("Ask again later")
    };
    ctx.say(format!("> {question}\n🎱 {answer}")).await?;
    Ok(())
}
