//! Trivia sessions. Each session is a spawned task bound to one channel;
//! the message event hook feeds candidate answers in over an mpsc channel,
//! and the session registry owns the senders.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::model::id::{ChannelId, UserId};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::lists::TriviaQuestion;

/// How long players get to answer each question.
pub const ANSWER_WINDOW: Duration = Duration::from_secs(20);
/// A session ends after this many questions.
pub const MAX_QUESTIONS: usize = 10;
/// A session gives up after this many unanswered questions in a row.
pub const MAX_UNANSWERED: u32 = 5;

pub enum SessionMessage {
    Answer {
        user_id: UserId,
        user_name: String,
        content: String,
    },
    Stop,
}

/// Registry of running sessions, one per channel.
pub struct TriviaHost {
    sessions: DashMap<ChannelId, mpsc::UnboundedSender<SessionMessage>>,
}

impl TriviaHost {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn is_active(&self, channel_id: ChannelId) -> bool {
        self.sessions.contains_key(&channel_id)
    }

    /// Feed a message into the channel's session, if one is running.
    pub fn submit_answer(&self, channel_id: ChannelId, user_id: UserId, user_name: String, content: String) {
        if let Some(tx) = self.sessions.get(&channel_id) {
            // A closed channel means the session is winding down; ignore.
            let _ = tx.send(SessionMessage::Answer {
                user_id,
                user_name,
                content,
            });
        }
    }

    /// Ask the channel's session to stop. Returns `false` if none runs.
    pub fn stop(&self, channel_id: ChannelId) -> bool {
        match self.sessions.get(&channel_id) {
            Some(tx) => {
                let _ = tx.send(SessionMessage::Stop);
                true
            }
            None => false,
        }
    }

    /// Spawn a session in the channel. Returns `false` if one is already
    /// running there.
    pub fn start(
        self: &Arc<Self>,
        ctx: serenity::Context,
        channel_id: ChannelId,
        list_name: String,
        questions: Vec<TriviaQuestion>,
    ) -> bool {
        if self.sessions.contains_key(&channel_id) {
            return false;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.sessions.insert(channel_id, tx);
        let host = Arc::clone(self);
        tokio::spawn(async move {
            info!(channel = channel_id.get(), list = %list_name, "trivia session started");
            run_session(&ctx, channel_id, questions, rx).await;
            host.sessions.remove(&channel_id);
            info!(channel = channel_id.get(), "trivia session ended");
        });
        true
    }
}

impl Default for TriviaHost {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_session(
    ctx: &serenity::Context,
    channel_id: ChannelId,
    questions: Vec<TriviaQuestion>,
    mut rx: mpsc::UnboundedReceiver<SessionMessage>,
) {
    let mut scores: HashMap<UserId, (String, u32)> = HashMap::new();
    let mut unanswered_streak = 0u32;

    for (number, question) in questions.iter().take(MAX_QUESTIONS).enumerate() {
        say(ctx, channel_id, format!("**Question {}:** {}", number + 1, question.question)).await;

        let deadline = tokio::time::Instant::now() + ANSWER_WINDOW;
        let outcome = loop {
            tokio::select! {
                message = rx.recv() => match message {
                    None => return,
                    Some(SessionMessage::Stop) => {
                        say(ctx, channel_id, "Trivia stopped.".to_string()).await;
                        post_scoreboard(ctx, channel_id, &scores).await;
                        return;
                    }
                    Some(SessionMessage::Answer { user_id, user_name, content }) => {
                        if answer_matches(&content, &question.answers) {
                            let entry = scores.entry(user_id).or_insert_with(|| (user_name.clone(), 0));
                            entry.1 += 1;
                            say(
                                ctx,
                                channel_id,
                                format!("✅ **{user_name}** got it! (+1, total {})", entry.1),
                            )
                            .await;
                            break QuestionOutcome::Answered;
                        }
                    }
                },
                _ = tokio::time::sleep_until(deadline) => {
                    say(
                        ctx,
                        channel_id,
                        format!("⏰ Time's up! The answer was **{}**.", question.answers[0]),
                    )
                    .await;
                    break QuestionOutcome::TimedOut;
                }
            }
        };

        match outcome {
            QuestionOutcome::Answered => unanswered_streak = 0,
            QuestionOutcome::TimedOut => {
                unanswered_streak += 1;
                if unanswered_streak >= MAX_UNANSWERED {
                    say(
                        ctx,
                        channel_id,
                        "Guess nobody's playing. Stopping trivia.".to_string(),
                    )
                    .await;
                    break;
                }
            }
        }
    }

    post_scoreboard(ctx, channel_id, &scores).await;
}

enum QuestionOutcome {
    Answered,
    TimedOut,
}

/// A guess is right when it equals any accepted answer, ignoring case
/// and surrounding whitespace.
pub fn answer_matches(guess: &str, accepted: &[String]) -> bool {
    let guess = guess.trim();
    accepted
        .iter()
        .any(|answer| answer.trim().eq_ignore_ascii_case(guess))
}

async fn post_scoreboard(
    ctx: &serenity::Context,
    channel_id: ChannelId,
    scores: &HashMap<UserId, (String, u32)>,
) {
    if scores.is_empty() {
        say(ctx, channel_id, "No points were scored.".to_string()).await;
        return;
    }
    let mut ranked: Vec<_> = scores.values().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let lines: Vec<String> = ranked
        .iter()
        .enumerate()
        .map(|(i, (name, points))| format!("**{}.** {name} — {points}", i + 1))
        .collect();
    say(ctx, channel_id, format!("🏆 Final scores:\n{}", lines.join("\n"))).await;
}

async fn say(ctx: &serenity::Context, channel_id: ChannelId, content: String) {
    if let Err(e) = channel_id.say(&ctx.http, content).await {
        warn!(channel = channel_id.get(), "failed to send trivia message: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn answers_match_case_insensitively() {
        let accepted = answers(&["Paris"]);
        assert!(answer_matches("paris", &accepted));
        assert!(answer_matches("  PARIS  ", &accepted));
        assert!(!answer_matches("London", &accepted));
    }

    #[test]
    fn any_accepted_answer_scores() {
        let accepted = answers(&["Alaska", "AK"]);
        assert!(answer_matches("ak", &accepted));
        assert!(!answer_matches("Alask", &accepted));
    }

    #[test]
    fn registry_tracks_activity() {
        let host = TriviaHost::new();
        let channel = ChannelId::new(1);
        assert!(!host.is_active(channel));
        assert!(!host.stop(channel));
        // Submitting to an idle channel is a no-op, not a panic.
        host.submit_answer(channel, UserId::new(2), "ann".into(), "guess".into());
    }
}
