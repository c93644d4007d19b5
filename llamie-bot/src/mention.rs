//! Admission policy: decides whether an inbound message is addressed to the bot.
//!
//! A message is admitted when it replies to one of the bot's own messages or contains the mention
//! token. Everything else in a group is ignored.

use llamie_core::{BotIdentity, Message};

/// Outcome of the admission policy for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Not addressed to the bot; no context change, no inference.
    Ignore,
    /// Mention with nothing else; answered with a fixed prompt, no context change.
    Greet,
    /// Forward this text (mention stripped) to the model.
    Query(String),
}

/// Returns true if `text` contains `token` (exact, case-sensitive).
#[inline]
pub fn is_mentioned(text: &str, token: &str) -> bool {
    !token.is_empty() && text.contains(token)
}

/// Removes the first occurrence of `token` from `text` and trims surrounding whitespace.
#[inline]
pub fn strip_mention(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.trim().to_string();
    }
    text.replacen(token, "", 1).trim().to_string()
}

/// True when `message` replies to a message authored by the bot. Needs a known identity.
pub fn is_reply_to_bot(message: &Message, identity: Option<&BotIdentity>) -> bool {
    match (identity, message.reply_to_user_id) {
        (Some(me), Some(author)) => me.is_self(author),
        _ => false,
    }
}

/// Applies the admission policy.
///
/// - Empty (or whitespace-only) text: [`Admission::Ignore`].
/// - Reply to the bot: [`Admission::Query`] with the mention stripped if present.
/// - Contains `mention_token`: stripped text, or [`Admission::Greet`] when nothing is left.
/// - Otherwise [`Admission::Ignore`].
pub fn admit(
    message: &Message,
    identity: Option<&BotIdentity>,
    mention_token: Option<&str>,
) -> Admission {
    let text = message.content.as_str();
    if text.trim().is_empty() {
        return Admission::Ignore;
    }

    let mentioned = mention_token.filter(|token| is_mentioned(text, token));

    if is_reply_to_bot(message, identity) {
        let question = match mentioned {
            Some(token) => strip_mention(text, token),
            None => text.trim().to_string(),
        };
        return if question.is_empty() {
            Admission::Greet
        } else {
            Admission::Query(question)
        };
    }

    match mentioned {
        Some(token) => {
            let question = strip_mention(text, token);
            if question.is_empty() {
                Admission::Greet
            } else {
                Admission::Query(question)
            }
        }
        None => Admission::Ignore,
    }
}
