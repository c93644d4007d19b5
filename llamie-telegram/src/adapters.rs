//! Adapters from Telegram (teloxide) types to llamie_core types.

use llamie_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User::with_id(0)),
            chat: Chat::new(msg.chat.id.0, self.chat_type()),
            content: msg.text().unwrap_or("").to_string(),
            created_at: msg.date,
            reply_to_message_id: msg.reply_to_message().map(|m| m.id.to_string()),
            reply_to_user_id: msg
                .reply_to_message()
                .and_then(|m| m.from.as_ref())
                .map(|u| u.id.0 as i64),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else {
            "channel"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    /// **Test: A reply in a group carries the replied-to message id and author.**
    #[test]
    fn test_message_wrapper_reply_context() {
        let json = r#"{
            "message_id": 11,
            "date": 1706529600,
            "chat": {"id": -100, "type": "group", "title": "friends"},
            "from": {"id": 5, "is_bot": false, "first_name": "Ann"},
            "text": "and tomorrow?",
            "reply_to_message": {
                "message_id": 10,
                "date": 1706529500,
                "chat": {"id": -100, "type": "group", "title": "friends"},
                "from": {"id": 777, "is_bot": true, "first_name": "Llamie", "username": "LlamieBot"},
                "text": "Sunny today."
            }
        }"#;
        let msg: teloxide::types::Message = serde_json::from_str(json).unwrap();

        let core = TelegramMessageWrapper(&msg).to_core();

        assert_eq!(core.id, "11");
        assert_eq!(core.user.id, 5);
        assert_eq!(core.chat, Chat::new(-100, "group"));
        assert_eq!(core.content, "and tomorrow?");
        assert_eq!(core.reply_to_message_id.as_deref(), Some("10"));
        assert_eq!(core.reply_to_user_id, Some(777));
    }

    /// **Test: A non-reply private message has no reply context.**
    #[test]
    fn test_message_wrapper_plain_private() {
        let json = r#"{
            "message_id": 1,
            "date": 1706529600,
            "chat": {"id": 123, "type": "private", "first_name": "Ann"},
            "from": {"id": 123, "is_bot": false, "first_name": "Ann"},
            "text": "@LlamieBot hi"
        }"#;
        let msg: teloxide::types::Message = serde_json::from_str(json).unwrap();

        let core = TelegramMessageWrapper(&msg).to_core();

        assert_eq!(core.chat.chat_type, "private");
        assert!(core.reply_to_message_id.is_none());
        assert!(core.reply_to_user_id.is_none());
    }
}
