//! Normalized chat store: one canonical record per chat id plus its messages.

use std::collections::BTreeMap;

use super::{
    chat::{decode_all, Chat, ChatPatch, RawChat},
    error::StoreError,
    message::{Message, MessageEntities},
};

/// A chat together with the messages loaded for it so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntity {
    pub chat: Chat,
    pub message_entities: MessageEntities,
}

impl ChatEntity {
    pub fn new(chat: Chat) -> Self {
        Self {
            chat,
            message_entities: MessageEntities::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatStore {
    entities: BTreeMap<i64, ChatEntity>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl ChatStore {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, chat_id: i64) -> Option<&ChatEntity> {
        self.entities.get(&chat_id)
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.entities.contains_key(&chat_id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &ChatEntity> {
        self.entities.values()
    }

    pub fn chat_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entities.keys().copied()
    }

    /// Full reload: the store afterwards holds exactly the given chats, all message history dropped.
    pub fn load_chats(&mut self, raw_chats: Vec<RawChat>) -> Result<(), StoreError> {
        let chats = decode_all(raw_chats)?;

        self.entities = chats
            .into_iter()
            .map(|chat| (chat.id, ChatEntity::new(chat)))
            .collect();

        tracing::debug!(chat_count = self.entities.len(), "chat store reloaded");
        Ok(())
    }

    /// Installs a page of latest chats. Chats missing from the page are kept;
    /// chats in the page replace their previous entry, messages included.
    pub fn load_latest_chats(&mut self, raw_chats: Vec<RawChat>) -> Result<(), StoreError> {
        let chats = decode_all(raw_chats)?;
        let page_size = chats.len();

        for chat in chats {
            self.entities.insert(chat.id, ChatEntity::new(chat));
        }

        tracing::debug!(
            page_size,
            chat_count = self.entities.len(),
            "latest chats merged into store"
        );
        Ok(())
    }

    /// Returns `false` when the chat is unknown; never creates a chat.
    pub fn update_chat(&mut self, patch: ChatPatch) -> bool {
        match self.entities.get_mut(&patch.id) {
            Some(entity) => {
                patch.apply_to(&mut entity.chat);
                true
            }
            None => {
                tracing::debug!(chat_id = patch.id, "ignoring update for unknown chat");
                false
            }
        }
    }

    pub fn set_message_entities(
        &mut self,
        chat_id: i64,
        message_entities: MessageEntities,
    ) -> Result<(), StoreError> {
        self.entity_mut(chat_id)?.message_entities = message_entities;
        Ok(())
    }

    pub fn add_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        let entity = self.entity_mut(chat_id)?;

        entity.chat.last_message = Some(message.clone());
        entity
            .message_entities
            .insert(message.sending_time(), message);
        Ok(())
    }

    /// Upserts the message; `last_message` follows only if it is the edited message.
    pub fn edit_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        let entity = self.entity_mut(chat_id)?;

        let edits_last_message = entity
            .chat
            .last_message
            .as_ref()
            .is_some_and(|last| last.id == message.id);
        if edits_last_message {
            entity.chat.last_message = Some(message.clone());
        }

        entity
            .message_entities
            .insert(message.sending_time(), message);
        Ok(())
    }

    pub fn set_last_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        self.entity_mut(chat_id)?.chat.last_message = Some(message);
        Ok(())
    }

    fn entity_mut(&mut self, chat_id: i64) -> Result<&mut ChatEntity, StoreError> {
        self.entities
            .get_mut(&chat_id)
            .ok_or(StoreError::UnknownChat { chat_id })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{
        chat::ChatType,
        message::{CustomJson, RawMessage},
    };

    fn raw_chat(id: i64, last_message_id: Option<i64>) -> RawChat {
        RawChat {
            id,
            title: format!("chat-{id}"),
            chat_type: ChatType::Direct,
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            people: vec![],
            last_message: last_message_id.map(|message_id| RawMessage {
                id: message_id,
                sender_username: None,
                text: "last".to_owned(),
                created: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                custom_json: format!(r#"{{"sending_time": {message_id}}}"#),
            }),
        }
    }

    fn message(id: i64, sending_time: i64, text: &str) -> Message {
        Message {
            id,
            sender_username: Some("alice".to_owned()),
            text: text.to_owned(),
            created: Utc.timestamp_opt(sending_time, 0).unwrap(),
            custom_json: CustomJson::new(sending_time),
        }
    }

    fn loaded(ids: &[i64]) -> ChatStore {
        let mut store = ChatStore::default();
        store
            .load_chats(ids.iter().map(|id| raw_chat(*id, Some(*id * 10))).collect())
            .expect("fixture chats must load");
        store
    }

    #[test]
    fn load_chats_keys_store_by_exactly_the_input_ids() {
        let mut store = loaded(&[1, 2, 3]);

        store
            .load_chats(vec![raw_chat(3, None), raw_chat(4, None)])
            .expect("reload must succeed");

        assert_eq!(store.chat_ids().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn load_chats_discards_message_history() {
        let mut store = loaded(&[1]);
        store
            .add_message(1, message(5, 50, "hi"))
            .expect("chat exists");

        store.load_chats(vec![raw_chat(1, None)]).expect("reload");

        assert!(store.get(1).expect("chat 1").message_entities.is_empty());
    }

    #[test]
    fn load_chats_collapses_duplicate_ids() {
        let mut store = ChatStore::default();

        store
            .load_chats(vec![raw_chat(1, None), raw_chat(1, Some(7))])
            .expect("load must succeed");

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(1).and_then(|entity| entity.chat.last_message.as_ref()).map(|m| m.id),
            Some(7)
        );
    }

    #[test]
    fn malformed_payload_leaves_store_untouched() {
        let mut store = loaded(&[1, 2]);
        let before = store.clone();
        let mut broken = raw_chat(9, Some(1));
        if let Some(last) = broken.last_message.as_mut() {
            last.custom_json = "oops".to_owned();
        }

        let full = store.load_chats(vec![raw_chat(3, None), broken.clone()]);
        let latest = store.load_latest_chats(vec![raw_chat(4, None), broken]);

        assert!(matches!(full, Err(StoreError::MalformedPayload { chat_id: 9, .. })));
        assert!(matches!(latest, Err(StoreError::MalformedPayload { chat_id: 9, .. })));
        assert_eq!(store, before);
    }

    #[test]
    fn load_latest_chats_keeps_absent_chats_and_resets_present_ones() {
        let mut store = loaded(&[1, 2]);
        store.add_message(1, message(5, 50, "a")).expect("chat 1");
        store.add_message(2, message(6, 60, "b")).expect("chat 2");

        store
            .load_latest_chats(vec![raw_chat(2, Some(20)), raw_chat(3, None)])
            .expect("page must merge");

        assert_eq!(store.chat_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(store.get(1).expect("chat 1").message_entities.len(), 1);
        assert!(store.get(2).expect("chat 2").message_entities.is_empty());
        assert!(store.get(3).expect("chat 3").message_entities.is_empty());
    }

    #[test]
    fn update_chat_merges_fields_of_known_chat() {
        let mut store = loaded(&[1]);

        let updated = store.update_chat(ChatPatch {
            title: Some("Ops".to_owned()),
            chat_type: Some(ChatType::Group),
            ..ChatPatch::new(1)
        });

        let chat = &store.get(1).expect("chat 1").chat;
        assert!(updated);
        assert_eq!(chat.title, "Ops");
        assert_eq!(chat.chat_type, ChatType::Group);
        assert_eq!(chat.last_message.as_ref().map(|m| m.id), Some(10));
    }

    #[test]
    fn update_chat_does_not_create_unknown_chat() {
        let mut store = loaded(&[1]);

        assert!(!store.update_chat(ChatPatch::new(42)));
        assert!(!store.contains(42));
    }

    #[test]
    fn add_message_sets_last_message_and_entry() {
        let mut store = loaded(&[1]);
        let added = message(5, 50, "hello");

        store.add_message(1, added.clone()).expect("chat exists");

        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.message_entities.get(&50), Some(&added));
        assert_eq!(entity.chat.last_message.as_ref(), Some(&added));
    }

    #[test]
    fn adding_identical_message_twice_is_idempotent() {
        let mut store = loaded(&[1]);
        let added = message(5, 50, "hello");

        store.add_message(1, added.clone()).expect("chat 1");
        let once = store.clone();
        store.add_message(1, added.clone()).expect("chat 1");

        assert_eq!(store, once);
        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.message_entities.len(), 1);
        assert_eq!(entity.message_entities.get(&50), Some(&added));
    }

    #[test]
    fn add_message_with_same_sending_time_overwrites() {
        let mut store = loaded(&[1]);

        store.add_message(1, message(5, 50, "first")).expect("chat 1");
        store.add_message(1, message(6, 50, "second")).expect("chat 1");

        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.message_entities.len(), 1);
        assert_eq!(entity.message_entities[&50].text, "second");
    }

    #[test]
    fn edit_message_of_last_message_moves_pointer() {
        let mut store = loaded(&[1]);
        store.add_message(1, message(5, 50, "draft")).expect("chat 1");

        store.edit_message(1, message(5, 50, "final")).expect("chat 1");

        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.chat.last_message.as_ref().map(|m| m.text.as_str()), Some("final"));
        assert_eq!(entity.message_entities[&50].text, "final");
    }

    #[test]
    fn edit_message_of_older_message_keeps_last_message() {
        let mut store = loaded(&[1]);
        store.add_message(1, message(4, 40, "old")).expect("chat 1");
        store.add_message(1, message(5, 50, "new")).expect("chat 1");

        store.edit_message(1, message(4, 40, "old, edited")).expect("chat 1");

        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.chat.last_message.as_ref().map(|m| m.id), Some(5));
        assert_eq!(entity.message_entities[&40].text, "old, edited");
    }

    #[test]
    fn set_last_message_leaves_message_map_alone() {
        let mut store = loaded(&[1]);

        store.set_last_message(1, message(8, 80, "pointer")).expect("chat 1");

        let entity = store.get(1).expect("chat 1");
        assert_eq!(entity.chat.last_message.as_ref().map(|m| m.id), Some(8));
        assert!(entity.message_entities.is_empty());
    }

    #[test]
    fn set_message_entities_replaces_map_wholesale() {
        let mut store = loaded(&[1]);
        store.add_message(1, message(1, 10, "gone")).expect("chat 1");
        let replacement = MessageEntities::from([(20, message(2, 20, "kept"))]);

        store
            .set_message_entities(1, replacement.clone())
            .expect("chat 1");

        assert_eq!(store.get(1).expect("chat 1").message_entities, replacement);
    }

    #[test]
    fn mutations_on_unknown_chat_are_rejected() {
        let mut store = loaded(&[1]);
        let expected = Err(StoreError::UnknownChat { chat_id: 99 });

        assert_eq!(store.add_message(99, message(1, 1, "x")), expected);
        assert_eq!(store.edit_message(99, message(1, 1, "x")), expected);
        assert_eq!(store.set_last_message(99, message(1, 1, "x")), expected);
        assert_eq!(
            store.set_message_entities(99, MessageEntities::new()),
            expected
        );
        assert!(!store.contains(99));
    }
}
