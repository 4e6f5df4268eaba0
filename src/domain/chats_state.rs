use super::{
    chat::{Chat, ChatPatch, RawChat},
    chat_list_view::{self, ChatListEntry},
    chat_store::ChatStore,
    error::StoreError,
    message::{Message, MessageEntities},
    search_state::{SearchPhase, SearchState, SearchTicket},
};

/// Everything the chat list screen is derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatsState {
    store: ChatStore,
    search: SearchState,
    selected_chat_id: Option<i64>,
    new_chat_title: String,
}

#[cfg_attr(not(test), allow(dead_code))]
impl ChatsState {
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn chat(&self, chat_id: i64) -> Option<&Chat> {
        self.store.get(chat_id).map(|entity| &entity.chat)
    }

    pub fn selected_chat_id(&self) -> Option<i64> {
        self.selected_chat_id
    }

    pub fn has_selected_chat(&self) -> bool {
        self.selected_chat_id.is_some()
    }

    pub fn selected_message_entities(&self) -> Option<&MessageEntities> {
        self.selected_chat_id
            .and_then(|chat_id| self.store.get(chat_id))
            .map(|entity| &entity.message_entities)
    }

    pub fn new_chat_title(&self) -> &str {
        &self.new_chat_title
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    pub fn search_phase(&self) -> SearchPhase {
        self.search.phase()
    }

    pub fn no_search_result(&self) -> bool {
        !self.search.query().is_empty() && self.search.searched_chats().is_empty()
    }

    pub fn chats(&self) -> Vec<ChatListEntry<'_>> {
        chat_list_view::project(&self.store, &self.search)
    }

    pub fn load_chats(&mut self, raw_chats: Vec<RawChat>) -> Result<(), StoreError> {
        self.store.load_chats(raw_chats)
    }

    pub fn load_latest_chats(&mut self, raw_chats: Vec<RawChat>) -> Result<(), StoreError> {
        self.store.load_latest_chats(raw_chats)
    }

    pub fn update_chat(&mut self, patch: ChatPatch) -> bool {
        self.store.update_chat(patch)
    }

    pub fn set_message_entities(
        &mut self,
        chat_id: i64,
        message_entities: MessageEntities,
    ) -> Result<(), StoreError> {
        self.store.set_message_entities(chat_id, message_entities)
    }

    pub fn add_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        self.store.add_message(chat_id, message)
    }

    pub fn edit_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        self.store.edit_message(chat_id, message)
    }

    pub fn set_last_message(&mut self, chat_id: i64, message: Message) -> Result<(), StoreError> {
        self.store.set_last_message(chat_id, message)
    }

    pub fn select_chat(&mut self, chat_id: i64) {
        self.selected_chat_id = Some(chat_id);
    }

    pub fn set_new_chat_title(&mut self, title: impl Into<String>) {
        self.new_chat_title = title.into();
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search.set_query(text);
    }

    pub fn begin_search(&mut self, text: &str) -> Option<SearchTicket> {
        self.search.begin(text)
    }

    pub fn complete_search(&mut self, ticket: SearchTicket, results: Vec<Chat>) -> bool {
        self.search.complete(ticket, results)
    }

    pub fn fail_search(&mut self, ticket: SearchTicket) -> bool {
        self.search.fail(ticket)
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }
}
