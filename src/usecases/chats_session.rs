use crate::domain::{chats_state::ChatsState, events::ChatEvent};

use super::{
    contracts::{ChatService, MessageLoader},
    create_chat::{self, CreateChatOutcome},
    error::SyncError,
    list_chats::{self, LatestChatsQuery, LoadChatsOutput},
    search_chats::{self, SearchContext, SearchOutcome},
};

/// Chat list state bound to the services that feed it.
pub struct ChatsSession<S, L>
where
    S: ChatService,
    L: MessageLoader,
{
    state: ChatsState,
    service: S,
    loader: L,
}

#[cfg_attr(not(test), allow(dead_code))]
impl<S, L> ChatsSession<S, L>
where
    S: ChatService,
    L: MessageLoader,
{
    pub fn new(service: S, loader: L) -> Self {
        Self {
            state: ChatsState::default(),
            service,
            loader,
        }
    }

    pub fn state(&self) -> &ChatsState {
        &self.state
    }

    pub fn load_chats(&mut self) -> Result<LoadChatsOutput, SyncError> {
        list_chats::load_chats(&mut self.state, &self.service)
    }

    pub fn load_latest_chats(
        &mut self,
        query: LatestChatsQuery,
    ) -> Result<LoadChatsOutput, SyncError> {
        list_chats::load_latest_chats(&mut self.state, &self.service, query)
    }

    pub fn set_query(&mut self, text: &str) {
        self.state.set_query(text);
    }

    pub fn search(
        &mut self,
        text: &str,
        context: &SearchContext,
    ) -> Result<SearchOutcome, SyncError> {
        search_chats::search_chats(&mut self.state, &self.service, text, context)
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
    }

    pub fn on_new_chat_title_input(&mut self, text: &str) {
        self.state.set_new_chat_title(text);
    }

    pub fn create_new_chat(&mut self) -> Result<CreateChatOutcome, SyncError> {
        create_chat::create_new_chat(&mut self.state, &self.service)
    }

    /// Selects the chat and asks the message subsystem to load its history.
    pub fn select_chat(&mut self, chat_id: i64) {
        self.state.select_chat(chat_id);
        self.loader.load_chat_messages(chat_id);
        tracing::debug!(chat_id, "chat selected");
    }

    /// Applies a chat service callback. Returns `false` when the event was
    /// ignored, which only happens for updates of chats the store does not hold.
    pub fn handle_event(&mut self, event: ChatEvent) -> Result<bool, SyncError> {
        let kind = event.kind();

        match event {
            ChatEvent::ChatUpdated(patch) => {
                let chat_id = patch.id;
                if !self.state.update_chat(patch) {
                    tracing::debug!(event = kind, chat_id, "chat event ignored for unknown chat");
                    return Ok(false);
                }
            }
            ChatEvent::MessagesLoaded { chat_id, messages } => {
                self.state.set_message_entities(chat_id, messages)?;
            }
            ChatEvent::MessageAdded { chat_id, message } => {
                self.state.add_message(chat_id, message)?;
            }
            ChatEvent::MessageEdited { chat_id, message } => {
                self.state.edit_message(chat_id, message)?;
            }
            ChatEvent::LastMessageChanged { chat_id, message } => {
                self.state.set_last_message(chat_id, message)?;
            }
        }

        tracing::debug!(event = kind, "chat event applied");
        Ok(true)
    }
}
