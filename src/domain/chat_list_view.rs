use super::{
    chat::Chat,
    chat_store::ChatStore,
    search_state::{SearchListItem, SearchState},
};

/// One row of the chat list shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatListEntry<'a> {
    Heading(&'a str),
    Chat(&'a Chat),
}

#[cfg_attr(not(test), allow(dead_code))]
impl<'a> ChatListEntry<'a> {
    pub fn chat(&self) -> Option<&'a Chat> {
        match *self {
            Self::Heading(_) => None,
            Self::Chat(chat) => Some(chat),
        }
    }
}

impl<'a> From<&'a SearchListItem> for ChatListEntry<'a> {
    fn from(item: &'a SearchListItem) -> Self {
        match item {
            SearchListItem::Heading(title) => Self::Heading(title.as_str()),
            SearchListItem::Result(chat) => Self::Chat(chat),
        }
    }
}

/// Search results win outright; otherwise every stored chat, most recent first.
pub fn project<'a>(store: &'a ChatStore, search: &'a SearchState) -> Vec<ChatListEntry<'a>> {
    if !search.searched_chats().is_empty() {
        return search
            .searched_chats()
            .iter()
            .map(ChatListEntry::from)
            .collect();
    }

    sorted_chats(store)
        .into_iter()
        .map(ChatListEntry::Chat)
        .collect()
}

pub fn sorted_chats(store: &ChatStore) -> Vec<&Chat> {
    let mut chats = store
        .entities()
        .map(|entity| &entity.chat)
        .collect::<Vec<_>>();
    chats.sort_by(|left, right| right.effective_time().cmp(&left.effective_time()));
    chats
}
