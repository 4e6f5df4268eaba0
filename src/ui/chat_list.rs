use crate::domain::{
    chat::Chat,
    chat_list_view::ChatListEntry,
    chats_state::ChatsState,
    message::{Message, MessageEntities},
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const PREVIEW_MAX_CHARS: usize = 40;

/// Renders the chat list exactly as the projector orders it.
pub fn render_chat_list(state: &ChatsState) -> Vec<String> {
    let mut lines = Vec::new();

    if state.is_searching() {
        lines.push(format!("Searching for \"{}\"...", state.query()));
    }

    if state.no_search_result() {
        lines.push(format!("No chats match \"{}\".", state.query()));
    }

    let entries = state.chats();
    if entries.is_empty() {
        lines.push("No chats yet.".to_owned());
        return lines;
    }

    lines.extend(entries.iter().map(|entry| match entry {
        ChatListEntry::Heading(title) => format!("-- {title} --"),
        ChatListEntry::Chat(chat) => chat_line(chat),
    }));
    lines
}

/// Renders a message map oldest first.
pub fn render_messages(messages: &MessageEntities) -> Vec<String> {
    if messages.is_empty() {
        return vec!["No messages loaded.".to_owned()];
    }

    messages.values().map(message_line).collect()
}

fn chat_line(chat: &Chat) -> String {
    let preview = chat
        .last_message
        .as_ref()
        .map(|message| truncate(&message.text, PREVIEW_MAX_CHARS))
        .unwrap_or_default();

    format!(
        "{:>6}  {:<6}  {}  {}  {}",
        chat.id,
        chat.chat_type.as_label(),
        chat.effective_time().format(TIME_FORMAT),
        chat.title,
        preview
    )
    .trim_end()
    .to_owned()
}

fn message_line(message: &Message) -> String {
    format!(
        "{}  {}: {}",
        message.created.format(TIME_FORMAT),
        message.sender_username.as_deref().unwrap_or("unknown"),
        message.text
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut shortened = text.chars().take(max_chars - 1).collect::<String>();
    shortened.push('…');
    shortened
}
