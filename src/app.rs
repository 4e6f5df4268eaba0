use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{
    cli::{Cli, Command},
    domain::{self, events::RawChatEvent},
    infra::{self, fixture_service::FixtureChatService, stubs::LoggingMessageLoader},
    ui::{self, chat_list},
    usecases::{
        self, bootstrap,
        chats_session::ChatsSession,
        create_chat::CreateChatOutcome,
        error::SyncError,
        list_chats::LatestChatsQuery,
        search_chats::{SearchContext, SearchOutcome},
    },
};

const REPLAY_EVENT_REJECTED: &str = "SYNC_REPLAY_EVENT_REJECTED";

type CliSession<'a> = ChatsSession<&'a FixtureChatService, LoggingMessageLoader>;

pub fn run(cli: Cli) -> Result<()> {
    let (context, _logging) = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let mut session = ChatsSession::new(&context.service, LoggingMessageLoader);

    match cli.command_or_default() {
        Command::Chats => {
            session.load_chats()?;
        }
        Command::Latest { limit } => {
            let limit = limit.unwrap_or(context.config.sync.latest_chats_limit);
            let output = session.load_latest_chats(LatestChatsQuery::new(limit))?;
            tracing::info!(
                received = output.received,
                stored = output.stored,
                "latest chats loaded"
            );
        }
        Command::Search { query, user } => {
            session.load_chats()?;
            let search_context =
                SearchContext::new(user.unwrap_or_else(|| context.config.service.username.clone()));
            if let SearchOutcome::Applied { result_count } =
                session.search(&query, &search_context)?
            {
                tracing::info!(result_count, query = %query, "search completed");
            }
        }
        Command::Create { title } => {
            session.on_new_chat_title_input(&title);
            match session.create_new_chat()? {
                CreateChatOutcome::Created(chat) => {
                    println!("Created chat {} \"{}\".", chat.id, chat.title);
                }
                CreateChatOutcome::Skipped => println!("Chat title is empty; nothing created."),
            }
            session.load_chats()?;
        }
        Command::Replay { events, select } => {
            session.load_chats()?;
            let rejected = replay_events(&mut session, &events)?;
            if rejected > 0 {
                eprintln!("{rejected} event(s) were rejected; see log for details.");
            }

            if let Some(chat_id) = select {
                session.select_chat(chat_id);
            }
        }
    }

    print_state(&session);
    Ok(())
}

fn replay_events(session: &mut CliSession<'_>, path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let events: Vec<RawChatEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse events file {}", path.display()))?;

    let mut rejected = 0;
    for (index, raw_event) in events.into_iter().enumerate() {
        let applied = raw_event
            .decode()
            .map_err(SyncError::from)
            .and_then(|event| session.handle_event(event));

        if let Err(error) = applied {
            rejected += 1;
            tracing::warn!(
                code = REPLAY_EVENT_REJECTED,
                index,
                error = %error,
                "chat event rejected"
            );
        }
    }

    Ok(rejected)
}

fn print_state(session: &CliSession<'_>) {
    for line in chat_list::render_chat_list(session.state()) {
        println!("{line}");
    }

    if let Some(messages) = session.state().selected_message_entities() {
        println!();
        for line in chat_list::render_messages(messages) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw_chat;

    #[test]
    fn replay_applies_events_and_counts_rejections() {
        let service = FixtureChatService::new(vec![raw_chat(1, 10, None), raw_chat(2, 20, None)]);
        let mut session = ChatsSession::new(&service, LoggingMessageLoader);
        session.load_chats().expect("fixture chats must load");

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let events_path = temp_dir.path().join("events.json");
        fs::write(
            &events_path,
            r#"[
                {"kind": "message_added", "chat_id": 1, "message": {
                    "id": 5, "text": "hi", "created": "1970-01-01T00:00:30Z",
                    "custom_json": "{\"sending_time\": 30}"}},
                {"kind": "message_added", "chat_id": 99, "message": {
                    "id": 6, "text": "lost", "created": "1970-01-01T00:00:31Z",
                    "custom_json": "{\"sending_time\": 31}"}},
                {"kind": "chat_updated", "id": 2, "title": "Renamed"}
            ]"#,
        )
        .expect("must write events");

        let rejected = replay_events(&mut session, &events_path).expect("replay must run");

        assert_eq!(rejected, 1);
        let state = session.state();
        assert_eq!(state.chats()[0].chat().map(|chat| chat.id), Some(1));
        assert_eq!(state.chat(2).map(|chat| chat.title.as_str()), Some("Renamed"));
    }

    #[test]
    fn replay_fails_on_unparseable_file() {
        let service = FixtureChatService::default();
        let mut session = ChatsSession::new(&service, LoggingMessageLoader);
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let events_path = temp_dir.path().join("events.json");
        fs::write(&events_path, "{").expect("must write events");

        assert!(replay_events(&mut session, &events_path).is_err());
    }
}
