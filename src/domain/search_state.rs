use super::chat::Chat;

/// Title of the heading row placed above search results.
pub const SEARCH_HEADING_TITLE: &str = "Conversations";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchListItem {
    Heading(String),
    Result(Chat),
}

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Results,
}

/// Identifies one search request. Only the most recently issued ticket may commit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    query: String,
    is_searching: bool,
    searched_chats: Vec<SearchListItem>,
    generation: u64,
}

#[cfg_attr(not(test), allow(dead_code))]
impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn searched_chats(&self) -> &[SearchListItem] {
        &self.searched_chats
    }

    pub fn phase(&self) -> SearchPhase {
        if self.is_searching {
            SearchPhase::Searching
        } else if self.query.is_empty() && self.searched_chats.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Results
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Starts a search for `text`. Empty text resets to idle and yields no ticket.
    /// Previous results stay visible until the new ones are committed.
    pub fn begin(&mut self, text: &str) -> Option<SearchTicket> {
        if text.is_empty() {
            self.clear();
            return None;
        }

        self.query = text.to_owned();
        self.is_searching = true;
        self.generation += 1;

        Some(SearchTicket {
            generation: self.generation,
        })
    }

    /// Commits results for `ticket`. Returns `false` and changes nothing when a newer
    /// search was started (or the search was cleared) after this ticket was issued.
    pub fn complete(&mut self, ticket: SearchTicket, results: Vec<Chat>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale search results"
            );
            return false;
        }

        self.searched_chats = if results.is_empty() {
            Vec::new()
        } else {
            std::iter::once(SearchListItem::Heading(SEARCH_HEADING_TITLE.to_owned()))
                .chain(results.into_iter().map(SearchListItem::Result))
                .collect()
        };
        self.is_searching = false;
        true
    }

    /// Ends a failed search, keeping whatever results were shown before.
    pub fn fail(&mut self, ticket: SearchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.is_searching = false;
        true
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.searched_chats.clear();
        self.is_searching = false;
        self.generation += 1;
    }

    fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.generation == self.generation
    }
}
