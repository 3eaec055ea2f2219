//! View sessions: the state a list view or a detail view holds while open.
//!
//! A session owns its data exclusively. Every load is tagged with a
//! `RequestToken`; only the result for the latest token is applied, so a slow
//! response that arrives after a newer request was issued is dropped.

use crate::catalog::{filter_records, type_index, CatalogFilter};
use crate::client::CatalogSource;
use crate::errors::BrowserResult;
use crate::navigation::navigate;
use schema::{CatalogRecord, Direction, RecordId};
use tracing::{debug, info, warn};

/// Where a session's data currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    /// The user-visible message. Stays until the session loads again.
    Failed(String),
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Identifies one issued load within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct TokenCounter {
    latest: u64,
}

impl TokenCounter {
    fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    fn any_issued(&self) -> bool {
        self.latest > 0
    }
}

/// What the list view should draw right now.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    /// The index itself is empty
    NoData,
    /// The index has entries but none pass the filter
    NoMatches,
    Records(Vec<&'a CatalogRecord>),
}

/// State of an open list view: the full index plus the current filter.
#[derive(Debug)]
pub struct ListSession {
    state: LoadState<Vec<CatalogRecord>>,
    filter: CatalogFilter,
    tokens: TokenCounter,
}

impl Default for ListSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSession {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            filter: CatalogFilter::default(),
            tokens: TokenCounter::default(),
        }
    }

    pub fn state(&self) -> &LoadState<Vec<CatalogRecord>> {
        &self.state
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn set_type_filter(&mut self, type_label: impl Into<String>) {
        self.filter.type_label = type_label.into();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.filter = filter;
    }

    /// Marks the session as loading and returns the token the result must carry.
    pub fn begin_load(&mut self) -> RequestToken {
        self.state = LoadState::Loading;
        self.tokens.issue()
    }

    /// Starts a load only when one is needed.
    ///
    /// Returns `None` while the index is loaded or a load is already in
    /// flight. A fresh session or a failed one gets a new token.
    pub fn claim_load(&mut self) -> Option<RequestToken> {
        match self.state {
            LoadState::Loaded(_) => None,
            LoadState::Loading if self.tokens.any_issued() => None,
            LoadState::Loading | LoadState::Failed(_) => Some(self.begin_load()),
        }
    }

    /// Applies a finished fetch. Returns `false` if `token` is stale.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: BrowserResult<Vec<CatalogRecord>>,
    ) -> bool {
        if !self.tokens.is_current(token) {
            debug!(?token, "dropping stale list result");
            return false;
        }
        self.state = match result {
            Ok(records) => {
                info!(count = records.len(), "catalog loaded");
                LoadState::Loaded(records)
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    /// Fetches the full index from `source` and stores the outcome.
    pub async fn load<S: CatalogSource>(&mut self, source: &S) {
        let token = self.begin_load();
        let result = source.fetch_all().await;
        self.apply(token, result);
    }

    /// Distinct type labels of the loaded index, for the type selector.
    pub fn type_options(&self) -> Vec<String> {
        self.state
            .loaded()
            .map(|records| type_index(records))
            .unwrap_or_default()
    }

    /// Records passing the current filter; empty while not loaded.
    pub fn visible(&self) -> Vec<&CatalogRecord> {
        self.state
            .loaded()
            .map(|records| filter_records(records, &self.filter))
            .unwrap_or_default()
    }

    pub fn view(&self) -> ListView<'_> {
        match &self.state {
            LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Failed(message),
            LoadState::Loaded(records) if records.is_empty() => ListView::NoData,
            LoadState::Loaded(records) => {
                let visible = filter_records(records, &self.filter);
                if visible.is_empty() {
                    ListView::NoMatches
                } else {
                    ListView::Records(visible)
                }
            }
        }
    }
}

/// State of an open detail view for a single record.
#[derive(Debug)]
pub struct DetailSession {
    requested: RecordId,
    state: LoadState<CatalogRecord>,
    tokens: TokenCounter,
}

impl DetailSession {
    pub fn new(requested: RecordId) -> Self {
        Self {
            requested,
            state: LoadState::Loading,
            tokens: TokenCounter::default(),
        }
    }

    /// The id most recently asked for, loaded or not.
    pub fn requested(&self) -> RecordId {
        self.requested
    }

    pub fn state(&self) -> &LoadState<CatalogRecord> {
        &self.state
    }

    pub fn record(&self) -> Option<&CatalogRecord> {
        self.state.loaded()
    }

    /// Id of the record on display, if any.
    pub fn current_id(&self) -> Option<RecordId> {
        self.record().map(|record| record.id)
    }

    pub fn begin_load(&mut self, id: RecordId) -> RequestToken {
        self.requested = id;
        self.state = LoadState::Loading;
        self.tokens.issue()
    }

    /// Applies a finished fetch. Returns `false` if `token` is stale.
    pub fn apply(&mut self, token: RequestToken, result: BrowserResult<CatalogRecord>) -> bool {
        if !self.tokens.is_current(token) {
            debug!(?token, "dropping stale detail result");
            return false;
        }
        self.state = match result {
            Ok(record) => {
                info!(id = record.id, name = %record.display_name(), "record loaded");
                LoadState::Loaded(record)
            }
            Err(err) => {
                warn!(id = self.requested, error = %err, "record load failed");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    pub async fn load<S: CatalogSource>(&mut self, source: &S, id: RecordId) {
        let token = self.begin_load(id);
        let result = source.fetch_one(id).await;
        self.apply(token, result);
    }

    /// Id the next detail view should show after moving in `direction`.
    pub fn navigation_target(&self, direction: Direction) -> RecordId {
        navigate(self.current_id(), direction)
    }

    /// Moves one step in `direction` and loads the target. Returns the target id.
    pub async fn step<S: CatalogSource>(&mut self, source: &S, direction: Direction) -> RecordId {
        let target = self.navigation_target(direction);
        self.load(source, target).await;
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BrowserError;
    use crate::tests::common::RecordBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_list_session_is_loading() {
        let session = ListSession::new();
        assert_eq!(session.view(), ListView::Loading);
        assert!(session.visible().is_empty());
        assert!(session.type_options().is_empty());
    }

    #[test]
    fn test_list_failure_is_visible() {
        let mut session = ListSession::new();
        let token = session.begin_load();
        session.apply(token, Err(BrowserError::Transport("connection refused".into())));

        assert_eq!(
            session.view(),
            ListView::Failed("Transport error: connection refused")
        );
    }

    #[test]
    fn test_empty_index_is_no_data() {
        let mut session = ListSession::new();
        let token = session.begin_load();
        session.apply(token, Ok(vec![]));
        assert_eq!(session.view(), ListView::NoData);
    }

    #[test]
    fn test_filter_changes_are_reflected_immediately() {
        let mut session = ListSession::new();
        let token = session.begin_load();
        session.apply(
            token,
            Ok(vec![
                RecordBuilder::new(1, "Bulbizarre").with_types(&["Plante"]).build(),
                RecordBuilder::new(4, "Salamèche").with_types(&["Feu"]).build(),
            ]),
        );

        assert_eq!(session.visible().len(), 2);
        session.set_type_filter("Feu");
        assert_eq!(session.visible()[0].id, 4);
        session.set_search("zzz");
        assert_eq!(session.view(), ListView::NoMatches);
        session.set_filter(CatalogFilter::default());
        assert_eq!(session.type_options(), vec!["Plante", "Feu"]);
    }

    #[test]
    fn test_stale_list_result_is_dropped() {
        let mut session = ListSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.apply(second, Ok(vec![RecordBuilder::new(7, "Carapuce").build()])));
        assert!(!session.apply(first, Err(BrowserError::Transport("late".into()))));
        assert_eq!(session.visible()[0].id, 7);
    }

    #[test]
    fn test_claim_load_skips_in_flight_and_loaded() {
        let mut session = ListSession::new();
        let token = session.claim_load().unwrap();
        assert_eq!(session.claim_load(), None);

        session.apply(token, Ok(vec![RecordBuilder::new(1, "Bulbizarre").build()]));
        assert_eq!(session.claim_load(), None);
        assert_eq!(session.visible().len(), 1);
    }

    #[test]
    fn test_claim_load_retries_after_failure() {
        let mut session = ListSession::new();
        let first = session.claim_load().unwrap();
        session.apply(first, Err(BrowserError::Transport("timeout".into())));

        let second = session.claim_load().unwrap();
        assert!(second > first);
        assert!(session.state().is_loading());
        assert!(!session.apply(first, Ok(vec![])));
        assert!(session.apply(second, Ok(vec![])));
        assert_eq!(session.view(), ListView::NoData);
    }

    #[test]
    fn test_detail_navigation_uses_loaded_record() {
        let mut session = DetailSession::new(5);
        assert_eq!(session.current_id(), None);
        assert_eq!(session.navigation_target(Direction::Next), 1);

        let token = session.begin_load(5);
        session.apply(token, Ok(RecordBuilder::new(5, "Reptincel").build()));
        assert_eq!(session.navigation_target(Direction::Next), 6);
        assert_eq!(session.navigation_target(Direction::Previous), 4);
    }

    #[test]
    fn test_stale_detail_result_is_dropped() {
        let mut session = DetailSession::new(1);
        let old = session.begin_load(1);
        let new = session.begin_load(2);

        assert!(!session.apply(old, Ok(RecordBuilder::new(1, "Bulbizarre").build())));
        assert!(session.state().is_loading());
        assert!(session.apply(new, Ok(RecordBuilder::new(2, "Herbizarre").build())));
        assert_eq!(session.current_id(), Some(2));
        assert_eq!(session.requested(), 2);
    }
}
