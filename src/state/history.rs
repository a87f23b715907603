use crate::api::{AgentApi, ApiResult};
use crate::types::HistoryRecord;
use tracing::error;

pub const HISTORY_FAILED_MESSAGE: &str = "Failed to load chat history. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryPanelState {
    records: Vec<HistoryRecord>,
    loading: bool,
    error: Option<String>,
    requested: bool,
}

/// What the body of the history panel shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HistoryDisplay<'a> {
    Loading,
    Empty,
    Records(&'a [HistoryRecord]),
}

#[derive(Debug)]
#[must_use = "an admitted fetch must be run and finished"]
pub struct PendingFetch {
    _admitted: (),
}

impl PendingFetch {
    pub async fn run(self, api: &dyn AgentApi) -> ApiResult<Vec<HistoryRecord>> {
        let outcome = api.fetch_history().await;
        if let Err(err) = &outcome {
            error!("Error fetching chat history: {err}");
        }
        outcome
    }
}

impl HistoryPanelState {
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True until the first fetch has been started.
    pub fn needs_initial_fetch(&self) -> bool {
        !self.requested
    }

    pub fn can_refresh(&self) -> bool {
        !self.loading
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.loading { "Loading..." } else { "Refresh" }
    }

    pub fn display(&self) -> HistoryDisplay<'_> {
        if self.loading {
            HistoryDisplay::Loading
        } else if self.records.is_empty() {
            HistoryDisplay::Empty
        } else {
            HistoryDisplay::Records(&self.records)
        }
    }

    pub fn begin_fetch(&mut self) -> Option<PendingFetch> {
        if self.loading {
            return None;
        }
        self.requested = true;
        self.loading = true;
        self.error = None;
        Some(PendingFetch { _admitted: () })
    }

    /// Replace the list on success; on failure keep whatever was shown before.
    pub fn finish_fetch(&mut self, outcome: ApiResult<Vec<HistoryRecord>>) {
        match outcome {
            Ok(records) => self.records = records,
            Err(_) => self.error = Some(HISTORY_FAILED_MESSAGE.to_string()),
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn record(id: i64, message: &str) -> HistoryRecord {
        HistoryRecord {
            id,
            agent_id: Some(1),
            message: message.to_string(),
            response: format!("reply to {message}"),
            created_at: "2024-03-05T14:07:09".to_string(),
            metadata_info: None,
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "database is locked".to_string(),
        }
    }

    #[test]
    fn fresh_panel_wants_a_fetch() {
        let state = HistoryPanelState::default();
        assert!(state.needs_initial_fetch());
        assert_eq!(state.display(), HistoryDisplay::Empty);
        assert_eq!(state.refresh_label(), "Refresh");
    }

    #[test]
    fn loading_disables_refresh() {
        let mut state = HistoryPanelState::default();
        let _pending = state.begin_fetch().unwrap();
        assert!(!state.needs_initial_fetch());
        assert!(!state.can_refresh());
        assert_eq!(state.refresh_label(), "Loading...");
        assert_eq!(state.display(), HistoryDisplay::Loading);
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let mut state = HistoryPanelState::default();
        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Ok(Vec::new()));
        assert_eq!(state.display(), HistoryDisplay::Empty);
        assert!(state.can_refresh());
    }

    #[test]
    fn success_replaces_list_wholesale() {
        let mut state = HistoryPanelState::default();
        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Ok(vec![record(1, "a"), record(2, "b")]));

        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Ok(vec![record(3, "c")]));

        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].id, 3);
    }

    #[test]
    fn failure_keeps_previous_list() {
        let mut state = HistoryPanelState::default();
        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Ok(vec![record(2, "b"), record(1, "a")]));

        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Err(failure()));

        assert_eq!(state.error(), Some(HISTORY_FAILED_MESSAGE));
        assert!(!state.is_loading());
        match state.display() {
            HistoryDisplay::Records(records) => {
                let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![2, 1]);
            }
            other => panic!("expected records, got {other:?}"),
        }
    }

    #[test]
    fn refresh_clears_stale_error() {
        let mut state = HistoryPanelState::default();
        let _pending = state.begin_fetch().unwrap();
        state.finish_fetch(Err(failure()));
        let _pending = state.begin_fetch().unwrap();
        assert_eq!(state.error(), None);
    }
}
