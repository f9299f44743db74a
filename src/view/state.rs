use crate::api::model::Period;
use crate::applicant::filter::{filter, ALL_STATUSES};
use crate::applicant::{CanonicalApplicant, Stats};

pub const EMPTY_LIST: &str = "Belum ada data pendaftar";
pub const EMPTY_SEARCH: &str = "Tidak ada hasil pencarian";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Refreshing,
    Error,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub status: String,
    pub period_id: Option<u32>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: ALL_STATUSES.to_string(),
            period_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    /// `preview` is the list row, shown while the full record loads.
    Loading {
        id: String,
        preview: Option<CanonicalApplicant>,
    },
    Ready(CanonicalApplicant),
    Error {
        id: String,
        message: String,
    },
}

/// What the applicant table area shows. Header and filter controls render
/// in every case.
#[derive(Debug, PartialEq)]
pub enum TableView<'a> {
    Spinner,
    Failed { message: &'a str },
    Empty { message: &'static str },
    Rows(Vec<&'a CanonicalApplicant>),
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub phase: Phase,
    pub records: Vec<CanonicalApplicant>,
    pub error: Option<String>,
    pub filters: Filters,
    pub periods: Vec<Period>,
    pub stats: Stats,
    pub detail: DetailState,
    /// Row awaiting delete confirmation.
    pub pending_delete: Option<CanonicalApplicant>,
    /// `records` are development stand-ins, not backend data.
    pub placeholder: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            records: Vec::new(),
            error: None,
            filters: Filters::default(),
            periods: Vec::new(),
            stats: Stats::default(),
            detail: DetailState::Closed,
            pending_delete: None,
            placeholder: false,
        }
    }
}

impl ViewState {
    pub fn visible(&self) -> Vec<&CanonicalApplicant> {
        filter(&self.records, &self.filters.search, &self.filters.status)
    }

    pub fn selected(&self) -> Option<&CanonicalApplicant> {
        match &self.detail {
            DetailState::Loading { preview, .. } => preview.as_ref(),
            DetailState::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn table(&self) -> TableView<'_> {
        match self.phase {
            Phase::Idle | Phase::Loading => TableView::Spinner,
            Phase::Error => TableView::Failed {
                message: self.error.as_deref().unwrap_or_default(),
            },
            Phase::Ready | Phase::Refreshing => {
                let rows = self.visible();
                if !rows.is_empty() {
                    TableView::Rows(rows)
                } else if self.filters.search.is_empty() {
                    TableView::Empty { message: EMPTY_LIST }
                } else {
                    TableView::Empty {
                        message: EMPTY_SEARCH,
                    }
                }
            }
        }
    }

    pub fn can_retry(&self) -> bool {
        self.phase == Phase::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::normalize;
    use serde_json::json;

    #[test]
    fn table_follows_phase() {
        let mut state = ViewState::default();
        assert_eq!(state.table(), TableView::Spinner);

        state.phase = Phase::Ready;
        assert_eq!(state.table(), TableView::Empty { message: EMPTY_LIST });

        state.filters.search = "zz".to_string();
        assert_eq!(state.table(), TableView::Empty { message: EMPTY_SEARCH });

        state.records = vec![normalize(&json!({"id": 1, "user": {"name": "Ani"}}))];
        state.filters.search = "an".to_string();
        assert!(matches!(state.table(), TableView::Rows(rows) if rows.len() == 1));

        state.phase = Phase::Error;
        state.error = Some("Gagal".to_string());
        assert_eq!(state.table(), TableView::Failed { message: "Gagal" });
        assert!(state.can_retry());
    }
}
