use crate::api::model::Period;
use crate::api::{Client, ClientResult};
use crate::applicant::normalize::{normalize, normalize_all};
use crate::applicant::{CanonicalApplicant, Stats};
use crate::config::Config;
use crate::toast::Notifier;
use crate::view::state::{DetailState, Phase, ViewState};
use log::{debug, error, info, warn};
use serde_json::{json, Value};
use tokio::sync::{Mutex, MutexGuard};

pub const LIST_FAILED: &str = "Gagal memuat data pendaftar beasiswa";
pub const LIST_REFRESHED: &str = "Data berhasil diperbarui";
pub const PERIODS_FAILED: &str = "Gagal memuat data periode";
pub const DETAIL_FAILED: &str = "Gagal memuat detail pendaftar";
pub const DELETE_DONE: &str = "Data pendaftar berhasil dihapus";
pub const DELETE_FAILED: &str = "Gagal menghapus data pendaftar";

/// Where the admin page gets its applicant data from.
#[allow(async_fn_in_trait)]
pub trait ApplicantSource {
    async fn list(&self, period_id: Option<u32>) -> ClientResult<Vec<Value>>;
    async fn detail(&self, id: &str) -> ClientResult<Value>;
    async fn delete(&self, id: &str) -> ClientResult<()>;
    async fn periods(&self) -> ClientResult<Vec<Period>>;
}

impl ApplicantSource for Client {
    async fn list(&self, period_id: Option<u32>) -> ClientResult<Vec<Value>> {
        self.beswan_list(period_id).await
    }

    async fn detail(&self, id: &str) -> ClientResult<Value> {
        self.beswan(id).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.delete_beswan(id).await
    }

    async fn periods(&self) -> ClientResult<Vec<Period>> {
        self.beasiswa_periods().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    /// Table replaced by a spinner.
    Blocking,
    /// Previous rows stay on screen.
    Background,
}

struct Inner {
    view: ViewState,
    list_token: u64,
    detail_token: u64,
}

/// One per admin page. Every method takes `&self`; list, period and detail
/// fetches may overlap, and a list response only lands if no newer list
/// fetch was started after it.
pub struct ListController<S> {
    source: S,
    notifier: Notifier,
    mock_fallback: bool,
    inner: Mutex<Inner>,
}

impl<S: ApplicantSource> ListController<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_notifier(source, config, Notifier::new(config.toast_duration))
    }

    pub fn with_notifier(source: S, config: &Config, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            mock_fallback: config.mock_fallback && !config.is_production(),
            inner: Mutex::new(Inner {
                view: ViewState::default(),
                list_token: 0,
                detail_token: 0,
            }),
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn snapshot(&self) -> ViewState {
        self.inner.lock().await.view.clone()
    }

    async fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().await
    }

    /// Periods and the first page of applicants, fetched side by side.
    pub async fn mount(&self) {
        tokio::join!(self.load_periods(), self.load());
    }

    pub async fn load(&self) {
        self.fetch(Fetch::Blocking).await
    }

    pub async fn refresh(&self) {
        let mode = match self.lock().await.view.phase {
            Phase::Ready | Phase::Refreshing => Fetch::Background,
            _ => Fetch::Blocking,
        };
        self.fetch(mode).await
    }

    pub async fn retry(&self) {
        self.fetch(Fetch::Blocking).await
    }

    pub async fn select_period(&self, period_id: Option<u32>) {
        self.lock().await.view.filters.period_id = period_id;
        self.fetch(Fetch::Blocking).await
    }

    pub async fn set_search(&self, search: impl Into<String>) {
        self.lock().await.view.filters.search = search.into();
    }

    pub async fn set_status_filter(&self, status: impl Into<String>) {
        self.lock().await.view.filters.status = status.into();
    }

    pub async fn load_periods(&self) {
        match self.source.periods().await {
            Ok(periods) => {
                debug!("loaded {} periods", periods.len());
                self.lock().await.view.periods = periods;
            }
            Err(e) => {
                error!("Error fetching periods: {}", e);
                self.notifier.error(PERIODS_FAILED).await;
            }
        }
    }

    async fn fetch(&self, mode: Fetch) {
        let (token, period_id) = {
            let mut inner = self.lock().await;
            inner.list_token += 1;
            inner.view.phase = match mode {
                Fetch::Blocking => Phase::Loading,
                Fetch::Background => Phase::Refreshing,
            };
            (inner.list_token, inner.view.filters.period_id)
        };
        debug!("fetching applicants (period {:?}, request {})", period_id, token);

        let result = self.source.list(period_id).await;

        let mut inner = self.lock().await;
        if inner.list_token != token {
            debug!("dropping stale applicant response {} (current {})", token, inner.list_token);
            return;
        }
        match result {
            Ok(raw) => {
                let records = normalize_all(&raw);
                info!("loaded {} applicants", records.len());
                inner.view.stats = Stats::of(&records);
                inner.view.records = records;
                inner.view.error = None;
                inner.view.placeholder = false;
                inner.view.phase = Phase::Ready;
                drop(inner);
                if mode == Fetch::Background {
                    self.notifier.success(LIST_REFRESHED).await;
                }
            }
            Err(e) => {
                error!("Error fetching applicants: {}", e);
                if self.mock_fallback {
                    warn!("using placeholder applicants; backend unreachable");
                    let records = placeholder_records();
                    inner.view.stats = Stats::of(&records);
                    inner.view.records = records;
                    inner.view.error = None;
                    inner.view.placeholder = true;
                    inner.view.phase = Phase::Ready;
                } else {
                    inner.view.error = Some(LIST_FAILED.to_string());
                    inner.view.phase = Phase::Error;
                }
                drop(inner);
                self.notifier.error(LIST_FAILED).await;
            }
        }
    }

    /// Opens the detail surface at once with the list row as preview, then
    /// swaps in the full record.
    pub async fn view_detail(&self, id: &str) {
        let token = {
            let mut inner = self.lock().await;
            inner.detail_token += 1;
            let preview = inner.view.records.iter().find(|r| r.id == id).cloned();
            inner.view.detail = DetailState::Loading {
                id: id.to_string(),
                preview,
            };
            inner.detail_token
        };

        let result = self.source.detail(id).await;

        let mut inner = self.lock().await;
        if inner.detail_token != token {
            debug!("dropping stale detail response for {}", id);
            return;
        }
        match result {
            Ok(raw) => inner.view.detail = DetailState::Ready(normalize(&raw)),
            Err(e) => {
                error!("Error fetching applicant detail {}: {}", id, e);
                inner.view.detail = DetailState::Error {
                    id: id.to_string(),
                    message: e.to_string(),
                };
                drop(inner);
                self.notifier.error(DETAIL_FAILED).await;
            }
        }
    }

    pub async fn close_detail(&self) {
        let mut inner = self.lock().await;
        inner.detail_token += 1;
        inner.view.detail = DetailState::Closed;
    }

    /// Marks a row for deletion; nothing is sent until [`Self::confirm_delete`].
    pub async fn request_delete(&self, id: &str) -> bool {
        let mut inner = self.lock().await;
        let target = inner.view.records.iter().find(|r| r.id == id).cloned();
        let found = target.is_some();
        inner.view.pending_delete = target;
        found
    }

    pub async fn cancel_delete(&self) {
        self.lock().await.view.pending_delete = None;
    }

    pub async fn confirm_delete(&self) -> bool {
        let target = self.lock().await.view.pending_delete.as_ref().map(|r| r.id.clone());
        match target {
            Some(id) => self.delete(&id).await,
            None => false,
        }
    }

    /// Removes the row only once the backend has confirmed the delete.
    pub async fn delete(&self, id: &str) -> bool {
        match self.source.delete(id).await {
            Ok(()) => {
                {
                    let mut inner = self.lock().await;
                    inner.view.records.retain(|r| r.id != id);
                    inner.view.stats = Stats::of(&inner.view.records);
                    if inner.view.pending_delete.as_ref().is_some_and(|r| r.id == id) {
                        inner.view.pending_delete = None;
                    }
                    let open = match &inner.view.detail {
                        DetailState::Loading { id: open, .. } | DetailState::Error { id: open, .. } => {
                            open == id
                        }
                        DetailState::Ready(record) => record.id == id,
                        DetailState::Closed => false,
                    };
                    if open {
                        inner.detail_token += 1;
                        inner.view.detail = DetailState::Closed;
                    }
                }
                info!("deleted applicant {}", id);
                self.notifier.success(DELETE_DONE).await;
                true
            }
            Err(e) => {
                error!("Error deleting applicant {}: {}", id, e);
                self.notifier.error(DELETE_FAILED).await;
                false
            }
        }
    }
}

/// Development-only stand-in rows, used when the backend is unreachable and
/// the mock fallback is switched on.
fn placeholder_records() -> Vec<CanonicalApplicant> {
    vec![normalize(&json!({
        "id": 1,
        "user_id": 1,
        "user": { "id": 1, "name": "Test User", "email": "test@example.com" },
        "nama_panggilan": "Test",
        "jenis_kelamin": "Laki-laki",
        "tempat_lahir": "Jakarta",
        "tanggal_lahir": "2000-01-01",
        "agama": "Islam",
        "status": "pending",
    }))]
}
