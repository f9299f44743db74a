use crate::api::model::Faq;
use crate::api::{Client, ClientResult};
use crate::view::state::Phase;
use log::error;
use tokio::sync::Mutex;

pub const FAQ_FAILED: &str = "Gagal memuat FAQ";
pub const FAQ_TITLE: &str = "Punya Pertanyaan? Kita Punya Jawaban";

/// Static copy of the landing page hero.
pub struct Hero;

impl Hero {
    pub const TITLE: &'static str = "Buka Pintu Pendidikan Bersama Kami";
    pub const TAGLINE: &'static str = "Beasiswa untuk pelajar yang mempunyai semangat dalam menempuh pendidikan. Setiap kontribusi membuka masa depan.";
    pub const CALL_TO_ACTION: &'static str = "Berikan Donasi!";
    pub const CALL_TO_ACTION_HREF: &'static str = "/company-profile/donasi";
    pub const IMAGE: &'static str = "assets/image/hero/hero.png";
}

#[allow(async_fn_in_trait)]
pub trait FaqSource {
    async fn faqs(&self) -> ClientResult<Vec<Faq>>;
}

impl FaqSource for Client {
    async fn faqs(&self) -> ClientResult<Vec<Faq>> {
        Client::faqs(self).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqState {
    pub phase: Phase,
    pub faqs: Vec<Faq>,
    pub error: Option<String>,
}

/// Published FAQs for the landing page, with a retry on failure.
pub struct FaqSection<S> {
    source: S,
    state: Mutex<FaqState>,
}

impl<S: FaqSource> FaqSection<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(FaqState {
                phase: Phase::Idle,
                faqs: Vec::new(),
                error: None,
            }),
        }
    }

    pub async fn load(&self) {
        {
            let mut state = self.state.lock().await;
            state.phase = Phase::Loading;
            state.error = None;
        }
        let result = self.source.faqs().await;
        let mut state = self.state.lock().await;
        match result {
            Ok(faqs) => {
                state.faqs = faqs;
                state.phase = Phase::Ready;
            }
            Err(e) => {
                error!("Error fetching FAQs: {}", e);
                state.error = Some(FAQ_FAILED.to_string());
                state.phase = Phase::Error;
            }
        }
    }

    pub async fn retry(&self) {
        self.load().await
    }

    pub async fn snapshot(&self) -> FaqState {
        self.state.lock().await.clone()
    }
}
