use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Default)]
struct Slot {
    current: Option<Toast>,
    generation: u64,
}

/// Single-slot toast. A new toast replaces the visible one and restarts the
/// dismissal timer; an older timer never hides a newer toast.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    lifetime: Duration,
}

impl Notifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            lifetime,
        }
    }

    pub async fn notify(&self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        debug!("toast {:?}: {}", toast.kind, toast.message);
        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.current = Some(toast);
            slot.generation
        };

        let slot = self.slot.clone();
        let lifetime = self.lifetime;
        tokio::spawn(async move {
            time::sleep(lifetime).await;
            let mut slot = slot.lock().await;
            if slot.generation == generation {
                slot.current = None;
            }
        });
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.notify(message, ToastKind::Success).await
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.notify(message, ToastKind::Error).await
    }

    pub async fn current(&self) -> Option<Toast> {
        self.slot.lock().await.current.clone()
    }

    pub async fn dismiss(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFETIME: Duration = Duration::from_millis(5000);

    async fn message(n: &Notifier) -> Option<String> {
        n.current().await.map(|t| t.message)
    }

    #[tokio::test(start_paused = true)]
    async fn hides_after_lifetime() {
        let n = Notifier::new(LIFETIME);
        n.success("Data berhasil diperbarui").await;
        time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(message(&n).await.as_deref(), Some("Data berhasil diperbarui"));
        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(n.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_toast_restarts_timer() {
        let n = Notifier::new(LIFETIME);
        n.success("A").await;
        time::sleep(Duration::from_millis(3000)).await;
        n.error("B").await;

        // A's timer fires at 5000 and must leave B alone.
        time::sleep(Duration::from_millis(2500)).await;
        let toast = n.current().await.unwrap();
        assert_eq!(toast.message, "B");
        assert_eq!(toast.kind, ToastKind::Error);

        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(n.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_clears_immediately() {
        let n = Notifier::new(LIFETIME);
        n.success("A").await;
        n.dismiss().await;
        assert_eq!(n.current().await, None);
    }
}
