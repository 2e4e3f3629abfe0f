// src/widget/status.rs
use crate::client::HealthClient;
use crate::model::StatusViewModel;
use crate::render::RenderTarget;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

/// What became of one `fetch_health` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was rendered.
    Applied(StatusViewModel),
    /// A newer invocation started while this one was in flight; its result
    /// was discarded unrendered.
    Superseded,
}

/// The whole system: one health client, one render target, one behavior.
///
/// Overlapping invocations are resolved with a generation counter rather
/// than last-response-wins: only the most recently started fetch may render
/// its result.
pub struct StatusWidget<R: RenderTarget> {
    client: HealthClient,
    target: R,
    generation: AtomicU64,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl<R: RenderTarget> StatusWidget<R> {
    pub fn new(client: HealthClient, target: R) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            client,
            target,
            generation: AtomicU64::new(0),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// One check: render the in-flight state, issue the GET, render the
    /// outcome. Errors never escape; all three kinds (network, HTTP status,
    /// parse) collapse into the Bad view model.
    pub async fn fetch_health(&self) -> FetchOutcome {
        let generation = self.begin_generation();

        // The checking state goes out before the request is issued.
        self.target.render(&StatusViewModel::checking());

        let result = self.client.fetch().await;

        if !self.is_current(generation) {
            debug!(generation, "discarding superseded health response");
            return FetchOutcome::Superseded;
        }

        let vm = match result {
            Ok(health) => {
                debug!(?health, endpoint = %self.client.endpoint(), "health check ok");
                StatusViewModel::healthy(health)
            }
            Err(error) => {
                warn!(%error, endpoint = %self.client.endpoint(), "health check failed");
                StatusViewModel::failed(&error)
            }
        }
        .stamp(Utc::now());

        self.target.render(&vm);
        FetchOutcome::Applied(vm)
    }

    fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Auto refresh: one check immediately, then one per tick until shutdown.
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = interval(period);
        let mut shutdown_rx = self.shutdown_rx.clone();

        info!("Starting auto refresh with interval: {:?}", period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.fetch_health().await;
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Auto refresh shutting down");
                        break;
                    }
                }
            }
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PillState;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use url::Url;

    #[derive(Default)]
    struct RecordingTarget {
        frames: Mutex<Vec<StatusViewModel>>,
    }

    impl RecordingTarget {
        fn frames(&self) -> Vec<StatusViewModel> {
            self.frames.lock().unwrap().clone()
        }
    }

    impl RenderTarget for RecordingTarget {
        fn render(&self, vm: &StatusViewModel) {
            self.frames.lock().unwrap().push(vm.clone());
        }
    }

    fn widget_for(url: &str) -> (Arc<StatusWidget<Arc<RecordingTarget>>>, Arc<RecordingTarget>) {
        let target = Arc::new(RecordingTarget::default());
        let client = HealthClient::new(Url::parse(url).unwrap(), Duration::from_secs(2));
        (
            Arc::new(StatusWidget::new(client, target.clone())),
            target,
        )
    }

    #[tokio::test]
    async fn renders_checking_before_the_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status":"ok","service":"reckoning-machine"}"#)
            .create_async()
            .await;

        let (widget, target) = widget_for(&format!("{}/health", server.url()));
        widget.fetch_health().await;

        let frames = target.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].pill, PillState::Unknown);
        assert_eq!(frames[0].status_text(), "checking...");
        assert_eq!(frames[1].pill, PillState::Ok);
        assert_eq!(frames[1].status_text(), "ok");
        assert_eq!(frames[1].service_text(), "reckoning-machine");
        assert!(frames[1].checked_at.is_some());
    }

    #[tokio::test]
    async fn http_failure_renders_the_bad_pill() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let (widget, target) = widget_for(&format!("{}/health", server.url()));
        let outcome = widget.fetch_health().await;

        let frames = target.frames();
        assert_eq!(frames[1].pill, PillState::Bad);
        assert_eq!(frames[1].status_text(), "error");
        assert_eq!(frames[1].service_text(), "—");
        assert_eq!(frames[1].error.as_deref(), Some("HTTP 500"));
        assert!(matches!(outcome, FetchOutcome::Applied(_)));
    }

    #[tokio::test]
    async fn network_failure_renders_the_bad_pill() {
        let (widget, target) = widget_for("http://127.0.0.1:9/health");
        widget.fetch_health().await;

        let frames = target.frames();
        assert_eq!(frames[1].pill, PillState::Bad);
        assert!(frames[1].error.is_some());
    }

    #[tokio::test]
    async fn stale_generation_is_not_current() {
        let (widget, _target) = widget_for("http://127.0.0.1:9/health");

        let first = widget.begin_generation();
        let second = widget.begin_generation();

        assert!(!widget.is_current(first));
        assert!(widget.is_current(second));
    }

    #[tokio::test]
    async fn superseded_fetch_is_discarded() {
        // A hand-rolled server that holds the response until after a newer
        // invocation has started.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = sock.read(&mut buf).await;
            tokio::time::sleep(Duration::from_millis(200)).await;

            let body = r#"{"status":"ok","service":"reckoning-machine"}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
                body.len(),
                body,
            );
            let _ = sock.write_all(response.as_bytes()).await;
        });

        let (widget, target) = widget_for(&format!("http://{}/health", addr));

        let slow = tokio::spawn({
            let widget = widget.clone();
            async move { widget.fetch_health().await }
        });

        // Let the slow fetch get in flight, then start a newer generation.
        tokio::time::sleep(Duration::from_millis(50)).await;
        widget.begin_generation();

        assert_eq!(slow.await.unwrap(), FetchOutcome::Superseded);

        // Only the checking frame was rendered; the stale result never was.
        let frames = target.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].pill, PillState::Unknown);
    }
}
