use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use kanal::AsyncSender;
use glimpse_types::{AppEvent, PipelineOutcome};

/// Receives outcomes (interim and terminal) from pipeline runs.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    async fn present(&self, outcome: PipelineOutcome);
}

/// Monotonic run counter. Each gesture begins a new generation; only the
/// newest generation's outcomes may reach presentation.
#[derive(Default)]
pub struct GenerationGate {
    current: AtomicU64,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }
}

/// Drops outcomes from superseded generations before they reach the inner
/// sink. A slow translation finishing after a newer gesture lands here and
/// goes no further.
pub struct GuardedSink {
    gate: Arc<GenerationGate>,
    inner: Arc<dyn PresentationSink>,
}

impl GuardedSink {
    pub fn new(gate: Arc<GenerationGate>, inner: Arc<dyn PresentationSink>) -> Self {
        Self { gate, inner }
    }
}

#[async_trait]
impl PresentationSink for GuardedSink {
    async fn present(&self, outcome: PipelineOutcome) {
        if !self.gate.is_current(outcome.generation) {
            tracing::debug!(
                generation = outcome.generation,
                "dropped outcome from superseded run"
            );
            return;
        }
        self.inner.present(outcome).await;
    }
}

/// Forwards outcomes to the presenter loop over the app-to-ui channel.
pub struct ChannelSink {
    tx: AsyncSender<AppEvent>,
}

impl ChannelSink {
    pub fn new(tx: AsyncSender<AppEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl PresentationSink for ChannelSink {
    async fn present(&self, outcome: PipelineOutcome) {
        if self.tx.send(AppEvent::ShowOutcome(outcome)).await.is_err() {
            tracing::warn!("presenter channel closed, outcome dropped");
        }
    }
}
