use std::sync::Arc;

use async_trait::async_trait;
use provision_exec::executor::{Event, EventSink};

/// Prints one `[i/n]` line per step on stderr, around the step's own output.
pub struct ProgressEventSink {
    total_steps: usize,
}

impl ProgressEventSink {
    pub fn new(total_steps: usize) -> Self {
        Self { total_steps }
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::StepStarted { index, step_id, .. } => {
                eprintln!("==> [{}/{}] {}", index + 1, self.total_steps, step_id);
            }
            Event::StepFailed {
                index,
                step_id,
                exit_code,
                ..
            } => {
                eprintln!(
                    "==> [{}/{}] {} exited with status {}",
                    index + 1,
                    self.total_steps,
                    step_id,
                    exit_code
                );
            }
            _ => {}
        }
    }
}

pub struct CompositeProgressSink {
    progress: Arc<ProgressEventSink>,
    base: Arc<dyn EventSink>,
}

impl CompositeProgressSink {
    pub fn new(progress: Arc<ProgressEventSink>, base: Arc<dyn EventSink>) -> Self {
        Self { progress, base }
    }
}

#[async_trait]
impl EventSink for CompositeProgressSink {
    async fn emit(&self, event: Event) {
        self.progress.emit(event.clone()).await;
        self.base.emit(event).await;
    }
}
