use async_trait::async_trait;
use provision_core::StepKind;
use serde_json::json;
use uuid::Uuid;

use crate::executor::failure::FailureKind;
use crate::executor::types::RunStatus;

#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        step_count: usize,
    },
    RunFinished {
        run_id: Uuid,
        status: RunStatus,
    },
    StepStarted {
        run_id: Uuid,
        index: usize,
        step_id: String,
        kind: StepKind,
    },
    StepSucceeded {
        run_id: Uuid,
        index: usize,
        step_id: String,
        duration_ms: u64,
    },
    StepFailed {
        run_id: Uuid,
        index: usize,
        step_id: String,
        exit_code: i32,
        expected_exit_code: i32,
        failure: FailureKind,
    },
}

impl Event {
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::RunFinished { .. } => "run.finished",
            Event::StepStarted { .. } => "step.started",
            Event::StepSucceeded { .. } => "step.succeeded",
            Event::StepFailed { .. } => "step.failed",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let ty = self.type_name();
        match self {
            Event::RunStarted { run_id, step_count } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "step_count": step_count })
            }
            Event::RunFinished { run_id, status } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "status": status.as_str() })
            }
            Event::StepStarted { run_id, index, step_id, kind } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "index": index, "step_id": step_id, "kind": kind.as_str() })
            }
            Event::StepSucceeded { run_id, index, step_id, duration_ms } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "index": index, "step_id": step_id, "duration_ms": duration_ms })
            }
            Event::StepFailed { run_id, index, step_id, exit_code, expected_exit_code, failure } => {
                json!({
                    "type": ty,
                    "run_id": run_id.to_string(),
                    "index": index,
                    "step_id": step_id,
                    "exit_code": exit_code,
                    "expected_exit_code": expected_exit_code,
                    "failure": failure
                })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn with(mut self, sink: Box<dyn EventSink>) -> Self {
        self.add(sink);
        self
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

/// Routes run lifecycle events into `tracing`.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::RunStarted { run_id, step_count } => {
                tracing::info!(%run_id, step_count, "run started");
            }
            Event::RunFinished { run_id, status } => match status {
                RunStatus::Completed => tracing::info!(%run_id, status = status.as_str(), "run finished"),
                RunStatus::Failed => tracing::error!(%run_id, status = status.as_str(), "run finished"),
            },
            Event::StepStarted { index, step_id, kind, .. } => {
                tracing::info!(index, %step_id, %kind, "step started");
            }
            Event::StepSucceeded { index, step_id, duration_ms, .. } => {
                tracing::info!(index, %step_id, duration_ms, "step succeeded");
            }
            Event::StepFailed { index, step_id, exit_code, expected_exit_code, failure, .. } => {
                tracing::error!(
                    index,
                    %step_id,
                    exit_code,
                    expected_exit_code,
                    %failure,
                    "step failed"
                );
            }
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
