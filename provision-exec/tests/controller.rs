use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use provision_core::{builtin_manifest, ProvisioningStep, StepKind};
use provision_exec::executor::{
    Event, EventSink, FailureKind, NoOpEventSink, RunStatus, StepExecutor,
};
use provision_exec::{FailFastController, RunResult};

/// Records invocation order and returns scripted exit codes (0 unless overridden).
#[derive(Default)]
struct RecordingExecutor {
    exit_codes: HashMap<String, i32>,
    invoked: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    fn failing(step_id: &str, code: i32) -> Self {
        let mut exit_codes = HashMap::new();
        exit_codes.insert(step_id.to_string(), code);
        Self {
            exit_codes,
            invoked: Mutex::new(Vec::new()),
        }
    }

    fn invoked(&self) -> Vec<String> {
        self.invoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepExecutor for RecordingExecutor {
    async fn run(&self, index: usize, step: &ProvisioningStep) -> RunResult {
        self.invoked.lock().unwrap().push(step.id.clone());
        let exit_code = self.exit_codes.get(&step.id).copied().unwrap_or(0);
        RunResult {
            step_index: index,
            step_id: step.id.clone(),
            exit_code,
            succeeded: step.accepts_exit_code(exit_code),
            duration_ms: 0,
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event.type_name().to_string());
    }
}

fn ros_steps() -> Vec<ProvisioningStep> {
    builtin_manifest().unwrap().steps
}

fn controller(executor: Arc<RecordingExecutor>) -> FailFastController {
    FailFastController::new(executor, Arc::new(NoOpEventSink))
}

#[tokio::test]
async fn all_steps_succeed() {
    let steps = ros_steps();
    let executor = Arc::new(RecordingExecutor::default());
    let outcome = controller(executor.clone()).execute(&steps).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.steps_succeeded(), steps.len());
    assert!(outcome.failed.is_none());

    let expected: Vec<String> = steps.iter().map(|s| s.id.clone()).collect();
    assert_eq!(executor.invoked(), expected);
}

#[tokio::test]
async fn key_registration_failure_stops_before_any_install() {
    let steps = ros_steps();
    let executor = Arc::new(RecordingExecutor::failing("ros-apt-key", 2));
    let outcome = controller(executor.clone()).execute(&steps).await.unwrap();

    assert_eq!(executor.invoked(), vec!["ros-apt-key".to_string()]);
    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(outcome.exit_code(), 2);

    let failed = outcome.failed.unwrap();
    assert_eq!(failed.index, 0);
    assert_eq!(failed.failure, FailureKind::KeyRegistrationFailure);
}

#[tokio::test]
async fn unresolvable_pin_stops_before_remote_fetch_and_bootstrap() {
    let steps = ros_steps();
    let executor = Arc::new(RecordingExecutor::failing("ros-packages", 100));
    let outcome = controller(executor.clone()).execute(&steps).await.unwrap();

    let invoked = executor.invoked();
    assert_eq!(invoked.last().map(String::as_str), Some("ros-packages"));
    assert!(!invoked.iter().any(|id| id == "catkin-tools"));
    assert!(!invoked.iter().any(|id| id.starts_with("rosdep")));

    assert_eq!(outcome.exit_code(), 100);
    assert_eq!(
        outcome.failed.unwrap().failure,
        FailureKind::PackageResolutionFailure
    );
}

#[tokio::test]
async fn bootstrap_init_failure_never_runs_update() {
    let steps = ros_steps();
    let executor = Arc::new(RecordingExecutor::failing("rosdep-init", 1));
    let outcome = controller(executor.clone()).execute(&steps).await.unwrap();

    let invoked = executor.invoked();
    assert_eq!(invoked.last().map(String::as_str), Some("rosdep-init"));
    assert!(!invoked.iter().any(|id| id == "rosdep-update"));
    assert_eq!(outcome.results.len(), steps.len() - 1);
    assert_eq!(outcome.steps_succeeded(), steps.len() - 2);

    let failed = outcome.failed.unwrap();
    assert_eq!(failed.step_id, "rosdep-init");
    assert_eq!(failed.failure, FailureKind::BootstrapFailure);
}

#[tokio::test]
async fn failure_at_every_position_stops_the_run_there() {
    let steps = ros_steps();
    for (k, step) in steps.iter().enumerate() {
        let executor = Arc::new(RecordingExecutor::failing(&step.id, 3));
        let outcome = controller(executor.clone()).execute(&steps).await.unwrap();

        let expected: Vec<String> = steps[..=k].iter().map(|s| s.id.clone()).collect();
        assert_eq!(executor.invoked(), expected, "failing step {k}");
        assert_eq!(outcome.failed.unwrap().index, k);
    }
}

#[tokio::test]
async fn any_unexpected_code_is_a_failure() {
    for code in [1, 2, 127, 255, -1] {
        let steps = vec![ProvisioningStep::new("only", "tool", ["x"])];
        let executor = Arc::new(RecordingExecutor::failing("only", code));
        let outcome = controller(executor).execute(&steps).await.unwrap();
        assert!(!outcome.is_success(), "code {code}");
        assert_ne!(outcome.exit_code(), 0);
    }
}

#[tokio::test]
async fn expected_non_zero_code_succeeds_and_zero_fails() {
    let steps = vec![
        ProvisioningStep::new("lookup", "grep", ["-q", "absent", "/dev/null"])
            .with_expected_exit_code(1),
    ];

    let executor = Arc::new(RecordingExecutor::failing("lookup", 1));
    let outcome = controller(executor).execute(&steps).await.unwrap();
    assert!(outcome.is_success());

    let executor = Arc::new(RecordingExecutor::default());
    let outcome = controller(executor).execute(&steps).await.unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.failed.as_ref().unwrap().exit_code, 0);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.failed.unwrap().failure,
        FailureKind::CommandFailure
    );
}

#[tokio::test]
async fn empty_step_list_completes() {
    let executor = Arc::new(RecordingExecutor::default());
    let outcome = controller(executor.clone()).execute(&[]).await.unwrap();
    assert!(outcome.is_success());
    assert!(outcome.results.is_empty());
    assert!(executor.invoked().is_empty());
}

#[tokio::test]
async fn events_follow_the_run_lifecycle() {
    let steps = vec![
        ProvisioningStep::new("a", "tool", Vec::<String>::new()),
        ProvisioningStep::new("b", "tool", Vec::<String>::new()).with_kind(StepKind::Bootstrap),
        ProvisioningStep::new("c", "tool", Vec::<String>::new()),
    ];
    let executor = Arc::new(RecordingExecutor::failing("b", 1));
    let sink = Arc::new(RecordingSink::default());
    let controller = FailFastController::new(executor, sink.clone());
    controller.execute(&steps).await.unwrap();

    assert_eq!(
        *sink.events.lock().unwrap(),
        vec![
            "run.started",
            "step.started",
            "step.succeeded",
            "step.started",
            "step.failed",
            "run.finished",
        ]
    );
}
