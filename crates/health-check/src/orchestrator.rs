//! 동시 실행 오케스트레이터 -- 태스크 목록을 제한된 병렬도로 체크
//!
//! # 실행 모델
//!
//! ```text
//! submitter (task order)
//!   |-- acquire semaphore permit (max_workers)
//!   |-- tokio::spawn(timeout(task_timeout, checker.check(record)))
//!   |-- every `pause_every` submissions: sleep(pause)
//!
//! collector (task order)
//!   |-- await JoinHandle i --> Completed | TimedOut | Failed
//!   |-- ReportRow i
//! ```
//!
//! 완료 순서와 무관하게 결과 행은 항상 입력 순서를 따르며,
//! 한 태스크의 타임아웃/에러/패닉은 그 행에만 영향을 줍니다.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use heisenberg_core::metrics as m;

use crate::checker::PackageChecker;
use crate::config::OrchestratorConfig;
use crate::error::{HealthCheckError, TaskError};
use crate::links::CrossReferenceLinks;
use crate::report::ReportRow;
use crate::result::HealthCheckResult;
use crate::task::Task;

/// 태스크 종료 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Completed,
    TimedOut,
    Failed,
}

impl TaskState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
        }
    }
}

/// 태스크 실행 결과
enum TaskOutcome {
    Completed(HealthCheckResult),
    TimedOut,
    Failed(String),
}

/// 배치 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub completed: usize,
    pub timed_out: usize,
    pub failed: usize,
    pub elapsed_secs: f64,
}

impl BatchStats {
    fn record(&mut self, state: TaskState) {
        match state {
            TaskState::Completed => self.completed += 1,
            TaskState::TimedOut => self.timed_out += 1,
            TaskState::Failed => self.failed += 1,
        }
    }
}

/// 배치 실행 결과 (입력 순서의 행 + 통계)
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub rows: Vec<ReportRow>,
    pub stats: BatchStats,
}

/// 헬스 체크 오케스트레이터
pub struct HealthCheckOrchestrator<C: PackageChecker> {
    checker: Arc<C>,
    config: OrchestratorConfig,
}

impl<C: PackageChecker> HealthCheckOrchestrator<C> {
    /// 검증된 설정으로 오케스트레이터를 생성합니다.
    pub fn new(checker: C, config: OrchestratorConfig) -> Result<Self, HealthCheckError> {
        Self::with_shared(Arc::new(checker), config)
    }

    /// 이미 공유 중인 체커로 오케스트레이터를 생성합니다.
    pub fn with_shared(
        checker: Arc<C>,
        config: OrchestratorConfig,
    ) -> Result<Self, HealthCheckError> {
        config.validate()?;
        Ok(Self { checker, config })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// 태스크를 모두 실행하고 입력 순서대로 결과 행을 반환합니다.
    ///
    /// 반환되는 행 수는 항상 태스크 수와 같습니다.
    pub async fn run(&self, tasks: Vec<Task>) -> BatchReport {
        let started = Instant::now();
        let total = tasks.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_workers));
        let mut pending = Vec::with_capacity(total);

        info!(
            tasks = total,
            max_workers = self.config.max_workers,
            "health check batch started"
        );

        for (submitted, task) in tasks.into_iter().enumerate() {
            // 세마포어를 닫지 않으므로 실패하지 않음
            let permit = Arc::clone(&semaphore).acquire_owned().await.ok();

            counter!(
                m::CHECK_TASKS_SUBMITTED_TOTAL,
                m::LABEL_ECOSYSTEM => task.record.ecosystem().to_string()
            )
            .increment(1);
            debug!(index = task.index, package = %task.record, state = "queued", "task submitted");

            let checker = Arc::clone(&self.checker);
            let timeout = self.config.task_timeout;
            let record = task.record.clone();
            let index = task.index;
            let handle = tokio::spawn(async move {
                let _permit = permit;
                debug!(index, package = %record, state = "running", "task started");
                match tokio::time::timeout(timeout, checker.check(&record)).await {
                    Ok(Ok(result)) => TaskOutcome::Completed(result),
                    Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
                    Err(_) => TaskOutcome::TimedOut,
                }
            });
            pending.push((task, handle));

            let launched = submitted + 1;
            if self.config.pause_every > 0
                && launched % self.config.pause_every == 0
                && launched < total
                && !self.config.pause.is_zero()
            {
                debug!(launched, pause_ms = self.config.pause.as_millis() as u64, "pacing pause");
                tokio::time::sleep(self.config.pause).await;
            }
        }

        let mut stats = BatchStats {
            total,
            ..BatchStats::default()
        };
        let mut rows = Vec::with_capacity(total);

        for (task, handle) in pending {
            let outcome = handle
                .await
                .unwrap_or_else(|e| TaskOutcome::Failed(join_error_message(e)));
            let links = CrossReferenceLinks::for_package(
                task.record.ecosystem(),
                task.record.name(),
                task.record.version(),
            );

            let (state, result) = match outcome {
                TaskOutcome::Completed(result) => (TaskState::Completed, result),
                TaskOutcome::TimedOut => {
                    warn!(index = task.index, package = %task.record, "task timed out");
                    (TaskState::TimedOut, HealthCheckResult::timed_out(links))
                }
                TaskOutcome::Failed(msg) => {
                    warn!(index = task.index, package = %task.record, error = %msg, "task failed");
                    (TaskState::Failed, HealthCheckResult::failed(msg, links))
                }
            };

            match state {
                TaskState::Completed => counter!(m::CHECK_TASKS_COMPLETED_TOTAL).increment(1),
                TaskState::TimedOut => counter!(m::CHECK_TASKS_TIMED_OUT_TOTAL).increment(1),
                TaskState::Failed => counter!(m::CHECK_TASKS_FAILED_TOTAL).increment(1),
            }
            debug!(index = task.index, state = state.as_str(), "task finished");
            stats.record(state);

            rows.push(ReportRow {
                source: task.source,
                record: task.record,
                result,
            });
        }

        let elapsed = started.elapsed();
        stats.elapsed_secs = elapsed.as_secs_f64();
        histogram!(m::CHECK_BATCH_DURATION_SECONDS).record(elapsed.as_secs_f64());

        info!(
            total = stats.total,
            completed = stats.completed,
            timed_out = stats.timed_out,
            failed = stats.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "health check batch finished"
        );

        BatchReport { rows, stats }
    }
}

/// 패닉/취소된 태스크를 실패 메시지로 변환합니다.
fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_owned());
        TaskError::Internal(format!("check task panicked: {detail}")).to_string()
    } else {
        TaskError::Internal(format!("check task cancelled: {err}")).to_string()
    }
}
