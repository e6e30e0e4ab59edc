//! Heisenberg 의존성 헬스 체크
//!
//! 정규화된 [`PackageRecord`](heisenberg_core::PackageRecord)마다 외부 시그널 소스를 조회하여
//! 유지보수/보안/인기도 지표와 커스텀 점수를 계산하고 CSV 리포트로 출력합니다.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`HealthCheckError`, `TaskError`)
//! - [`config`]: Orchestrator and source configuration (`from_core`, builders)
//! - [`signal`]: External signal sources (`SignalFetcher` trait, deps.dev, GitHub, npm, PyPI)
//! - [`checker`]: Per-package check routine (`PackageChecker` trait, `HealthChecker`)
//! - [`score`]: Custom health score
//! - [`freshness`]: Publish freshness flag
//! - [`links`]: Cross-reference links
//! - [`result`]: Result model with sentinel values (`FieldValue`, `HealthCheckResult`)
//! - [`task`]: Task construction (`TaskQueue`)
//! - [`orchestrator`]: Bounded concurrent execution (`HealthCheckOrchestrator`)
//! - [`report`]: CSV report emission
//!
//! # Architecture
//!
//! ```text
//! Vec<PackageRecord> --> TaskQueue --> HealthCheckOrchestrator --(W permits)--> HealthChecker
//!                                               |                                   |
//!                                               |                       SignalFetcher x N
//!                                               |                                   |
//!                                      BatchReport (ordered) <-- HealthCheckResult -+
//!                                               |
//!                                         ReportWriter (CSV)
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod freshness;
pub mod links;
pub mod orchestrator;
pub mod report;
pub mod result;
pub mod score;
pub mod signal;
pub mod task;

// --- Public API Re-exports ---

// Orchestrator (main entry point)
pub use orchestrator::{BatchReport, BatchStats, HealthCheckOrchestrator};

// Checker
pub use checker::{HealthChecker, PackageChecker};

// Configuration
pub use config::{OrchestratorConfig, OrchestratorConfigBuilder, SourceConfig};

// Error
pub use error::{HealthCheckError, TaskError};

// Result
pub use freshness::Freshness;
pub use links::CrossReferenceLinks;
pub use result::{Deprecation, FieldValue, HealthCheckResult};
pub use score::{CustomScore, ScoreInputs, compute_custom_score};

// Signal
pub use signal::{
    BoxFuture, DynSignalFetcher, Presence, SignalFetcher, SignalRequest, SignalResult,
};

// Task
pub use task::{Task, TaskQueue, build_tasks};

// Report
pub use report::{REPORT_HEADER, ReportRow, ReportWriter, dedupe_rows, write_table};
