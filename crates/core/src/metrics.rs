//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더 설치는 바이너리의 몫이며, 설치되지 않으면 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `heisenberg_`
//! - 모듈명: `sbom_`, `check_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(heisenberg_core::metrics::CHECK_TASKS_COMPLETED_TOTAL).increment(1);
//! ```

use metrics::{describe_counter, describe_histogram};

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// SBOM 형식 레이블 키 (cyclonedx-json, spdx-xml, tabular, ...)
pub const LABEL_DIALECT: &str = "dialect";

/// 에코시스템 레이블 키 (npm, pypi, go)
pub const LABEL_ECOSYSTEM: &str = "ecosystem";

/// 시그널 소스 레이블 키
pub const LABEL_SOURCE: &str = "source";

// ─── SBOM 메트릭 ────────────────────────────────────────────────────

/// SBOM: 정규화된 문서 수 (counter, label: dialect)
pub const SBOM_DOCUMENTS_PARSED_TOTAL: &str = "heisenberg_sbom_documents_parsed_total";

/// SBOM: 생성된 패키지 레코드 수 (counter)
pub const SBOM_RECORDS_EMITTED_TOTAL: &str = "heisenberg_sbom_records_emitted_total";

/// SBOM: 이름/버전 누락으로 버려진 컴포넌트 수 (counter)
pub const SBOM_COMPONENTS_DROPPED_TOTAL: &str = "heisenberg_sbom_components_dropped_total";

// ─── Health Check 메트릭 ────────────────────────────────────────────

/// Check: 제출된 태스크 수 (counter, label: ecosystem)
pub const CHECK_TASKS_SUBMITTED_TOTAL: &str = "heisenberg_check_tasks_submitted_total";

/// Check: 정상 완료된 태스크 수 (counter)
pub const CHECK_TASKS_COMPLETED_TOTAL: &str = "heisenberg_check_tasks_completed_total";

/// Check: 타임아웃된 태스크 수 (counter)
pub const CHECK_TASKS_TIMED_OUT_TOTAL: &str = "heisenberg_check_tasks_timed_out_total";

/// Check: 실패한 태스크 수 (counter)
pub const CHECK_TASKS_FAILED_TOTAL: &str = "heisenberg_check_tasks_failed_total";

/// Check: 지원하지 않는 에코시스템으로 건너뛴 레코드 수 (counter)
pub const CHECK_TASKS_SKIPPED_TOTAL: &str = "heisenberg_check_tasks_skipped_total";

/// Check: 시그널 소스 요청 실패 수 (counter, label: source)
pub const CHECK_SIGNAL_FAILURES_TOTAL: &str = "heisenberg_check_signal_failures_total";

/// Check: 배치 실행 시간 (histogram, 초)
pub const CHECK_BATCH_DURATION_SECONDS: &str = "heisenberg_check_batch_duration_seconds";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다.
pub fn describe_all() {
    describe_counter!(
        SBOM_DOCUMENTS_PARSED_TOTAL,
        "Total number of SBOM documents normalized"
    );
    describe_counter!(
        SBOM_RECORDS_EMITTED_TOTAL,
        "Total number of package records emitted by the normalizer"
    );
    describe_counter!(
        SBOM_COMPONENTS_DROPPED_TOTAL,
        "Total number of components dropped for missing name or version"
    );

    describe_counter!(
        CHECK_TASKS_SUBMITTED_TOTAL,
        "Total number of health check tasks submitted"
    );
    describe_counter!(
        CHECK_TASKS_COMPLETED_TOTAL,
        "Total number of health check tasks completed"
    );
    describe_counter!(
        CHECK_TASKS_TIMED_OUT_TOTAL,
        "Total number of health check tasks that timed out"
    );
    describe_counter!(
        CHECK_TASKS_FAILED_TOTAL,
        "Total number of health check tasks that failed"
    );
    describe_counter!(
        CHECK_TASKS_SKIPPED_TOTAL,
        "Total number of records skipped for unsupported ecosystems"
    );
    describe_counter!(
        CHECK_SIGNAL_FAILURES_TOTAL,
        "Total number of failed signal source requests"
    );
    describe_histogram!(
        CHECK_BATCH_DURATION_SECONDS,
        "Wall-clock duration of a health check batch in seconds"
    );
}
