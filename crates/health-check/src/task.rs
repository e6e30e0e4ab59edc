//! 체크 태스크 구성
//!
//! 정규화된 레코드를 출처(저장소/벤더 이름)와 묶어 제출 순서 번호를 매깁니다.
//! 체커가 지원하지 않는 에코시스템의 레코드는 경고와 함께 건너뜁니다.

use metrics::counter;
use tracing::warn;

use heisenberg_core::metrics as m;
use heisenberg_core::types::PackageRecord;

/// 체크 태스크 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// 제출 순서 (0부터)
    pub index: usize,
    /// 출처 식별자 (리포트의 `repo_name` 열)
    pub source: String,
    pub record: PackageRecord,
}

/// 여러 출처의 레코드를 하나의 배치로 모읍니다.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    skipped: usize,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 출처 하나의 레코드를 추가하고, 추가된 태스크 수를 반환합니다.
    pub fn extend(
        &mut self,
        source: &str,
        records: impl IntoIterator<Item = PackageRecord>,
    ) -> usize {
        let before = self.tasks.len();
        for record in records {
            if !record.ecosystem().is_checkable() {
                warn!(
                    source,
                    package = record.name(),
                    ecosystem = %record.ecosystem(),
                    "unsupported ecosystem, skipping"
                );
                counter!(m::CHECK_TASKS_SKIPPED_TOTAL).increment(1);
                self.skipped += 1;
                continue;
            }
            self.tasks.push(Task {
                index: self.tasks.len(),
                source: source.to_owned(),
                record,
            });
        }
        self.tasks.len() - before
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 건너뛴 레코드 수
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

/// 출처 하나의 레코드로 태스크 목록을 만듭니다.
///
/// 반환값: (태스크, 건너뛴 레코드 수)
pub fn build_tasks(
    source: &str,
    records: impl IntoIterator<Item = PackageRecord>,
) -> (Vec<Task>, usize) {
    let mut queue = TaskQueue::new();
    queue.extend(source, records);
    let skipped = queue.skipped();
    (queue.into_tasks(), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heisenberg_core::types::Ecosystem;

    fn record(name: &str, eco: Ecosystem) -> PackageRecord {
        PackageRecord::new(name, "1.0.0", eco, "").unwrap()
    }

    #[test]
    fn unsupported_ecosystems_are_skipped() {
        let (tasks, skipped) = build_tasks(
            "web",
            vec![
                record("a", Ecosystem::Npm),
                record("b", Ecosystem::Other("maven".to_owned())),
                record("c", Ecosystem::Unknown),
                record("d", Ecosystem::Go),
            ],
        );
        assert_eq!(skipped, 2);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].record.name(), "a");
        assert_eq!(tasks[1].record.name(), "d");
        assert_eq!(tasks[1].index, 1);
    }

    #[test]
    fn queue_numbers_across_sources() {
        let mut queue = TaskQueue::new();
        assert_eq!(queue.extend("repo-a", vec![record("a", Ecosystem::Npm)]), 1);
        assert_eq!(
            queue.extend(
                "repo-b",
                vec![record("b", Ecosystem::PyPI), record("c", Ecosystem::PyPI)]
            ),
            2
        );
        let tasks = queue.into_tasks();
        let indices: Vec<usize> = tasks.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(tasks[2].source, "repo-b");
    }
}
