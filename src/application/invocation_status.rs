/// 呼び出し単位の送信結果集計
///
/// 送信タスクは任意の順序・任意のスレッドで完了するため、カウンターはアトミックに更新する。
use std::sync::atomic::{AtomicUsize, Ordering};

use super::invocation_input::InputError;

/// 送信成功/失敗カウンター
#[derive(Debug, Default)]
pub struct InvocationStatus {
    successes: AtomicUsize,
    failures: AtomicUsize,
}

impl InvocationStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    /// 現時点のカウント
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            successes: self.successes.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    pub successes: usize,
    pub failures: usize,
}

/// 1回の呼び出しの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSummary {
    /// 入力レコード数
    pub record_count: usize,
    /// 転送対象になったレコード数
    pub accepted_count: usize,
    /// スキップしたレコード数
    pub skip_count: usize,
    /// 送信の成功/失敗件数（集計方針によっては未確定）
    pub status: StatusSnapshot,
}

impl InvocationSummary {
    /// 呼び出し結果として返すメッセージ
    pub fn message(&self) -> String {
        format!(
            "Tried to send {}. Successes: {}. Failures: {}.",
            self.record_count, self.status.successes, self.status.failures
        )
    }
}

/// 呼び出しの終了状態
///
/// 1回の呼び出しにつき必ずいずれか1つで終わる。
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// 引数の形式エラー
    Failed(InputError),
    /// 空入力（成功）
    NothingToDo(String),
    /// レコードを処理した（成功）
    Completed(InvocationSummary),
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, InvocationOutcome::Failed(_))
    }

    /// 呼び出し結果のメッセージ
    pub fn message(&self) -> String {
        match self {
            InvocationOutcome::Failed(err) => err.to_string(),
            InvocationOutcome::NothingToDo(message) => message.clone(),
            InvocationOutcome::Completed(summary) => summary.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_status_counts() {
        let status = InvocationStatus::new();
        status.record_success();
        status.record_success();
        status.record_failure();

        assert_eq!(
            status.snapshot(),
            StatusSnapshot {
                successes: 2,
                failures: 1
            }
        );
    }

    #[test]
    fn test_status_concurrent_updates() {
        let status = Arc::new(InvocationStatus::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let status = Arc::clone(&status);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        if i % 2 == 0 {
                            status.record_success();
                        } else {
                            status.record_failure();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = status.snapshot();
        assert_eq!(snapshot.successes, 4000);
        assert_eq!(snapshot.failures, 4000);
    }

    #[test]
    fn test_summary_message() {
        let summary = InvocationSummary {
            record_count: 3,
            accepted_count: 1,
            skip_count: 2,
            status: StatusSnapshot {
                successes: 2,
                failures: 0,
            },
        };

        assert_eq!(summary.message(), "Tried to send 3. Successes: 2. Failures: 0.");
    }

    #[test]
    fn test_outcome_message() {
        let failed = InvocationOutcome::Failed(InputError::EventMissing);
        assert!(!failed.is_success());
        assert_eq!(failed.message(), "`event` is null");

        let nothing = InvocationOutcome::NothingToDo("nothing".to_string());
        assert!(nothing.is_success());
        assert_eq!(nothing.message(), "nothing");
    }
}
