/// 変更レコードのファンアウト処理
///
/// DynamoDB Streamsのレコードを順に判定し、転送対象のレコードを
/// すべての送信先キューへ送信する。
///
/// # 処理フロー
/// 1. 呼び出し引数の検証（queues → event）
/// 2. レコードごとに転送判定（ChangeFilter）
/// 3. 転送対象はキューごとに送信タスクを起動（完了を待たずに次へ進む）
/// 4. 集計結果を返す
///
/// 送信失敗は件数として数えるのみで、再試行も呼び出し失敗への昇格もしない。
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::invocation_input::{decode_record, GateStop, InvocationInput};
use super::invocation_status::{InvocationOutcome, InvocationStatus, InvocationSummary};
use crate::domain::{AcceptedChange, ChangeFilter, OutboundMessage, SkipReason};
use crate::infrastructure::QueuePublisher;

/// 集計結果を返すタイミング
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryPolicy {
    /// すべての送信完了を待ってから集計する
    #[default]
    AwaitAll,
    /// レコードの走査が終わった時点で集計する（送信中の件数は含まれない）
    ReportImmediately,
}

impl SummaryPolicy {
    pub fn from_await_flag(await_dispatches: bool) -> Self {
        if await_dispatches {
            SummaryPolicy::AwaitAll
        } else {
            SummaryPolicy::ReportImmediately
        }
    }
}

/// ファンアウトハンドラー
pub struct FanoutHandler<P>
where
    P: QueuePublisher + 'static,
{
    /// キュー送信（送信タスク間で共有）
    publisher: Arc<P>,
    /// 転送判定
    filter: ChangeFilter,
    summary_policy: SummaryPolicy,
}

impl<P> FanoutHandler<P>
where
    P: QueuePublisher + 'static,
{
    /// 新しいFanoutHandlerを作成
    pub fn new(publisher: P, filter: ChangeFilter, summary_policy: SummaryPolicy) -> Self {
        Self {
            publisher: Arc::new(publisher),
            filter,
            summary_policy,
        }
    }

    /// 呼び出し引数を処理する
    ///
    /// # 引数
    /// * `payload` - `{ "queues": [...], "event": { "Records": [...] } }`
    ///
    /// # 戻り値
    /// 終了状態（形式エラー / 処理対象なし / 処理完了）
    pub async fn handle(&self, payload: Value) -> InvocationOutcome {
        match InvocationInput::from_payload(payload) {
            Ok(input) => self.process(input).await,
            Err(GateStop::Invalid(err)) => {
                warn!(error = %err, "呼び出し引数が不正");
                InvocationOutcome::Failed(err)
            }
            Err(GateStop::NothingToDo(message)) => {
                info!(detail = message, "処理対象なし");
                InvocationOutcome::NothingToDo(message.to_string())
            }
        }
    }

    /// 検証済みの引数を処理する
    pub async fn process(&self, input: InvocationInput) -> InvocationOutcome {
        let InvocationInput { queues, records } = input;
        let record_count = records.len();

        info!(
            record_count = record_count,
            queue_count = queues.len(),
            "DynamoDB Streamsイベント処理開始"
        );

        let status = Arc::new(InvocationStatus::new());
        let mut dispatches = JoinSet::new();
        let mut accepted_count = 0;
        let mut skip_count = 0;

        for (index, raw) in records.into_iter().enumerate() {
            match self.maybe_send(index, raw) {
                Some(change) => {
                    accepted_count += 1;
                    self.send(&queues, &change, &status, &mut dispatches);
                }
                None => skip_count += 1,
            }
        }

        match self.summary_policy {
            SummaryPolicy::AwaitAll => {
                while let Some(joined) = dispatches.join_next().await {
                    if let Err(err) = joined {
                        error!(error = %err, "送信タスクが異常終了");
                        status.record_failure();
                    }
                }
            }
            SummaryPolicy::ReportImmediately => {
                debug!(in_flight = dispatches.len(), "送信完了を待たずに集計");
                dispatches.detach_all();
            }
        }

        let summary = InvocationSummary {
            record_count,
            accepted_count,
            skip_count,
            status: status.snapshot(),
        };

        info!(
            record_count = summary.record_count,
            accepted_count = summary.accepted_count,
            skip_count = summary.skip_count,
            success_count = summary.status.successes,
            failure_count = summary.status.failures,
            "DynamoDB Streamsイベント処理完了"
        );

        InvocationOutcome::Completed(summary)
    }

    /// 1レコードを判定し、転送対象なら変更内容を返す
    ///
    /// スキップ理由はすべてログに残す。
    fn maybe_send(&self, index: usize, raw: Value) -> Option<AcceptedChange> {
        let record = match decode_record(raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(index = index, error = %err, "レコードのデコードに失敗 -- スキップ");
                return None;
            }
        };

        debug!(
            index = index,
            event_id = record.event_id.as_deref().unwrap_or_default(),
            event_name = record.event_name.as_deref().unwrap_or_default(),
            "レコードを判定"
        );

        match self.filter.evaluate(&record) {
            Ok(change) => {
                info!(
                    index = index,
                    identifier = %change.identifier,
                    "転送対象のレコード"
                );
                Some(change)
            }
            Err(reason) => {
                Self::log_skip(index, &reason);
                None
            }
        }
    }

    fn log_skip(index: usize, reason: &SkipReason) {
        match reason {
            SkipReason::ChecksumUnchanged => {
                info!(index = index, reason = %reason, "レコードをスキップ");
            }
            SkipReason::InvalidNewImage(missing) => {
                for field in missing {
                    info!(index = index, field = %field, "必須フィールドが欠損");
                }
                warn!(index = index, reason = %reason, "レコードをスキップ");
            }
            _ => {
                warn!(index = index, reason = %reason, "レコードをスキップ");
            }
        }
    }

    /// 全送信先キューへの送信タスクを起動する
    ///
    /// キュー間で重複排除はせず、同じ内容をそれぞれへ送る。
    fn send(
        &self,
        queues: &[String],
        change: &AcceptedChange,
        status: &Arc<InvocationStatus>,
        dispatches: &mut JoinSet<()>,
    ) {
        for queue_url in queues {
            let message = OutboundMessage::new(queue_url.as_str(), change);
            let publisher = Arc::clone(&self.publisher);
            let status = Arc::clone(status);

            debug!(
                queue_url = message.queue_url(),
                identifier = message.identifier().unwrap_or_default(),
                body_length = message.body().len(),
                "メッセージ送信"
            );

            dispatches.spawn(async move {
                match publisher.send_message(&message).await {
                    Ok(receipt) => {
                        status.record_success();
                        info!(
                            queue_url = %receipt.queue_url,
                            message_id = %receipt.message_id,
                            "メッセージ送信成功"
                        );
                    }
                    Err(err) => {
                        status.record_failure();
                        warn!(
                            queue_url = message.queue_url(),
                            error = %err,
                            "メッセージ送信失敗"
                        );
                    }
                }
            });
        }
    }
}
