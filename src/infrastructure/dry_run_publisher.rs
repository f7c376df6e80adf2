/// ドライラン用のキュー送信
///
/// SQSを呼ばずに送信内容をログへ出力し、常に成功として扱う。
/// replayコマンドの`--dry-run`で使用する。
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use super::sqs_publisher::{PublishError, QueuePublisher, SendReceipt};
use crate::domain::OutboundMessage;

#[derive(Debug, Default)]
pub struct DryRunPublisher {
    sequence: AtomicUsize,
}

impl DryRunPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueuePublisher for DryRunPublisher {
    async fn send_message(&self, message: &OutboundMessage) -> Result<SendReceipt, PublishError> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            queue_url = message.queue_url(),
            identifier = message.identifier().unwrap_or_default(),
            base_url = message.base_url().unwrap_or_default(),
            body_length = message.body().len(),
            delay_seconds = message.delay_seconds(),
            "ドライラン: メッセージ送信をスキップ"
        );

        Ok(SendReceipt::new(
            message.queue_url(),
            format!("dry-run-{}", sequence),
        ))
    }
}
