//! SQS送信モジュール
//!
//! 変更レコードから構築したメッセージを送信先キューへ送る。
//! - QueuePublisher: 送信操作の抽象化（テスト用モックと差し替え可能）
//! - AwsSqsPublisher: AWS SDKによる実装

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use aws_sdk_sqs::types::MessageAttributeValue;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::OutboundMessage;

/// SQS送信のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PublishError {
    /// AWS SDK エラー
    #[error("AWS SQS APIエラー: {0}")]
    AwsSdkError(String),
    /// メッセージ属性の構築に失敗
    #[error("メッセージ構築エラー: {0}")]
    InvalidMessage(String),
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// 送信先キューURL
    pub queue_url: String,
    /// SQSが採番したメッセージID
    pub message_id: String,
}

impl SendReceipt {
    pub fn new(queue_url: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            message_id: message_id.into(),
        }
    }
}

/// キュー送信トレイト
///
/// 送信はレコード×キューの組ごとに独立したタスクから呼ばれるため、
/// 実装はスレッド間で共有できる必要がある。
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// メッセージを1件送信する
    ///
    /// # 戻り値
    /// * `Ok(SendReceipt)` - 送信成功
    /// * `Err(PublishError)` - 送信失敗（再試行はしない）
    async fn send_message(&self, message: &OutboundMessage) -> Result<SendReceipt, PublishError>;
}

/// 実際のAWS SQS SDKを使用した送信実装
#[derive(Debug, Clone)]
pub struct AwsSqsPublisher {
    client: SqsClient,
}

impl AwsSqsPublisher {
    /// 新しいAwsSqsPublisherを作成
    pub fn new(client: SqsClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = SqsClient::new(&config);
        Self::new(client)
    }

    fn build_attribute(
        data_type: &str,
        value: &str,
    ) -> Result<MessageAttributeValue, PublishError> {
        MessageAttributeValue::builder()
            .data_type(data_type)
            .string_value(value)
            .build()
            .map_err(|e| PublishError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl QueuePublisher for AwsSqsPublisher {
    async fn send_message(&self, message: &OutboundMessage) -> Result<SendReceipt, PublishError> {
        let mut request = self
            .client
            .send_message()
            .queue_url(message.queue_url())
            .message_body(message.encoded_body())
            .delay_seconds(message.delay_seconds());

        for (name, attribute) in message.attributes() {
            let value = Self::build_attribute(&attribute.data_type, &attribute.string_value)?;
            request = request.message_attributes(name.as_str(), value);
        }

        match request.send().await {
            Ok(response) => {
                let message_id = response.message_id().unwrap_or("unknown").to_string();
                debug!(
                    queue_url = message.queue_url(),
                    message_id = %message_id,
                    "SQS SendMessage成功"
                );
                Ok(SendReceipt::new(message.queue_url(), message_id))
            }
            Err(err) => {
                let service_error = err.into_service_error();
                warn!(
                    queue_url = message.queue_url(),
                    error = %service_error,
                    "SQS SendMessageエラー"
                );
                Err(PublishError::AwsSdkError(service_error.to_string()))
            }
        }
    }
}
