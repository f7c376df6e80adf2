/// トリガーハンドラー設定
///
/// 送信先キューは呼び出し引数で渡されるため、環境変数で持つのは
/// 判定と集計の挙動のみ。
use thiserror::Error;

use crate::domain::DYNAMODB_EVENT_SOURCE;

/// 受け付けるeventSource
const EXPECTED_EVENT_SOURCE_VAR: &str = "EXPECTED_EVENT_SOURCE";
/// 送信完了を待ってから集計結果を返すか
const AWAIT_DISPATCHES_VAR: &str = "AWAIT_DISPATCHES";

/// 設定のエラー型
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("環境変数の値が不正です: {name}={value}")]
    InvalidEnvVar { name: String, value: String },
}

/// トリガーハンドラー設定
///
/// 以下の環境変数から読み込む（いずれも省略可）:
/// - EXPECTED_EVENT_SOURCE: 受け付けるeventSource（デフォルト: aws:dynamodb）
/// - AWAIT_DISPATCHES: true/false（デフォルト: true）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    expected_event_source: String,
    await_dispatches: bool,
}

impl HandlerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// AWAIT_DISPATCHESが真偽値として解釈できない場合
    pub fn from_env() -> Result<Self, ConfigError> {
        let expected_event_source = std::env::var(EXPECTED_EVENT_SOURCE_VAR)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DYNAMODB_EVENT_SOURCE.to_string());

        let await_dispatches = match std::env::var(AWAIT_DISPATCHES_VAR) {
            Ok(value) => parse_bool(AWAIT_DISPATCHES_VAR, &value)?,
            Err(_) => true,
        };

        Ok(Self {
            expected_event_source,
            await_dispatches,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(expected_event_source: impl Into<String>, await_dispatches: bool) -> Self {
        Self {
            expected_event_source: expected_event_source.into(),
            await_dispatches,
        }
    }

    pub fn expected_event_source(&self) -> &str {
        &self.expected_event_source
    }

    pub fn await_dispatches(&self) -> bool {
        self.await_dispatches
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::new(DYNAMODB_EVENT_SOURCE, true)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
