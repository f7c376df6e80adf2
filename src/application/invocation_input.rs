/// 呼び出し引数の検証
///
/// `{ "queues": [...], "event": { "Records": [...] } }` 形式の引数を検証する。
/// queues → event の順にゲートを評価し、最初に止まったゲートで処理を打ち切る。
use serde_json::Value;
use thiserror::Error;

use crate::domain::ChangeRecord;

/// 引数の形式エラー（呼び出し全体の失敗）
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("`queues` is null")]
    QueuesMissing,

    #[error("`queues` is not an array: {0}")]
    QueuesNotArray(Value),

    #[error("`queues[{index}]` is not a string: {value}")]
    QueueNotString { index: usize, value: Value },

    #[error("`event` is null")]
    EventMissing,

    #[error("`event.Records` is not an array: {0}")]
    RecordsNotArray(Value),
}

/// ゲートで処理を打ち切った理由
#[derive(Debug, Clone, PartialEq)]
pub enum GateStop {
    /// 形式エラー
    Invalid(InputError),
    /// 空入力（成功扱い、処理対象なし）
    NothingToDo(&'static str),
}

pub const EMPTY_QUEUES_MESSAGE: &str = "`queues` is empty -- nothing to do.";
pub const EMPTY_RECORDS_MESSAGE: &str = "No records in event -- nothing to do.";

/// 検証済みの呼び出し引数
///
/// レコードはまだデコードしていない。デコードできないレコードは
/// 処理時に個別にスキップする。
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationInput {
    pub queues: Vec<String>,
    pub records: Vec<Value>,
}

impl InvocationInput {
    /// 呼び出し引数を検証する
    ///
    /// # 戻り値
    /// * `Ok(InvocationInput)` - 送信先キュー・レコードともに1件以上
    /// * `Err(GateStop)` - 形式エラーまたは空入力
    pub fn from_payload(mut payload: Value) -> Result<Self, GateStop> {
        let queues = Self::verify_queues(payload.get_mut("queues").map(Value::take))?;
        let records = Self::verify_event(payload.get_mut("event").map(Value::take))?;
        Ok(Self { queues, records })
    }

    fn verify_queues(queues: Option<Value>) -> Result<Vec<String>, GateStop> {
        let queues = match queues {
            None | Some(Value::Null) => return Err(GateStop::Invalid(InputError::QueuesMissing)),
            Some(Value::Array(queues)) => queues,
            Some(other) => return Err(GateStop::Invalid(InputError::QueuesNotArray(other))),
        };

        if queues.is_empty() {
            return Err(GateStop::NothingToDo(EMPTY_QUEUES_MESSAGE));
        }

        queues
            .into_iter()
            .enumerate()
            .map(|(index, queue)| match queue {
                Value::String(url) => Ok(url),
                value => Err(GateStop::Invalid(InputError::QueueNotString { index, value })),
            })
            .collect()
    }

    fn verify_event(event: Option<Value>) -> Result<Vec<Value>, GateStop> {
        let mut event = match event {
            None | Some(Value::Null) => return Err(GateStop::Invalid(InputError::EventMissing)),
            Some(event) => event,
        };

        let records = match event.get_mut("Records").map(Value::take) {
            Some(Value::Array(records)) => records,
            other => {
                return Err(GateStop::Invalid(InputError::RecordsNotArray(
                    other.unwrap_or(Value::Null),
                )));
            }
        };

        if records.is_empty() {
            return Err(GateStop::NothingToDo(EMPTY_RECORDS_MESSAGE));
        }

        Ok(records)
    }
}

/// 生のレコードを変更レコードへデコードする
///
/// 判定に使わないストリームのメタデータは欠けていてもよい。
pub fn decode_record(raw: Value) -> Result<ChangeRecord, serde_json::Error> {
    serde_json::from_value(raw)
}
