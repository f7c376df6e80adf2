/// DynamoDB Streamsの変更レコード
///
/// 転送判定に使うフィールド（eventSource, OldImage, NewImage）だけを持つ。
/// ストリームのメタデータ（eventID, ApproximateCreationDateTime, Keysなど）は
/// 欠けていてもデコードできる。
use serde::{Deserialize, Serialize};
use serde_dynamo::Item;

/// ストリームの1レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "eventSource", default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    /// ログ用
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// ログ用（INSERT / MODIFY / REMOVE）
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamodb: Option<ChangeImages>,
}

/// 変更前後のイメージ
///
/// 属性のないイメージ（`{}`）と、イメージ自体がないことは区別する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeImages {
    #[serde(rename = "OldImage", default, skip_serializing_if = "Option::is_none")]
    pub old_image: Option<Item>,

    #[serde(rename = "NewImage", default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<Item>,
}

impl ChangeRecord {
    /// 変更前のイメージ
    pub fn old_image(&self) -> Option<&Item> {
        self.dynamodb.as_ref()?.old_image.as_ref()
    }

    /// 変更後のイメージ
    pub fn new_image(&self) -> Option<&Item> {
        self.dynamodb.as_ref()?.new_image.as_ref()
    }
}
