/// SQSへ送信するメッセージ
///
/// 転送が決まった変更内容から、送信先キューごとに1つ構築する。
/// 構築後は変更しない。
use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use super::attribute::{BASE_URL_FIELD, IDENTIFIER_FIELD};
use super::change_filter::AcceptedChange;

/// メッセージ属性のデータ型（SQSのDataType）
pub const STRING_DATA_TYPE: &str = "String";

/// メッセージ属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageAttribute {
    pub data_type: String,
    pub string_value: String,
}

impl MessageAttribute {
    /// String型の属性を作成
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: STRING_DATA_TYPE.to_string(),
            string_value: value.into(),
        }
    }
}

/// 送信メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    queue_url: String,
    #[serde(skip)]
    body: Vec<u8>,
    delay_seconds: i32,
    attributes: BTreeMap<String, MessageAttribute>,
}

impl OutboundMessage {
    /// 送信先キューと変更内容からメッセージを構築
    ///
    /// 本文はXMLペイロード、属性はIdentifierとBaseUrl、遅延なし。
    pub fn new(queue_url: impl Into<String>, change: &AcceptedChange) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            IDENTIFIER_FIELD.to_string(),
            MessageAttribute::string(&change.identifier),
        );
        attributes.insert(
            BASE_URL_FIELD.to_string(),
            MessageAttribute::string(&change.base_url),
        );

        Self {
            queue_url: queue_url.into(),
            body: change.xml.clone(),
            delay_seconds: 0,
            attributes,
        }
    }

    /// 送信先キューURL
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// 本文（XMLペイロードそのもの）
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// SQSのMessageBodyとして送る本文
    ///
    /// DynamoDB Streamsがバイナリ属性を配信するときと同じbase64表現。
    pub fn encoded_body(&self) -> String {
        STANDARD.encode(&self.body)
    }

    pub fn delay_seconds(&self) -> i32 {
        self.delay_seconds
    }

    /// メッセージ属性（属性名順）
    pub fn attributes(&self) -> &BTreeMap<String, MessageAttribute> {
        &self.attributes
    }

    pub fn identifier(&self) -> Option<&str> {
        self.attributes
            .get(IDENTIFIER_FIELD)
            .map(|a| a.string_value.as_str())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.attributes
            .get(BASE_URL_FIELD)
            .map(|a| a.string_value.as_str())
    }
}
