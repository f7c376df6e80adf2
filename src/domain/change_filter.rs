/// 変更レコードの転送判定
///
/// DynamoDB Streamsの1レコードについて、SQSへ転送すべき内容の更新かどうかを判定する。
/// 判定は以下の順で行い、最初に該当したスキップ理由を返す:
/// 1. eventSourceが想定外
/// 2. NewImageがない（削除）
/// 3. NewImageの必須フィールド欠損
/// 4. NewImageにチェックサムがない（書き込み途中のアイテム）
/// 5. OldImageとNewImageのチェックサムが一致（内容に変更なし）
use super::attribute::get_checksum;
use super::change_record::ChangeRecord;
use super::image_validator::{validate_new_image, MissingField};

/// DynamoDB Streamsのイベントソース
pub const DYNAMODB_EVENT_SOURCE: &str = "aws:dynamodb";

/// レコードをスキップした理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 想定外のイベントソース（実際の値を含む）
    ForeignEventSource(Option<String>),
    /// NewImageがない
    NoNewImage,
    /// NewImageの必須フィールドが欠損
    InvalidNewImage(Vec<MissingField>),
    /// NewImageにチェックサムがない
    MissingChecksum,
    /// チェックサムが変わっていない
    ChecksumUnchanged,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ForeignEventSource(source) => write!(
                f,
                "DynamoDBイベントではありません (eventSource: {})",
                source.as_deref().unwrap_or("なし")
            ),
            SkipReason::NoNewImage => f.write_str("NewImageがありません"),
            SkipReason::InvalidNewImage(fields) => {
                let names: Vec<&str> = fields.iter().map(|m| m.field_name()).collect();
                write!(f, "NewImageが不正です (欠損: {})", names.join(", "))
            }
            SkipReason::MissingChecksum => f.write_str("NewImageにチェックサムがありません"),
            SkipReason::ChecksumUnchanged => f.write_str("OldImageとNewImageのチェックサムが一致"),
        }
    }
}

/// 転送が決まった変更内容
///
/// NewImageから取り出した値を所有する。キューごとのメッセージはここから構築する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedChange {
    pub xml: Vec<u8>,
    pub identifier: String,
    pub base_url: String,
}

/// 変更レコードフィルター
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    expected_event_source: String,
}

impl ChangeFilter {
    /// 受け付けるイベントソースを指定してフィルターを作成
    pub fn new(expected_event_source: impl Into<String>) -> Self {
        Self {
            expected_event_source: expected_event_source.into(),
        }
    }

    /// 受け付けるイベントソース
    pub fn expected_event_source(&self) -> &str {
        &self.expected_event_source
    }

    /// レコードを判定する
    ///
    /// # 戻り値
    /// * `Ok(AcceptedChange)` - 転送対象
    /// * `Err(SkipReason)` - スキップ（理由付き）
    pub fn evaluate(&self, record: &ChangeRecord) -> Result<AcceptedChange, SkipReason> {
        if record.event_source.as_deref() != Some(self.expected_event_source.as_str()) {
            return Err(SkipReason::ForeignEventSource(record.event_source.clone()));
        }

        let new_image = record.new_image().ok_or(SkipReason::NoNewImage)?;
        let fields = validate_new_image(new_image).map_err(SkipReason::InvalidNewImage)?;

        let new_checksum = get_checksum(new_image).ok_or(SkipReason::MissingChecksum)?;

        // INSERTではOldImageがないので常に不一致になる
        if record.old_image().and_then(get_checksum) == Some(new_checksum) {
            return Err(SkipReason::ChecksumUnchanged);
        }

        Ok(AcceptedChange {
            xml: fields.xml.to_vec(),
            identifier: fields.identifier.to_string(),
            base_url: fields.base_url.to_string(),
        })
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::new(DYNAMODB_EVENT_SOURCE)
    }
}
