/// DynamoDB Item属性の型付き参照
///
/// ストリームレコードのイメージ（`serde_dynamo::Item`）から、型タグを明示して
/// 属性値を取り出す。型タグが一致しない属性は欠損として扱う。
use serde_dynamo::{AttributeValue, Item};

/// XMLペイロード（バイナリ）
pub const XML_FIELD: &str = "XML";
/// XMLペイロードのチェックサム（バイナリ）
pub const XML_CHECKSUM_FIELD: &str = "XMLChecksum";
/// ハーベスト元リポジトリのベースURL（文字列）
pub const BASE_URL_FIELD: &str = "BaseUrl";
/// レコード識別子（文字列）
pub const IDENTIFIER_FIELD: &str = "Identifier";

/// DynamoDBの属性型タグ
///
/// 参照時に必ず指定させる。省略時に文字列扱いすると
/// バイナリ属性を読み落とすため、デフォルト値は持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// `S`
    String,
    /// `B`
    Binary,
    /// `N`
    Number,
}

impl AttributeType {
    /// DynamoDB JSON表現での型タグ
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Binary => "B",
            AttributeType::Number => "N",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// イメージ内の属性値への借用参照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeRef<'a> {
    String(&'a str),
    Binary(&'a [u8]),
    /// 数値は文字列表現のまま保持
    Number(&'a str),
}

impl<'a> AttributeRef<'a> {
    /// 文字列属性の場合のみ値を返す
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            AttributeRef::String(s) => Some(s),
            _ => None,
        }
    }

    /// バイナリ属性の場合のみ値を返す
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            AttributeRef::Binary(b) => Some(b),
            _ => None,
        }
    }
}

/// イメージから指定した型の属性値を取得する
///
/// # 戻り値
/// * `Some(AttributeRef)` - 属性が存在し、型タグが一致した
/// * `None` - 属性が存在しない、`NULL`属性、または型タグが異なる
pub fn get_value<'a>(
    image: &'a Item,
    name: &str,
    attribute_type: AttributeType,
) -> Option<AttributeRef<'a>> {
    match (image.get(name)?, attribute_type) {
        (AttributeValue::S(s), AttributeType::String) => Some(AttributeRef::String(s)),
        (AttributeValue::B(b), AttributeType::Binary) => Some(AttributeRef::Binary(b)),
        (AttributeValue::N(n), AttributeType::Number) => Some(AttributeRef::Number(n)),
        _ => None,
    }
}

/// XMLペイロードを取得
pub fn get_xml(image: &Item) -> Option<&[u8]> {
    get_value(image, XML_FIELD, AttributeType::Binary).and_then(|v| v.as_bytes())
}

/// XMLチェックサムを取得
pub fn get_checksum(image: &Item) -> Option<&[u8]> {
    get_value(image, XML_CHECKSUM_FIELD, AttributeType::Binary).and_then(|v| v.as_bytes())
}

/// 識別子を取得
pub fn get_identifier(image: &Item) -> Option<&str> {
    get_value(image, IDENTIFIER_FIELD, AttributeType::String).and_then(|v| v.as_str())
}

/// ベースURLを取得
pub fn get_base_url(image: &Item) -> Option<&str> {
    get_value(image, BASE_URL_FIELD, AttributeType::String).and_then(|v| v.as_str())
}
