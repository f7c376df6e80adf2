/// NewImageの構造検証
///
/// 転送に必要なフィールド（XML, Identifier, BaseUrl）がすべて揃っているかを検証する。
/// 欠損フィールドは個別に報告する。
use serde_dynamo::Item;

use super::attribute::{get_base_url, get_identifier, get_xml};

/// 欠損した必須フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Xml,
    BaseUrl,
    Identifier,
}

impl MissingField {
    /// 属性名
    pub fn field_name(&self) -> &'static str {
        match self {
            MissingField::Xml => super::attribute::XML_FIELD,
            MissingField::BaseUrl => super::attribute::BASE_URL_FIELD,
            MissingField::Identifier => super::attribute::IDENTIFIER_FIELD,
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// 検証済みNewImageの必須フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    pub xml: &'a [u8],
    pub base_url: &'a str,
    pub identifier: &'a str,
}

/// NewImageを検証する
///
/// すべてのフィールドを検査してから結果を返す（最初の欠損で打ち切らない）。
///
/// # 戻り値
/// * `Ok(RequiredFields)` - 必須フィールドがすべて存在する
/// * `Err(Vec<MissingField>)` - 欠損フィールド（XML, BaseUrl, Identifierの順）
pub fn validate_new_image(image: &Item) -> Result<RequiredFields<'_>, Vec<MissingField>> {
    let xml = get_xml(image);
    let base_url = get_base_url(image);
    let identifier = get_identifier(image);

    if let (Some(xml), Some(base_url), Some(identifier)) = (xml, base_url, identifier) {
        return Ok(RequiredFields {
            xml,
            base_url,
            identifier,
        });
    }

    let mut missing = Vec::new();
    if xml.is_none() {
        missing.push(MissingField::Xml);
    }
    if base_url.is_none() {
        missing.push(MissingField::BaseUrl);
    }
    if identifier.is_none() {
        missing.push(MissingField::Identifier);
    }
    Err(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_dynamo::AttributeValue;
    use std::collections::HashMap;

    fn full_image_without(skip: &str) -> Item {
        let mut map: HashMap<String, AttributeValue> = HashMap::new();
        map.insert("XML".to_string(), AttributeValue::B(b"<record/>".to_vec()));
        map.insert("BaseUrl".to_string(), AttributeValue::S("https://oai.example.edu".to_string()));
        map.insert("Identifier".to_string(), AttributeValue::S("oai:x:1".to_string()));
        map.remove(skip);
        Item::from(map)
    }

    #[test]
    fn test_validate_complete_image() {
        let image = full_image_without("");
        let fields = validate_new_image(&image).unwrap();

        assert_eq!(fields.xml, b"<record/>");
        assert_eq!(fields.base_url, "https://oai.example.edu");
        assert_eq!(fields.identifier, "oai:x:1");
    }

    #[test]
    fn test_validate_missing_xml() {
        let image = full_image_without("XML");
        assert_eq!(validate_new_image(&image), Err(vec![MissingField::Xml]));
    }

    #[test]
    fn test_validate_missing_base_url() {
        let image = full_image_without("BaseUrl");
        assert_eq!(validate_new_image(&image), Err(vec![MissingField::BaseUrl]));
    }

    #[test]
    fn test_validate_missing_identifier() {
        let image = full_image_without("Identifier");
        assert_eq!(validate_new_image(&image), Err(vec![MissingField::Identifier]));
    }

    #[test]
    fn test_validate_empty_image_reports_every_field() {
        let image = Item::from(HashMap::new());
        assert_eq!(
            validate_new_image(&image),
            Err(vec![
                MissingField::Xml,
                MissingField::BaseUrl,
                MissingField::Identifier
            ])
        );
    }

    #[test]
    fn test_validate_reports_two_missing_fields() {
        let mut map: HashMap<String, AttributeValue> = HashMap::new();
        map.insert("BaseUrl".to_string(), AttributeValue::S("https://oai.example.edu".to_string()));
        let image = Item::from(map);

        assert_eq!(
            validate_new_image(&image),
            Err(vec![MissingField::Xml, MissingField::Identifier])
        );
    }

    #[test]
    fn test_missing_field_display() {
        assert_eq!(MissingField::Xml.to_string(), "XML");
        assert_eq!(MissingField::BaseUrl.to_string(), "BaseUrl");
        assert_eq!(MissingField::Identifier.to_string(), "Identifier");
    }
}
