use regex::Regex;

use rst_common::standard::serde_json::Value;

use crate::inbox::decode_first_attachment;

use super::types::MatcherError;

/// Keeps the offers whose decoded attachment carries a `schema_id` matching
/// the given pattern. An offer without a decodable `schema_id` is excluded
/// rather than rejected.
pub fn filter_offers_by_schema(
    offers: &[Value],
    pattern: &Regex,
) -> Result<Vec<Value>, MatcherError> {
    let mut retained = Vec::new();
    for offer in offers {
        let attachment = decode_first_attachment(offer)?;
        let matched = attachment
            .get("schema_id")
            .and_then(Value::as_str)
            .map(|schema_id| pattern.is_match(schema_id))
            .unwrap_or(false);

        if matched {
            retained.push(offer.to_owned());
        }
    }

    Ok(retained)
}

/// Keeps the offers where at least one preview attribute matches both the
/// name and the value pattern. Offers without a preview are excluded.
pub fn filter_offers_by_attr(
    offers: &[Value],
    name_pattern: &Regex,
    value_pattern: &Regex,
) -> Result<Vec<Value>, MatcherError> {
    let retained = offers
        .iter()
        .filter(|offer| {
            offer
                .get("credential_preview")
                .and_then(|preview| preview.get("attributes"))
                .and_then(Value::as_array)
                .map(|attributes| {
                    attributes.iter().any(|attribute| {
                        let name = attribute.get("name").and_then(Value::as_str);
                        let value = attribute.get("value").and_then(Value::as_str);
                        match (name, value) {
                            (Some(name), Some(value)) => {
                                name_pattern.is_match(name) && value_pattern.is_match(value)
                            }
                            _ => false,
                        }
                    })
                })
                .unwrap_or(false)
        })
        .map(Value::to_owned)
        .collect();

    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;

    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use base64::Engine;

    use table_test::table_test;

    use rst_common::standard::serde_json;

    fn build_offer(schema_id: &str, attr_name: &str, attr_value: &str) -> Value {
        let attachment = format!(r#"{{"schema_id": "{}"}}"#, schema_id);
        let encoded = BASE64_STANDARD.encode(attachment.as_bytes());

        serde_json::from_str(&format!(
            r#"{{
                "credential_preview": {{
                    "attributes": [{{"name": "{}", "value": "{}"}}]
                }},
                "offers~attach": [{{"@id": "attach-0", "data": {{"base64": "{}"}}}}]
            }}"#,
            attr_name, attr_value, encoded
        ))
        .unwrap()
    }

    #[test]
    fn test_filter_offers_by_schema() {
        let degree = build_offer("did:sov:abc:2:degree:1.0", "age", "25");
        let membership = build_offer("did:sov:abc:2:membership:1.0", "age", "25");

        let pattern = Regex::new("degree").unwrap();
        let retained =
            filter_offers_by_schema(&[degree.clone(), membership], &pattern).unwrap();

        assert_eq!(retained, vec![degree]);
    }

    #[test]
    fn test_filter_offers_by_schema_missing_attachment_is_error() {
        let offer: Value = serde_json::from_str(r#"{"@type": "offer"}"#).unwrap();
        let pattern = Regex::new("degree").unwrap();

        let retained = filter_offers_by_schema(&[offer], &pattern);
        assert!(matches!(
            retained.unwrap_err(),
            MatcherError::DecodeError(_)
        ));
    }

    #[test]
    fn test_filter_offers_by_attr() {
        let table = vec![
            (("age", "25"), 1),
            (("age", "30"), 0),
            (("name", "25"), 0),
        ];

        let offer = build_offer("did:sov:abc:2:degree:1.0", "age", "25");

        for (validator, (name, value), expected) in table_test!(table) {
            let name_pattern = Regex::new(name).unwrap();
            let value_pattern = Regex::new(value).unwrap();

            let retained =
                filter_offers_by_attr(&[offer.clone()], &name_pattern, &value_pattern).unwrap();

            validator
                .given(&format!("patterns ({}, {})", name, value))
                .when("filtering a single-attribute offer")
                .then("retain it only when both patterns match")
                .assert_eq(expected, retained.len());
        }
    }

    #[test]
    fn test_filter_offers_by_attr_without_preview_is_excluded() {
        let offer: Value = serde_json::from_str(r#"{"@type": "offer"}"#).unwrap();
        let name_pattern = Regex::new("age").unwrap();
        let value_pattern = Regex::new("25").unwrap();

        let retained = filter_offers_by_attr(&[offer], &name_pattern, &value_pattern).unwrap();
        assert!(retained.is_empty());
    }
}
