use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{self, Value};

use super::types::InboxError;

/// Message fields that may carry a base64 attachment array, checked in order.
const ATTACHMENT_FIELDS: [&str; 2] = ["offers~attach", "request_presentations~attach"];

/// `Envelope` is one transport-delivered message record: a status code, a
/// unique id and the decrypted payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Envelope {
    pub(crate) uid: String,

    #[serde(rename = "statusCode")]
    pub(crate) status_code: String,

    #[serde(rename = "decryptedMsg")]
    pub(crate) payload: String,
}

impl Envelope {
    pub fn new(uid: String, status_code: String, payload: String) -> Self {
        Self {
            uid,
            status_code,
            payload,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn payload_json(&self) -> Result<Value, InboxError> {
        serde_json::from_str(&self.payload).map_err(|err| InboxError::DecodeError(err.to_string()))
    }
}

/// Decodes the first attachment entry of a protocol message: base64-decode
/// its `data.base64` field and parse the bytes as JSON. Used by the
/// credential-offer and proof-request filters.
pub fn decode_first_attachment(message: &Value) -> Result<Value, InboxError> {
    let entries = ATTACHMENT_FIELDS
        .iter()
        .find_map(|field| message.get(*field).and_then(Value::as_array))
        .ok_or(InboxError::DecodeError(
            "message carried no attachment entries".to_string(),
        ))?;

    let first = entries.first().ok_or(InboxError::DecodeError(
        "attachment array was empty".to_string(),
    ))?;

    let encoded = first
        .get("data")
        .and_then(|data| data.get("base64"))
        .and_then(Value::as_str)
        .ok_or(InboxError::DecodeError(
            "attachment was missing its data.base64 field".to_string(),
        ))?;

    let decoded = BASE64_STANDARD
        .decode(encoded)
        .map_err(|err| InboxError::DecodeError(err.to_string()))?;

    serde_json::from_slice(&decoded).map_err(|err| InboxError::DecodeError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_offer_message(attachment: &Value) -> Value {
        let encoded = BASE64_STANDARD.encode(serde_json::to_vec(attachment).unwrap());
        serde_json::from_str(&format!(
            r#"{{"offers~attach": [{{"@id": "attach-0", "data": {{"base64": "{}"}}}}]}}"#,
            encoded
        ))
        .unwrap()
    }

    #[test]
    fn test_decode_first_attachment() {
        let attachment: Value =
            serde_json::from_str(r#"{"schema_id": "did:sov:abc:2:degree:1.0"}"#).unwrap();
        let message = build_offer_message(&attachment);

        let decoded = decode_first_attachment(&message).unwrap();
        assert_eq!(decoded, attachment);
    }

    #[test]
    fn test_decode_missing_attachment_field() {
        let message: Value = serde_json::from_str(r#"{"@type": "issue-credential/1.0/offer"}"#).unwrap();
        let decoded = decode_first_attachment(&message);
        assert!(decoded.is_err());
        assert!(matches!(decoded.unwrap_err(), InboxError::DecodeError(_)));
    }

    #[test]
    fn test_decode_missing_base64_field() {
        let message: Value =
            serde_json::from_str(r#"{"offers~attach": [{"@id": "attach-0", "data": {}}]}"#)
                .unwrap();
        let decoded = decode_first_attachment(&message);
        assert!(decoded.is_err());

        if let InboxError::DecodeError(msg) = decoded.unwrap_err() {
            assert!(msg.contains("data.base64"));
        }
    }

    #[test]
    fn test_envelope_payload_json() {
        let envelope = Envelope::new(
            "uid-1".to_string(),
            "MS-103".to_string(),
            r#"{"@type": "ping"}"#.to_string(),
        );
        let payload = envelope.payload_json().unwrap();
        assert_eq!(payload.get("@type").unwrap(), "ping");
    }
}
