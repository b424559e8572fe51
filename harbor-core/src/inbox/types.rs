use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

/// Statuses applied when the caller leaves the status filter unspecified:
/// every status code the relay considers deliverable.
pub const DEFAULT_STATUS_FILTER: [&str; 5] = ["MS-102", "MS-103", "MS-104", "MS-105", "MS-106"];

/// `InboxError` is the base error type for message retrieval.
#[derive(Debug, PartialEq, Error)]
pub enum InboxError {
    #[error("transport contract violation: {0}")]
    ProtocolAnomaly(String),

    #[error("transport reported zero matching actors")]
    EmptyResult,

    #[error("unable to decode attachment: {0}")]
    DecodeError(String),

    #[error("transport error: {0}")]
    TransportError(String),
}

/// `MessageQuery` is one single-actor download query. Filters are resolved at
/// construction: `statuses = None` applies [`DEFAULT_STATUS_FILTER`],
/// `Some(vec![])` drops the status clause entirely, and a non-empty list is
/// comma-joined. Uids follow the same shape with a default of "no filter".
#[derive(Debug, Clone, PartialEq)]
pub struct MessageQuery {
    pairwise_did: String,
    status: Option<String>,
    uids: Option<String>,
}

impl MessageQuery {
    pub fn new(
        pairwise_did: String,
        statuses: Option<Vec<String>>,
        uids: Option<Vec<String>>,
    ) -> Self {
        let status = match statuses {
            None => Some(DEFAULT_STATUS_FILTER.join(",")),
            Some(values) if values.is_empty() => None,
            Some(values) => Some(values.join(",")),
        };

        let uids = uids.filter(|values| !values.is_empty()).map(|values| values.join(","));

        Self {
            pairwise_did,
            status,
            uids,
        }
    }

    pub fn pairwise_did(&self) -> &str {
        &self.pairwise_did
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn uids(&self) -> Option<&str> {
        self.uids.as_deref()
    }

    /// Renders the query the relay receives. Clauses whose filter resolved to
    /// "none" are omitted rather than sent empty.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("pairwiseDids={}", self.pairwise_did)];
        if let Some(status) = &self.status {
            parts.push(format!("status={}", status));
        }
        if let Some(uids) = &self.uids {
            parts.push(format!("uids={}", uids));
        }

        parts.join("&")
    }
}

/// `TransportBuilder` is the consumed relay capability: download the message
/// batches matching one query, returned as the relay's raw JSON.
#[async_trait]
pub trait TransportBuilder {
    async fn download_messages(&self, query: MessageQuery) -> Result<Value, InboxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_statuses_apply_default_filter() {
        let query = MessageQuery::new("pw-did-1".to_string(), None, None);
        assert_eq!(query.status(), Some("MS-102,MS-103,MS-104,MS-105,MS-106"));
        assert_eq!(query.uids(), None);
    }

    #[test]
    fn test_explicit_empty_statuses_apply_no_filter() {
        let query = MessageQuery::new("pw-did-1".to_string(), Some(vec![]), None);
        assert_eq!(query.status(), None);
        assert_eq!(query.to_query_string(), "pairwiseDids=pw-did-1");
    }

    #[test]
    fn test_non_empty_statuses_restrict_exactly() {
        let query = MessageQuery::new(
            "pw-did-1".to_string(),
            Some(vec!["MS-103".to_string()]),
            None,
        );
        assert_eq!(query.status(), Some("MS-103"));
    }

    #[test]
    fn test_statuses_joined_with_commas_and_empty_uids_omitted() {
        let query = MessageQuery::new(
            "pw-did-1".to_string(),
            Some(vec!["MS-102".to_string(), "MS-106".to_string()]),
            Some(vec![]),
        );
        assert_eq!(
            query.to_query_string(),
            "pairwiseDids=pw-did-1&status=MS-102,MS-106"
        );
    }

    #[test]
    fn test_uids_joined_with_commas() {
        let query = MessageQuery::new(
            "pw-did-1".to_string(),
            Some(vec![]),
            Some(vec!["uid-1".to_string(), "uid-2".to_string()]),
        );
        assert_eq!(
            query.to_query_string(),
            "pairwiseDids=pw-did-1&uids=uid-1,uid-2"
        );
    }
}
