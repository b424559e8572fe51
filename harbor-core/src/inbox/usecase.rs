use rst_common::standard::serde_json;
use rst_common::with_logging::log::debug;

use super::envelope::Envelope;
use super::types::{InboxError, MessageQuery, TransportBuilder};

/// `Inbox` wraps the relay transport with the single-actor download contract.
#[derive(Clone)]
pub struct Inbox<TTransport>
where
    TTransport: TransportBuilder + Send + Sync,
{
    transport: TTransport,
}

impl<TTransport> Inbox<TTransport>
where
    TTransport: TransportBuilder + Send + Sync,
{
    pub fn new(transport: TTransport) -> Self {
        Self { transport }
    }

    /// Downloads the envelopes pending for one actor. Filter semantics are
    /// tri-state, see [`MessageQuery::new`]. A response spanning more than
    /// one actor or missing the message list is a transport contract
    /// violation; zero matching actors is [`InboxError::EmptyResult`].
    pub async fn fetch(
        &self,
        pairwise_did: &str,
        statuses: Option<Vec<String>>,
        uids: Option<Vec<String>>,
    ) -> Result<Vec<Envelope>, InboxError> {
        let query = MessageQuery::new(pairwise_did.to_string(), statuses, uids);
        debug!("downloading messages with query {}", query.to_query_string());

        let raw = self.transport.download_messages(query).await?;
        let batches = raw.as_array().ok_or(InboxError::ProtocolAnomaly(
            "response was not an array of actor batches".to_string(),
        ))?;

        if batches.is_empty() {
            return Err(InboxError::EmptyResult);
        }

        if batches.len() > 1 {
            return Err(InboxError::ProtocolAnomaly(format!(
                "single-actor query was answered for {} actors",
                batches.len()
            )));
        }

        let msgs = batches[0]
            .get("msgs")
            .ok_or(InboxError::ProtocolAnomaly(
                "actor batch was missing its msgs field".to_string(),
            ))?
            .as_array()
            .ok_or(InboxError::ProtocolAnomaly(
                "msgs field was not an array".to_string(),
            ))?;

        let envelopes = msgs
            .iter()
            .map(|msg| {
                serde_json::from_value::<Envelope>(msg.to_owned())
                    .map_err(|err| InboxError::ProtocolAnomaly(format!("malformed envelope: {}", err)))
            })
            .collect::<Result<Vec<Envelope>, InboxError>>()?;

        debug!(
            "downloaded {} envelopes for actor {}",
            envelopes.len(),
            pairwise_did
        );
        Ok(envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockall::mock;
    use mockall::predicate::function;

    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::serde_json::Value;
    use rst_common::with_tokio::tokio;

    mock!(
        FakeTransport{}

        impl Clone for FakeTransport {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl TransportBuilder for FakeTransport {
            async fn download_messages(&self, query: MessageQuery) -> Result<Value, InboxError>;
        }
    );

    fn single_batch(msgs: &str) -> Value {
        serde_json::from_str(&format!(
            r#"[{{"pairwiseDID": "pw-did-1", "msgs": {}}}]"#,
            msgs
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_ordered_envelopes() {
        let mut transport = MockFakeTransport::new();
        transport.expect_download_messages().returning(|_| {
            Ok(single_batch(
                r#"[
                    {"uid": "uid-1", "statusCode": "MS-103", "decryptedMsg": "{}"},
                    {"uid": "uid-2", "statusCode": "MS-103", "decryptedMsg": "{}"}
                ]"#,
            ))
        });

        let inbox = Inbox::new(transport);
        let envelopes = inbox.fetch("pw-did-1", None, None).await.unwrap();
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].uid(), "uid-1");
        assert_eq!(envelopes[1].uid(), "uid-2");
    }

    #[tokio::test]
    async fn test_fetch_applies_default_statuses_when_unspecified() {
        let mut transport = MockFakeTransport::new();
        transport
            .expect_download_messages()
            .with(function(|query: &MessageQuery| {
                query.status() == Some("MS-102,MS-103,MS-104,MS-105,MS-106")
                    && query.uids().is_none()
            }))
            .returning(|_| Ok(single_batch("[]")));

        let inbox = Inbox::new(transport);
        let envelopes = inbox.fetch("pw-did-1", None, None).await.unwrap();
        assert!(envelopes.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_zero_actors_is_empty_result() {
        let mut transport = MockFakeTransport::new();
        transport
            .expect_download_messages()
            .returning(|_| Ok(serde_json::from_str("[]").unwrap()));

        let inbox = Inbox::new(transport);
        let fetched = inbox.fetch("pw-did-1", None, None).await;
        assert_eq!(fetched.unwrap_err(), InboxError::EmptyResult);
    }

    #[tokio::test]
    async fn test_fetch_multiple_actors_is_protocol_anomaly() {
        let mut transport = MockFakeTransport::new();
        transport.expect_download_messages().returning(|_| {
            Ok(serde_json::from_str(
                r#"[
                    {"pairwiseDID": "pw-did-1", "msgs": []},
                    {"pairwiseDID": "pw-did-2", "msgs": []}
                ]"#,
            )
            .unwrap())
        });

        let inbox = Inbox::new(transport);
        let fetched = inbox.fetch("pw-did-1", None, None).await;
        assert!(matches!(
            fetched.unwrap_err(),
            InboxError::ProtocolAnomaly(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_missing_msgs_field_is_protocol_anomaly() {
        let mut transport = MockFakeTransport::new();
        transport.expect_download_messages().returning(|_| {
            Ok(serde_json::from_str(r#"[{"pairwiseDID": "pw-did-1"}]"#).unwrap())
        });

        let inbox = Inbox::new(transport);
        let fetched = inbox.fetch("pw-did-1", None, None).await;

        let err = fetched.unwrap_err();
        assert!(matches!(err, InboxError::ProtocolAnomaly(_)));
        assert!(err.to_string().contains("msgs"));
    }
}
