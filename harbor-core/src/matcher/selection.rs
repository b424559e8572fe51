use rst_common::standard::serde_json::{Map, Value};
use rst_common::with_logging::log::{debug, info};

use super::types::MatcherError;

/// Picks the credential evidence for a proof presentation out of the engine's
/// resolved candidate set.
///
/// The candidate set maps each requested attribute to a list of credentials
/// able to satisfy it. The first candidate wins; an attribute with an empty
/// list is left unselected so the caller supplies its value self-attested.
/// A candidate list that is not an array is a shape violation surfaced as
/// [`MatcherError::MalformedCandidateSet`].
pub fn select_credentials_for_proof(
    resolved: &Value,
    tails_dir: &str,
) -> Result<Value, MatcherError> {
    let candidates = resolved
        .get("attrs")
        .and_then(Value::as_object)
        .ok_or(MatcherError::MalformedCandidateSet(
            "candidate set was missing its attrs map".to_string(),
        ))?;

    debug!("resolving credential selection over {} attributes", candidates.len());

    let mut selected_attrs = Map::new();
    for (attr_name, attr_candidates) in candidates {
        let attr_candidates =
            attr_candidates
                .as_array()
                .ok_or(MatcherError::MalformedCandidateSet(format!(
                    "candidates for attribute {} were not an array",
                    attr_name
                )))?;

        match attr_candidates.first() {
            Some(credential) => {
                let mut selection = Map::new();
                selection.insert("credential".to_string(), credential.to_owned());
                selection.insert(
                    "tails_file".to_string(),
                    Value::String(tails_dir.to_string()),
                );
                selected_attrs.insert(attr_name.to_owned(), Value::Object(selection));
            }
            None => {
                info!(
                    "no credential was resolved for requested attribute {}, it must be supplied self-attested",
                    attr_name
                );
            }
        }
    }

    let mut selected = Map::new();
    selected.insert("attrs".to_string(), Value::Object(selected_attrs));
    Ok(Value::Object(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::standard::serde_json;

    #[test]
    fn test_first_candidate_wins_and_empty_list_stays_unselected() {
        let resolved: Value = serde_json::from_str(
            r#"{
                "attrs": {
                    "attr1": [
                        {"cred_info": {"referent": "cred-a"}},
                        {"cred_info": {"referent": "cred-b"}}
                    ],
                    "attr2": []
                }
            }"#,
        )
        .unwrap();

        let selected = select_credentials_for_proof(&resolved, "/tmp/tails").unwrap();
        let attrs = selected.get("attrs").unwrap();

        let attr1 = attrs.get("attr1").unwrap();
        assert_eq!(
            attr1
                .get("credential")
                .and_then(|credential| credential.get("cred_info"))
                .and_then(|info| info.get("referent"))
                .and_then(Value::as_str),
            Some("cred-a")
        );
        assert_eq!(
            attr1.get("tails_file").and_then(Value::as_str),
            Some("/tmp/tails")
        );

        assert!(attrs.get("attr2").is_none());
    }

    #[test]
    fn test_missing_attrs_map_is_malformed() {
        let resolved: Value = serde_json::from_str(r#"{"predicates": {}}"#).unwrap();
        let selected = select_credentials_for_proof(&resolved, "/tmp/tails");
        assert!(matches!(
            selected.unwrap_err(),
            MatcherError::MalformedCandidateSet(_)
        ));
    }

    #[test]
    fn test_non_array_candidates_are_malformed() {
        let resolved: Value =
            serde_json::from_str(r#"{"attrs": {"attr1": {"cred_info": {}}}}"#).unwrap();
        let selected = select_credentials_for_proof(&resolved, "/tmp/tails");

        let err = selected.unwrap_err();
        assert!(err.to_string().contains("attr1"));
    }
}
