use regex::Regex;

use rst_common::with_errors::thiserror::{self, Error};

use crate::inbox::types::InboxError;

/// `MatcherError` is the base error type for offer filtering and proof
/// candidate selection.
#[derive(Debug, PartialEq, Error)]
pub enum MatcherError {
    #[error("malformed candidate set: {0}")]
    MalformedCandidateSet(String),

    #[error("decode error: {0}")]
    DecodeError(#[from] InboxError),
}

/// `OfferFilter` narrows a list of fetched credential offers before one is
/// accepted. Both filters are optional and combined conjunctively.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    schema: Option<Regex>,
    attr: Option<(Regex, Regex)>,
}

impl OfferFilter {
    pub fn new(schema: Option<Regex>, attr: Option<(Regex, Regex)>) -> Self {
        Self { schema, attr }
    }

    pub fn schema(&self) -> Option<&Regex> {
        self.schema.as_ref()
    }

    pub fn attr(&self) -> Option<&(Regex, Regex)> {
        self.attr.as_ref()
    }
}
