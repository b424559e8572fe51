use std::fmt;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_errors::thiserror::{self, Error};

/// `RecordKind` enumerates the persistent actor namespaces. Every stored
/// record is addressed by `(kind, name)` within one agent's partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    AgentProvision,
    Connection,
    Schema,
    CredentialDefinition,
    RevocationRegistry,
    IssuerCredential,
    HolderCredential,
    Proof,
    DisclosedProof,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::AgentProvision => "agent-provision",
            RecordKind::Connection => "connection",
            RecordKind::Schema => "schema",
            RecordKind::CredentialDefinition => "credential-definition",
            RecordKind::RevocationRegistry => "revocation-registry",
            RecordKind::IssuerCredential => "issuer-credential",
            RecordKind::HolderCredential => "holder-credential",
            RecordKind::Proof => "proof",
            RecordKind::DisclosedProof => "disclosed-proof",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `StorageError` is the base error type for the record store. Every variant
/// carries enough context to correlate a failure to a specific record.
#[derive(Debug, PartialEq, Error)]
pub enum StorageError {
    #[error("{kind} {name} was not found")]
    NotFound { kind: RecordKind, name: String },

    #[error("unable to save record: {0}")]
    SaveError(String),

    #[error("unable to load record: {0}")]
    LoadError(String),

    #[error("unable to list record names: {0}")]
    ListError(String),
}

/// `RecordStoreBuilder` is the durable key/value contract backing every other
/// component. A store instance is bound to exactly one agent name; the
/// implementer owns the physical partitioning.
///
/// `save` overwrites unconditionally (last-writer-wins, no optimistic
/// locking). `load` on an absent key always fails with
/// [`StorageError::NotFound`]. `list_names` returns an order that is
/// implementation-defined but stable within a session; the implementer must
/// document the order it provides.
#[async_trait]
pub trait RecordStoreBuilder {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, StorageError>;
    async fn save(&self, kind: RecordKind, name: &str, blob: Vec<u8>) -> Result<(), StorageError>;
    async fn load(&self, kind: RecordKind, name: &str) -> Result<Vec<u8>, StorageError>;
    async fn list_names(&self, kind: RecordKind) -> Result<Vec<String>, StorageError>;
}
