use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use crate::protocol::engine::EngineError;
use crate::storage::StorageError;

/// `LedgerError` is the base error type for ledger publication.
#[derive(Debug, PartialEq, Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("entity error: {0}")]
    EntityError(String),
}

/// What a published schema declares.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct SchemaData {
    pub name: String,
    pub version: String,
    pub attributes: Vec<String>,
}

/// Revocation support requested when publishing a credential definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct RevocationDetails {
    #[serde(rename = "supportRevocation")]
    pub support_revocation: bool,

    #[serde(rename = "tailsDir")]
    pub tails_dir: Option<String>,

    #[serde(rename = "maxCreds")]
    pub max_creds: Option<u32>,
}

impl RevocationDetails {
    pub fn disabled() -> Self {
        Self {
            support_revocation: false,
            tails_dir: None,
            max_creds: None,
        }
    }
}

pub trait SchemaActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn schema_id(&self) -> Result<String, EngineError>;
}

pub trait CredentialDefinitionActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn cred_def_id(&self) -> Result<String, EngineError>;
}

pub trait RevocationRegistryActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn rev_reg_id(&self) -> Result<String, EngineError>;
    fn tails_location(&self) -> Result<String, EngineError>;
}

/// `LedgerEngineBuilder` is the consumed engine capability for ledger writes.
#[async_trait]
pub trait LedgerEngineBuilder {
    type SchemaActor: SchemaActorBuilder + Send;
    type CredentialDefinitionActor: CredentialDefinitionActorBuilder + Send;
    type RevocationRegistryActor: RevocationRegistryActorBuilder + Send;

    async fn create_schema(
        &self,
        source_id: &str,
        data: SchemaData,
    ) -> Result<Self::SchemaActor, EngineError>;

    async fn create_credential_definition(
        &self,
        source_id: &str,
        schema_id: &str,
        revocation: RevocationDetails,
    ) -> Result<Self::CredentialDefinitionActor, EngineError>;

    async fn create_revocation_registry(
        &self,
        cred_def_id: &str,
        tails_dir: &str,
        max_creds: u32,
    ) -> Result<Self::RevocationRegistryActor, EngineError>;
}

pub trait SchemaEntityAccessor {
    fn get_name(&self) -> String;
    fn get_schema_id(&self) -> String;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
}

pub trait CredentialDefinitionEntityAccessor {
    fn get_name(&self) -> String;
    fn get_schema_id(&self) -> String;
    fn get_cred_def_id(&self) -> String;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
}

pub trait RevocationRegistryEntityAccessor {
    fn get_name(&self) -> String;
    fn get_cred_def_id(&self) -> String;
    fn get_rev_reg_id(&self) -> String;
    fn get_tails_location(&self) -> String;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
}

/// `LedgerAPI` is the produced surface for ledger publication.
#[async_trait]
pub trait LedgerAPI {
    type SchemaEntityAccessor: SchemaEntityAccessor;
    type CredentialDefinitionEntityAccessor: CredentialDefinitionEntityAccessor;
    type RevocationRegistryEntityAccessor: RevocationRegistryEntityAccessor;

    /// Publishes a schema and returns its ledger id.
    async fn create_schema(&self, name: &str, data: SchemaData) -> Result<String, LedgerError>;

    /// Publishes a credential definition against a stored schema and returns
    /// its ledger id.
    async fn create_credential_definition(
        &self,
        name: &str,
        schema: &str,
        revocation: RevocationDetails,
    ) -> Result<String, LedgerError>;

    /// Publishes a revocation registry against a stored credential definition
    /// and returns its ledger id.
    async fn create_revocation_registry(
        &self,
        name: &str,
        cred_def: &str,
        tails_dir: &str,
        max_creds: u32,
    ) -> Result<String, LedgerError>;

    async fn get_schema(&self, name: &str) -> Result<Self::SchemaEntityAccessor, LedgerError>;
    async fn get_credential_definition(
        &self,
        name: &str,
    ) -> Result<Self::CredentialDefinitionEntityAccessor, LedgerError>;
    async fn get_revocation_registry(
        &self,
        name: &str,
    ) -> Result<Self::RevocationRegistryEntityAccessor, LedgerError>;

    async fn list_schemas(&self) -> Result<Vec<String>, LedgerError>;
    async fn list_credential_definitions(&self) -> Result<Vec<String>, LedgerError>;
}
