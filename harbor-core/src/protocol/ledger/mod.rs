//! `ledger` publishes the issuance prerequisites: schemas, credential
//! definitions and revocation registries.
//!
//! These actors are write-once. Each create operation publishes through the
//! engine, captures the ledger identifier it was assigned, and persists the
//! snapshot under the caller's name for later offers and proofs.

mod schema;
pub use schema::Schema;

mod cred_def;
pub use cred_def::CredentialDefinition;

mod rev_reg;
pub use rev_reg::RevocationRegistry;

mod usecase;
pub use usecase::Usecase;

pub mod types;
