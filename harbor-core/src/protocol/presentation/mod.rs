//! `presentation` drives proof exchange between a verifier and a prover.
//!
//! The verifier walks `RequestSet -> RequestSent -> Verified`; the prover
//! walks `RequestReceived -> PresentationBuilt -> PresentationSent`. The
//! prover builds its presentation out of the engine's resolved candidate set
//! via [`crate::matcher::select_credentials_for_proof`], with any uncovered
//! attribute supplied self-attested.

mod proof;
pub use proof::Proof;

mod disclosed;
pub use disclosed::DisclosedProof;

mod usecase;
pub use usecase::{ProverUsecase, VerifierUsecase};

pub mod types;
