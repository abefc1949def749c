//! Election domain: candidates, voters, the signed-in session and the
//! transitions between them.

pub mod auth;
pub mod error;
pub mod ledger;
pub mod model;

pub use auth::{AdminAuthenticator, Argon2Authenticator};
pub use error::ElectionError;
pub use ledger::Election;
pub use model::{Candidate, CandidateId, ElectionRules, NewCandidate, Voter};
