use crate::election::model::CandidateId;
use thiserror::Error;

/// Reasons a transition is refused. The `Display` text is what the voter or
/// admin sees in the blocking alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("Enter a valid phone number (at least {min_len} characters)")]
    InvalidPhone { min_len: usize },

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Administrator sign-in required")]
    AdminRequired,

    #[error("Fill in the name and party")]
    MissingCandidateFields,

    #[error("Sign in with your phone number to vote")]
    NotSignedIn,

    #[error("You have already voted!")]
    AlreadyVoted,

    #[error("No candidate with id {0}")]
    UnknownCandidate(CandidateId),

    #[error("{name} already has {votes} vote(s) and cannot be removed")]
    CandidateHasVotes { name: String, votes: u64 },
}
