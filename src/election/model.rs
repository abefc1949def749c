//! Election data model.
//!
//! These types are also the persisted JSON shape, so field names follow the
//! stored format (`hasVoted`, `votedFor`) rather than Rust naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable candidate identifier. Seeded candidates use `"1"`..`"3"`; new ones
/// get a millisecond timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Allocate an id from `now`, bumped past every numeric id in `existing`
    /// so ids stay unique and increasing even within one millisecond.
    pub fn allocate(existing: &[Candidate], now: DateTime<Utc>) -> Self {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let highest = existing
            .iter()
            .filter_map(|c| c.id.0.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        match highest.checked_add(1) {
            Some(next) => Self(stamp.max(next).to_string()),
            // Numeric space exhausted; fall back to a suffixed stamp.
            None => (1u64..)
                .map(|n| Self(format!("{}-{}", stamp, n)))
                .find(|id| existing.iter().all(|c| &c.id != id))
                .unwrap_or_else(|| Self(stamp.to_string())),
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub photo: String,
    pub votes: u64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub phone: String,
    pub has_voted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_for: Option<CandidateId>,
}

impl Voter {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            has_voted: false,
            voted_for: None,
        }
    }
}

/// Fields entered by an admin for a new candidate. Photo and description may
/// be left empty and are then filled from [`ElectionRules`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub party: String,
    pub description: String,
    pub photo: String,
}

/// Tunables applied by the transition functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionRules {
    pub min_phone_len: usize,
    pub default_photo: String,
    pub default_description: String,
}

pub const DEFAULT_PHOTO: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face";
pub const DEFAULT_DESCRIPTION: &str = "Candidate description";

impl Default for ElectionRules {
    fn default() -> Self {
        Self {
            min_phone_len: 10,
            default_photo: DEFAULT_PHOTO.to_string(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// The three candidates used when nothing has been persisted yet.
pub fn seeded_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: CandidateId::new("1"),
            name: "Alexander Petrov".into(),
            party: "Party of Progress".into(),
            photo: DEFAULT_PHOTO.into(),
            votes: 0,
            description: "Seasoned politician focused on economic development".into(),
        },
        Candidate {
            id: CandidateId::new("2"),
            name: "Maria Sidorova".into(),
            party: "Democratic Union".into(),
            photo: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face".into(),
            votes: 0,
            description: "Advocate for social rights and education".into(),
        },
        Candidate {
            id: CandidateId::new("3"),
            name: "Igor Volkov".into(),
            party: "Independent".into(),
            photo: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".into(),
            votes: 0,
            description: "Young reformer, champion of digital services".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seeded_candidates() {
        let seeds = seeded_candidates();
        let ids: Vec<_> = seeds.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(seeds.iter().all(|c| c.votes == 0));
    }

    #[test]
    fn test_allocate_uses_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = CandidateId::allocate(&seeded_candidates(), now);
        assert_eq!(id.as_str(), "1700000000123");
    }

    #[test]
    fn test_allocate_bumps_past_existing() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut candidates = seeded_candidates();
        let first = CandidateId::allocate(&candidates, now);
        candidates.push(Candidate {
            id: first.clone(),
            name: "A".into(),
            party: "B".into(),
            photo: String::new(),
            votes: 0,
            description: String::new(),
        });
        let second = CandidateId::allocate(&candidates, now);
        assert_ne!(first, second);
        assert_eq!(second.as_str(), "1700000000124");
    }

    #[test]
    fn test_allocate_with_max_numeric_id() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut candidates = seeded_candidates();
        candidates[0].id = CandidateId::new(u64::MAX.to_string());
        let id = CandidateId::allocate(&candidates, now);
        assert_eq!(id.as_str(), "1700000000123-1");

        candidates[1].id = id;
        let next = CandidateId::allocate(&candidates, now);
        assert_eq!(next.as_str(), "1700000000123-2");
    }

    #[test]
    fn test_voter_json_shape() {
        let voter = Voter {
            phone: "9991234567".into(),
            has_voted: true,
            voted_for: Some("2".into()),
        };
        let json = serde_json::to_string(&voter).unwrap();
        assert_eq!(json, r#"{"phone":"9991234567","hasVoted":true,"votedFor":"2"}"#);

        let fresh = serde_json::to_string(&Voter::new("9991234567")).unwrap();
        assert_eq!(fresh, r#"{"phone":"9991234567","hasVoted":false}"#);
    }
}
