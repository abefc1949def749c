//! The election state and its transitions.
//!
//! Every transition validates before it mutates, so a rejected call leaves
//! the election exactly as it was.

use crate::election::auth::AdminAuthenticator;
use crate::election::error::ElectionError;
use crate::election::model::*;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Election {
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
    /// Phone of the signed-in voter. Always present in `voters`.
    session: Option<String>,
    admin: bool,
    rules: ElectionRules,
}

impl Election {
    /// Build from loaded state. Repeated phones keep their first entry, and a
    /// session voter missing from `voters` is dropped.
    pub fn new(
        candidates: Vec<Candidate>,
        voters: Vec<Voter>,
        session: Option<Voter>,
        rules: ElectionRules,
    ) -> Self {
        let mut seen = HashSet::new();
        let voters: Vec<Voter> = voters
            .into_iter()
            .filter(|v| {
                let first = seen.insert(v.phone.clone());
                if !first {
                    tracing::warn!("duplicate voter record for {}, keeping the first", v.phone);
                }
                first
            })
            .collect();
        let session = session.and_then(|s| {
            if voters.iter().any(|v| v.phone == s.phone) {
                Some(s.phone)
            } else {
                tracing::warn!("stored session for {} has no voter record, ignoring", s.phone);
                None
            }
        });
        Self {
            candidates,
            voters,
            session,
            admin: false,
            rules,
        }
    }

    pub fn seeded(rules: ElectionRules) -> Self {
        Self::new(seeded_candidates(), Vec::new(), None, rules)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    pub fn current_voter(&self) -> Option<&Voter> {
        let phone = self.session.as_ref()?;
        self.voters.iter().find(|v| &v.phone == phone)
    }

    /// Look up or register the voter for `phone` and make them the session.
    pub fn authenticate_voter(&mut self, phone: &str) -> Result<&Voter, ElectionError> {
        let phone = phone.trim();
        if phone.chars().count() < self.rules.min_phone_len {
            return Err(ElectionError::InvalidPhone {
                min_len: self.rules.min_phone_len,
            });
        }

        let idx = match self.voters.iter().position(|v| v.phone == phone) {
            Some(idx) => idx,
            None => {
                tracing::info!(phone, "registered new voter");
                self.voters.push(Voter::new(phone));
                self.voters.len() - 1
            }
        };
        self.session = Some(phone.to_string());
        Ok(&self.voters[idx])
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    pub fn authenticate_admin(
        &mut self,
        auth: &dyn AdminAuthenticator,
        password: &str,
    ) -> Result<(), ElectionError> {
        if auth.verify(password) {
            tracing::info!("admin signed in");
            self.admin = true;
            Ok(())
        } else {
            tracing::warn!("rejected admin sign-in attempt");
            Err(ElectionError::WrongPassword)
        }
    }

    pub fn sign_out_admin(&mut self) {
        self.admin = false;
    }

    /// Cast the session voter's single vote.
    pub fn vote(&mut self, candidate_id: &CandidateId) -> Result<&Candidate, ElectionError> {
        let phone = self.session.clone().ok_or(ElectionError::NotSignedIn)?;
        let voter_idx = self
            .voters
            .iter()
            .position(|v| v.phone == phone)
            .ok_or(ElectionError::NotSignedIn)?;
        if self.voters[voter_idx].has_voted {
            return Err(ElectionError::AlreadyVoted);
        }
        let cand_idx = self
            .candidates
            .iter()
            .position(|c| &c.id == candidate_id)
            .ok_or_else(|| ElectionError::UnknownCandidate(candidate_id.clone()))?;

        let voter = &mut self.voters[voter_idx];
        voter.has_voted = true;
        voter.voted_for = Some(candidate_id.clone());

        let candidate = &mut self.candidates[cand_idx];
        candidate.votes += 1;
        tracing::info!(candidate = %candidate.id, "vote recorded");
        Ok(candidate)
    }

    pub fn add_candidate(
        &mut self,
        fields: NewCandidate,
        now: DateTime<Utc>,
    ) -> Result<&Candidate, ElectionError> {
        if !self.admin {
            return Err(ElectionError::AdminRequired);
        }
        let name = fields.name.trim();
        let party = fields.party.trim();
        if name.is_empty() || party.is_empty() {
            return Err(ElectionError::MissingCandidateFields);
        }

        let photo = match fields.photo.trim() {
            "" => self.rules.default_photo.clone(),
            p => p.to_string(),
        };
        let description = match fields.description.trim() {
            "" => self.rules.default_description.clone(),
            d => d.to_string(),
        };
        let candidate = Candidate {
            id: CandidateId::allocate(&self.candidates, now),
            name: name.to_string(),
            party: party.to_string(),
            photo,
            votes: 0,
            description,
        };
        tracing::info!(id = %candidate.id, name = %candidate.name, "candidate added");
        self.candidates.push(candidate);
        Ok(&self.candidates[self.candidates.len() - 1])
    }

    /// Remove a candidate. Refused while the candidate holds votes, so no
    /// voter is left pointing at a missing candidate.
    pub fn remove_candidate(&mut self, id: &CandidateId) -> Result<Candidate, ElectionError> {
        if !self.admin {
            return Err(ElectionError::AdminRequired);
        }
        let idx = self
            .candidates
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ElectionError::UnknownCandidate(id.clone()))?;
        let candidate = &self.candidates[idx];
        if candidate.votes > 0 {
            return Err(ElectionError::CandidateHasVotes {
                name: candidate.name.clone(),
                votes: candidate.votes,
            });
        }
        let removed = self.candidates.remove(idx);
        tracing::info!(id = %removed.id, name = %removed.name, "candidate removed");
        Ok(removed)
    }

    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.votes).sum()
    }

    /// Fraction of all votes held by `candidate`, 0 when nobody has voted.
    pub fn vote_share(&self, candidate: &Candidate) -> f64 {
        match self.total_votes() {
            0 => 0.0,
            total => candidate.votes as f64 / total as f64,
        }
    }

    pub fn share_percent(&self, candidate: &Candidate) -> u64 {
        (self.vote_share(candidate) * 100.0).round() as u64
    }

    pub fn voted_count(&self) -> usize {
        self.voters.iter().filter(|v| v.has_voted).count()
    }

    pub fn not_voted_count(&self) -> usize {
        self.voters.len() - self.voted_count()
    }

    /// Whether vote totals match the number of voters who have voted.
    pub fn is_consistent(&self) -> bool {
        self.total_votes() == self.voted_count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::auth::{hash_password, Argon2Authenticator};

    struct Fixed(&'static str);

    impl AdminAuthenticator for Fixed {
        fn verify(&self, password: &str) -> bool {
            password == self.0
        }
    }

    fn election() -> Election {
        Election::seeded(ElectionRules::default())
    }

    fn admin_election() -> Election {
        let mut e = election();
        e.authenticate_admin(&Fixed("letmein"), "letmein").unwrap();
        e
    }

    fn new_candidate(name: &str, party: &str) -> NewCandidate {
        NewCandidate {
            name: name.into(),
            party: party.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_vote_scenario() {
        let mut e = election();
        e.authenticate_voter("9991234567").unwrap();
        let name = e.vote(&"2".into()).unwrap().name.clone();
        assert_eq!(name, "Maria Sidorova");

        assert_eq!(e.candidate(&"2".into()).unwrap().votes, 1);
        assert_eq!(e.total_votes(), 1);
        let voter = e.current_voter().unwrap();
        assert!(voter.has_voted);
        assert_eq!(voter.voted_for, Some("2".into()));

        let before: Vec<_> = e.candidates().iter().map(|c| c.votes).collect();
        assert_eq!(e.vote(&"1".into()).unwrap_err(), ElectionError::AlreadyVoted);
        assert_eq!(e.vote(&"2".into()).unwrap_err(), ElectionError::AlreadyVoted);
        let after: Vec<_> = e.candidates().iter().map(|c| c.votes).collect();
        assert_eq!(before, after);
        assert_eq!(e.total_votes(), 1);
    }

    #[test]
    fn test_authenticate_is_idempotent() {
        let mut e = election();
        e.authenticate_voter("9991234567").unwrap();
        e.sign_out();
        e.authenticate_voter("9991234567").unwrap();
        assert_eq!(e.voters().len(), 1);
        assert_eq!(e.current_voter().unwrap().phone, "9991234567");
    }

    #[test]
    fn test_returning_voter_keeps_vote() {
        let mut e = election();
        e.authenticate_voter("9991234567").unwrap();
        e.vote(&"3".into()).unwrap();
        e.sign_out();
        let voter = e.authenticate_voter("9991234567").unwrap();
        assert!(voter.has_voted);
        assert_eq!(e.vote(&"1".into()).unwrap_err(), ElectionError::AlreadyVoted);
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut e = election();
        let err = e.authenticate_voter("12345").unwrap_err();
        assert_eq!(err, ElectionError::InvalidPhone { min_len: 10 });
        assert_eq!(err.to_string(), "Enter a valid phone number (at least 10 characters)");
        assert!(e.voters().is_empty());
        assert!(e.current_voter().is_none());

        // Whitespace does not count toward the length
        assert!(e.authenticate_voter("  123456789  ").is_err());
        assert!(e.authenticate_voter(" 1234567890 ").is_ok());
        assert_eq!(e.current_voter().unwrap().phone, "1234567890");
    }

    #[test]
    fn test_vote_requires_session() {
        let mut e = election();
        assert_eq!(e.vote(&"1".into()).unwrap_err(), ElectionError::NotSignedIn);
        assert_eq!(e.total_votes(), 0);
    }

    #[test]
    fn test_vote_unknown_candidate_changes_nothing() {
        let mut e = election();
        e.authenticate_voter("9991234567").unwrap();
        let err = e.vote(&"42".into()).unwrap_err();
        assert_eq!(err, ElectionError::UnknownCandidate("42".into()));
        assert!(!e.current_voter().unwrap().has_voted);
        assert_eq!(e.total_votes(), 0);
    }

    #[test]
    fn test_totals_match_voted_count() {
        let mut e = election();
        for (i, pick) in ["1", "2", "2", "3", "2"].iter().enumerate() {
            e.authenticate_voter(&format!("555000000{}", i)).unwrap();
            e.vote(&(*pick).into()).unwrap();
            assert!(e.is_consistent());
        }
        e.authenticate_voter("5559999999").unwrap();
        assert_eq!(e.total_votes(), 5);
        assert_eq!(e.voted_count(), 5);
        assert_eq!(e.not_voted_count(), 1);
        assert!(e.is_consistent());
    }

    #[test]
    fn test_vote_share() {
        let mut e = election();
        let first = e.candidates()[0].clone();
        assert_eq!(e.vote_share(&first), 0.0);
        assert_eq!(e.share_percent(&first), 0);

        for (i, pick) in ["1", "1", "2"].iter().enumerate() {
            e.authenticate_voter(&format!("555000000{}", i)).unwrap();
            e.vote(&(*pick).into()).unwrap();
        }
        let first = e.candidate(&"1".into()).unwrap();
        let second = e.candidate(&"2".into()).unwrap();
        assert_eq!(e.share_percent(first), 67);
        assert_eq!(e.share_percent(second), 33);
    }

    #[test]
    fn test_admin_password() {
        let auth = Argon2Authenticator::new(Some(hash_password("correct horse").unwrap()));
        let mut e = election();
        assert_eq!(
            e.authenticate_admin(&auth, "wrong").unwrap_err(),
            ElectionError::WrongPassword
        );
        assert!(!e.is_admin());
        e.authenticate_admin(&auth, "correct horse").unwrap();
        assert!(e.is_admin());
        e.sign_out_admin();
        assert!(!e.is_admin());
    }

    #[test]
    fn test_admin_is_independent_of_session() {
        let mut e = admin_election();
        e.authenticate_voter("9991234567").unwrap();
        e.sign_out();
        assert!(e.is_admin());
        e.authenticate_voter("9991234567").unwrap();
        e.sign_out_admin();
        assert!(e.current_voter().is_some());
    }

    #[test]
    fn test_add_candidate_requires_admin() {
        let mut e = election();
        let err = e
            .add_candidate(new_candidate("Olga", "Greens"), Utc::now())
            .unwrap_err();
        assert_eq!(err, ElectionError::AdminRequired);
        assert_eq!(e.candidates().len(), 3);
    }

    #[test]
    fn test_add_candidate_defaults() {
        let mut e = admin_election();
        let added = e
            .add_candidate(new_candidate("  Olga  ", "Greens"), Utc::now())
            .unwrap()
            .clone();
        assert_eq!(added.name, "Olga");
        assert_eq!(added.photo, DEFAULT_PHOTO);
        assert_eq!(added.description, DEFAULT_DESCRIPTION);
        assert_eq!(added.votes, 0);
        assert_eq!(e.candidates().len(), 4);
        assert_eq!(e.candidates().last().unwrap().id, added.id);
    }

    #[test]
    fn test_add_candidate_keeps_given_fields() {
        let mut e = admin_election();
        let fields = NewCandidate {
            name: "Olga".into(),
            party: "Greens".into(),
            description: "Forests first".into(),
            photo: "https://example.org/olga.png".into(),
        };
        let added = e.add_candidate(fields, Utc::now()).unwrap();
        assert_eq!(added.description, "Forests first");
        assert_eq!(added.photo, "https://example.org/olga.png");
    }

    #[test]
    fn test_add_candidate_missing_fields() {
        let mut e = admin_election();
        for (name, party) in [("", "Greens"), ("Olga", ""), ("   ", "  ")] {
            let err = e
                .add_candidate(new_candidate(name, party), Utc::now())
                .unwrap_err();
            assert_eq!(err, ElectionError::MissingCandidateFields);
        }
        assert_eq!(e.candidates().len(), 3);
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut e = admin_election();
        let now = Utc::now();
        let a = e.add_candidate(new_candidate("A", "P"), now).unwrap().id.clone();
        let b = e.add_candidate(new_candidate("B", "P"), now).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_candidate() {
        let mut e = admin_election();
        e.authenticate_voter("9991234567").unwrap();
        e.vote(&"2".into()).unwrap();

        let removed = e.remove_candidate(&"3".into()).unwrap();
        assert_eq!(removed.name, "Igor Volkov");
        assert_eq!(e.candidates().len(), 2);
        assert_eq!(e.candidate(&"1".into()).unwrap().votes, 0);
        assert_eq!(e.candidate(&"2".into()).unwrap().votes, 1);
        assert!(e.is_consistent());
    }

    #[test]
    fn test_remove_candidate_with_votes_refused() {
        let mut e = admin_election();
        e.authenticate_voter("9991234567").unwrap();
        e.vote(&"2".into()).unwrap();
        let err = e.remove_candidate(&"2".into()).unwrap_err();
        assert_eq!(
            err,
            ElectionError::CandidateHasVotes {
                name: "Maria Sidorova".into(),
                votes: 1
            }
        );
        assert_eq!(e.candidates().len(), 3);
    }

    #[test]
    fn test_remove_candidate_rejections() {
        let mut e = election();
        assert_eq!(
            e.remove_candidate(&"1".into()).unwrap_err(),
            ElectionError::AdminRequired
        );
        let mut e = admin_election();
        assert_eq!(
            e.remove_candidate(&"99".into()).unwrap_err(),
            ElectionError::UnknownCandidate("99".into())
        );
        assert_eq!(e.candidates().len(), 3);
    }

    #[test]
    fn test_orphan_session_dropped() {
        let e = Election::new(
            seeded_candidates(),
            vec![Voter::new("1111111111")],
            Some(Voter::new("2222222222")),
            ElectionRules::default(),
        );
        assert!(e.current_voter().is_none());

        let e = Election::new(
            seeded_candidates(),
            vec![Voter::new("1111111111")],
            Some(Voter::new("1111111111")),
            ElectionRules::default(),
        );
        assert_eq!(e.current_voter().unwrap().phone, "1111111111");
        assert!(!e.is_admin());
    }

    #[test]
    fn test_duplicate_phones_keep_first() {
        let mut voted = Voter::new("1111111111");
        voted.has_voted = true;
        voted.voted_for = Some("1".into());
        let mut candidates = seeded_candidates();
        candidates[0].votes = 1;

        let mut e = Election::new(
            candidates,
            vec![voted, Voter::new("1111111111"), Voter::new("2222222222")],
            Some(Voter::new("1111111111")),
            ElectionRules::default(),
        );
        assert_eq!(e.voters().len(), 2);
        assert!(e.current_voter().unwrap().has_voted);
        assert!(e.is_consistent());
        assert_eq!(e.vote(&"2".into()).unwrap_err(), ElectionError::AlreadyVoted);
    }
}
