//! Loading and persisting the election under its three storage keys.
//!
//! Each key holds a complete JSON value and is rewritten in full on every
//! save. There is no schema version; anything that fails to parse is treated
//! as if nothing were stored.

use super::{Result, Storage, StorageError};
use crate::election::{Candidate, Election, ElectionRules, Voter};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CANDIDATES_KEY: &str = "election-candidates";
pub const VOTERS_KEY: &str = "election-users";
pub const SESSION_KEY: &str = "election-current-user";

/// Rebuild the election from storage. Absent keys fall back to their own
/// defaults; a read or parse failure on any key falls back to a freshly
/// seeded election.
pub fn load(storage: &dyn Storage, rules: ElectionRules) -> Election {
    match read_all(storage) {
        Ok((candidates, voters, session)) => {
            let election = Election::new(
                candidates.unwrap_or_else(crate::election::model::seeded_candidates),
                voters.unwrap_or_default(),
                session.flatten(),
                rules,
            );
            if !election.is_consistent() {
                tracing::warn!(
                    total_votes = election.total_votes(),
                    voted = election.voted_count(),
                    "stored vote totals do not match voters who have voted"
                );
            }
            election
        }
        Err(e) => {
            tracing::error!("failed to load election state, starting fresh: {}", e);
            Election::seeded(rules)
        }
    }
}

type Stored = (Option<Vec<Candidate>>, Option<Vec<Voter>>, Option<Option<Voter>>);

fn read_all(storage: &dyn Storage) -> Result<Stored> {
    Ok((
        read_key(storage, CANDIDATES_KEY)?,
        read_key(storage, VOTERS_KEY)?,
        read_key(storage, SESSION_KEY)?,
    ))
}

fn read_key<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })
}

fn write_key<T: Serialize + ?Sized>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Json {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json)
}

/// Overwrite all three keys with the current election. Skipped while the
/// candidate list is empty; returns whether anything was written.
pub fn persist(storage: &mut dyn Storage, election: &Election) -> Result<bool> {
    if election.candidates().is_empty() {
        return Ok(false);
    }
    write_key(storage, CANDIDATES_KEY, election.candidates())?;
    write_key(storage, VOTERS_KEY, election.voters())?;
    write_key(storage, SESSION_KEY, &election.current_voter())?;
    Ok(true)
}

/// Persist, logging a failed write instead of returning it. The in-memory
/// election stays authoritative either way.
pub fn persist_or_log(storage: &mut dyn Storage, election: &Election) -> bool {
    match persist(storage, election) {
        Ok(written) => written,
        Err(e) => {
            tracing::error!("failed to save election state: {}", e);
            false
        }
    }
}
