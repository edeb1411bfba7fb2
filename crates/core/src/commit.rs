// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot revision tokens and the freshness rule applied to them.
//!
//! The server stamps every snapshot it emits with a commit id. Commit ids are
//! opaque: the only guaranteed relation between two of them is (in)equality.
//! When the server is known to hand out a strictly increasing sequence, the
//! [`Freshness::Sequenced`] policy additionally refuses to go backwards.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::state::SessionState;

/// Opaque revision token of a [`SessionState`](crate::SessionState) snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(value: impl Into<String>) -> Self {
        CommitId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the placeholder id carried by the default state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the id as a sequence number, if it is one.
    pub fn sequence(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(value: &str) -> Self {
        CommitId::new(value)
    }
}

/// How a candidate commit id is judged against the one currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Accept any id that differs from the current one.
    #[default]
    Distinct,
    /// Accept only ids whose sequence number is strictly greater.
    ///
    /// Falls back to [`Freshness::Distinct`] when either side is not numeric,
    /// so the first snapshot after the empty default is always accepted.
    Sequenced,
}

/// Outcome of comparing a candidate against the current commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate is newer and must replace the current snapshot.
    Fresh,
    /// Same commit id as the current snapshot.
    Duplicate,
    /// Older than the current snapshot (only reported by `Sequenced`).
    Stale,
}

impl Freshness {
    pub fn judge(self, current: &CommitId, candidate: &CommitId) -> Verdict {
        if current == candidate {
            return Verdict::Duplicate;
        }
        match self {
            Freshness::Distinct => Verdict::Fresh,
            Freshness::Sequenced => match (current.sequence(), candidate.sequence()) {
                (Some(cur), Some(cand)) => match cand.cmp(&cur) {
                    Ordering::Greater => Verdict::Fresh,
                    Ordering::Equal => Verdict::Duplicate,
                    Ordering::Less => Verdict::Stale,
                },
                _ => Verdict::Fresh,
            },
        }
    }

    /// Judges a whole snapshot: a snapshot of another session always
    /// replaces the current one, whatever its commit id.
    pub fn judge_state(self, current: &SessionState, candidate: &SessionState) -> Verdict {
        if current.id != candidate.id {
            return Verdict::Fresh;
        }
        self.judge(&current.commit_id, &candidate.commit_id)
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Distinct => write!(f, "distinct"),
            Freshness::Sequenced => write!(f, "sequenced"),
        }
    }
}

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;
