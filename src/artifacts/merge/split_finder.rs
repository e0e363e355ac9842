//! Split point finder for three-way merges
//!
//! The split point of two branch heads is the latest commit reachable from
//! both, and it is the base against which the merge classifies every file.
//!
//! ## Algorithm
//!
//! A symmetric bidirectional BFS walks backwards from both heads in
//! alternating rounds, marking each discovered commit with the side(s) that
//! reached it. The first commits marked from both sides are the candidate
//! split points; among the candidates of that round, the one discovered
//! earliest from the current side wins, with the commit id breaking any
//! remaining tie. Both frontiers are advanced every round, so the choice
//! never depends on which head was passed first beyond that tie-break.
//!
//! Criss-cross histories produce several candidates in the same round; the
//! deterministic tie-break makes repeated merges pick the same base.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace the traversal:
//! ```toml
//! [features]
//! debug_merge = []
//! ```

use crate::artifacts::errors::LitError;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_merge"))]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const FROM_CURRENT = 0b01;
        const FROM_OTHER = 0b10;
        const FROM_BOTH = Self::FROM_CURRENT.bits() | Self::FROM_OTHER.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::FROM_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the split point between two branch heads
///
/// Takes a loader function so it works against any commit storage, the
/// on-disk database in production and a plain map in tests.
pub struct SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the split point of `current` and `other`
    ///
    /// Returns the head itself when one head is reachable from the other,
    /// and `LitError::NoSplitPoint` when the heads share no history.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        if current == other {
            return Ok(current.clone());
        }

        let mut states = HashMap::<ObjectId, VisitState>::new();
        // order in which the current side first reached each commit, used as
        // the primary tie-break among same-round candidates
        let mut discovery = HashMap::<ObjectId, usize>::new();
        let mut next_discovery = 0usize;

        states.insert(current.clone(), VisitState::FROM_CURRENT);
        discovery.insert(current.clone(), next_discovery);
        next_discovery += 1;
        states.insert(other.clone(), VisitState::FROM_OTHER);

        let mut current_frontier = VecDeque::from([current.clone()]);
        let mut other_frontier = VecDeque::from([other.clone()]);

        while !current_frontier.is_empty() || !other_frontier.is_empty() {
            let mut candidates = Vec::new();

            self.expand_frontier(
                &mut current_frontier,
                VisitState::FROM_CURRENT,
                &mut states,
                &mut discovery,
                &mut next_discovery,
                &mut candidates,
            )?;
            self.expand_frontier(
                &mut other_frontier,
                VisitState::FROM_OTHER,
                &mut states,
                &mut discovery,
                &mut next_discovery,
                &mut candidates,
            )?;

            if !candidates.is_empty() {
                debug_log!(
                    "Split point candidates this round: {}",
                    candidates
                        .iter()
                        .map(|oid| oid.as_ref())
                        .collect::<Vec<_>>()
                        .join(", ")
                );

                let split = candidates
                    .into_iter()
                    .min_by_key(|oid| (discovery.get(oid).copied().unwrap_or(usize::MAX), oid.clone()))
                    .expect("candidates is non-empty");

                debug_log!("Split point of {} and {}: {}", current, other, split);
                return Ok(split);
            }
        }

        Err(LitError::NoSplitPoint.into())
    }

    /// Advance one frontier by a single hop, marking parents with `side` and
    /// collecting commits that just became reachable from both sides
    fn expand_frontier(
        &self,
        frontier: &mut VecDeque<ObjectId>,
        side: VisitState,
        states: &mut HashMap<ObjectId, VisitState>,
        discovery: &mut HashMap<ObjectId, usize>,
        next_discovery: &mut usize,
        candidates: &mut Vec<ObjectId>,
    ) -> anyhow::Result<()> {
        let mut next_frontier = VecDeque::new();

        while let Some(commit_id) = frontier.pop_front() {
            let commit = (self.commit_loader)(&commit_id)?;

            for parent_id in &commit.parents {
                let old_state = states.get(parent_id).copied().unwrap_or(VisitState::NONE);
                if old_state.contains(side) {
                    continue;
                }

                let new_state = old_state | side;
                states.insert(parent_id.clone(), new_state);
                debug_log!("Marked {}: {}", parent_id, new_state);

                if side == VisitState::FROM_CURRENT {
                    discovery.entry(parent_id.clone()).or_insert_with(|| {
                        let order = *next_discovery;
                        *next_discovery += 1;
                        order
                    });
                }

                if new_state == VisitState::FROM_BOTH {
                    candidates.push(parent_id.clone());
                } else {
                    next_frontier.push_back(parent_id.clone());
                }
            }
        }

        *frontier = next_frontier;
        Ok(())
    }
}
