//! Three-way merge engine
//!
//! Merges another branch into the current one. Every file is classified
//! against the split point snapshot, the resulting changes go through the
//! staging area, and the merge commit records both heads as parents.

pub mod split_finder;

use crate::areas::database::Database;
use crate::areas::state::RepoState;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::CheckoutEngine;
use crate::artifacts::errors::LitError;
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// How a merge ended, for the caller to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch was behind the other one and was moved forward,
    /// no new commit was created
    FastForwarded { new_head: ObjectId },
    /// A merge commit was created
    Merged {
        commit_id: ObjectId,
        conflicted: bool,
    },
}

/// What the merge does with one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Take the other branch's version and stage it
    TakeOther,
    /// Remove the file and stage the removal
    RemoveFromCurrent,
    /// Keep whatever the current branch has
    Keep,
    /// Write conflict markers and stage them
    Conflict,
}

/// Classify one path from its blob ids at the split point and both heads
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> MergeAction {
    if current == other {
        return MergeAction::Keep;
    }
    if other == split {
        return MergeAction::Keep;
    }
    if current == split {
        return if other.is_some() {
            MergeAction::TakeOther
        } else {
            MergeAction::RemoveFromCurrent
        };
    }
    MergeAction::Conflict
}

/// Conflict marker content; a side absent from its head contributes nothing
/// between its markers
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>) -> Vec<u8> {
    let mut content = Vec::new();
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current.unwrap_or_default());
    content.extend_from_slice(b"=======\n");
    content.extend_from_slice(other.unwrap_or_default());
    content.extend_from_slice(b">>>>>>>\n");
    content
}

pub struct MergeEngine<'a> {
    database: &'a Database,
    workspace: &'a Workspace,
}

impl<'a> MergeEngine<'a> {
    pub fn new(database: &'a Database, workspace: &'a Workspace) -> Self {
        Self {
            database,
            workspace,
        }
    }

    /// Merge `other_branch` into the current branch
    pub fn merge(
        &self,
        state: &mut RepoState,
        other_branch: &str,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<MergeOutcome> {
        if !state.staging.is_empty() {
            return Err(LitError::DirtyWorkingState.into());
        }

        let current_branch = state.branches.current().to_string();
        if other_branch == current_branch {
            return Err(LitError::SelfMerge.into());
        }

        let current_head = state.branches.current_head().clone();
        let other_head = state.branches.head(other_branch)?.clone();

        let graph = CommitGraph::new(self.database);
        let current_commit = graph.load(&current_head)?;
        let other_commit = graph.load(&other_head)?;

        if current_head == other_head || graph.ancestors(&current_head)?.contains(&other_head) {
            return Err(LitError::BranchIsAncestor.into());
        }
        if graph.ancestors(&other_head)?.contains(&current_head) {
            let checkout = CheckoutEngine::new(self.database, self.workspace);
            checkout.checkout_commit(&state.staging, &current_commit, &other_commit)?;
            state
                .branches
                .set_head(&current_branch, other_head.clone())?;
            return Ok(MergeOutcome::FastForwarded {
                new_head: other_head,
            });
        }

        let finder = SplitFinder::new(|oid: &ObjectId| graph.slim(oid));
        let split_point = finder.find_split_point(&current_head, &other_head)?;
        let split_commit = graph.load(&split_point)?;

        let paths = current_commit
            .files()
            .keys()
            .chain(other_commit.files().keys())
            .chain(split_commit.files().keys())
            .cloned()
            .collect::<BTreeSet<String>>();

        let actions = paths
            .iter()
            .map(|path| {
                let action = classify(
                    split_commit.blob_id(path),
                    current_commit.blob_id(path),
                    other_commit.blob_id(path),
                );
                (path.as_str(), action)
            })
            .collect::<Vec<_>>();

        // the merge must either fully apply or leave the tree untouched
        for (path, action) in &actions {
            let writes = matches!(action, MergeAction::TakeOther | MergeAction::Conflict);
            let untracked =
                !current_commit.tracks(path) && self.workspace.read_file(path)?.is_some();
            if writes && untracked {
                return Err(LitError::UntrackedFileWouldBeOverwritten.into());
            }
        }

        let checkout = CheckoutEngine::new(self.database, self.workspace);
        let mut conflicted = false;

        for (path, action) in actions {
            match action {
                MergeAction::Keep => {}
                MergeAction::TakeOther => {
                    checkout.checkout_file(&other_commit, path)?;
                    let content = self.workspace.read_file(path)?;
                    state.staging.stage_add(path, content, &current_commit)?;
                }
                MergeAction::RemoveFromCurrent => {
                    let content = self.workspace.read_file(path)?;
                    if state.staging.stage_remove(path, &current_commit, content)? {
                        self.workspace.remove_file(path)?;
                    }
                }
                MergeAction::Conflict => {
                    conflicted = true;
                    let current_content = self.blob_bytes(&current_commit, path)?;
                    let other_content = self.blob_bytes(&other_commit, path)?;
                    let content =
                        conflict_content(current_content.as_deref(), other_content.as_deref());
                    self.workspace.write_file(path, &content)?;
                    state.staging.stage_add(path, Some(content), &current_commit)?;
                }
            }
        }

        if state.staging.is_empty() {
            return Err(LitError::NoChangesToCommit.into());
        }

        let files = state
            .staging
            .snapshot(current_commit.files(), |blob| self.database.store(&blob))?;
        let message = format!("Merged {} into {}.", other_branch, current_branch);
        let (commit_id, _) = graph.create(
            vec![current_head, other_head],
            message,
            timestamp,
            files,
        )?;

        state.branches.set_head(&current_branch, commit_id.clone())?;
        state.staging.clear();

        Ok(MergeOutcome::Merged {
            commit_id,
            conflicted,
        })
    }

    fn blob_bytes(&self, commit: &Commit, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        match commit.blob_id(path) {
            Some(blob_id) => {
                let blob = self.database.load_blob(blob_id)?;
                Ok(Some(blob.content().to_vec()))
            }
            None => Ok(None),
        }
    }
}
