//! Commit graph
//!
//! A thin view over the database that creates commits, resolves full ids and
//! unique prefixes, and walks ancestry. The graph never mutates history;
//! commits are immutable once stored.

use crate::areas::database::Database;
use crate::artifacts::errors::LitError;
use crate::artifacts::objects::commit::{Commit, FileSnapshot, MAX_PARENTS, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::collections::{HashSet, VecDeque};

pub struct CommitGraph<'d> {
    database: &'d Database,
}

impl<'d> CommitGraph<'d> {
    pub fn new(database: &'d Database) -> Self {
        Self { database }
    }

    /// Create and store a new commit
    pub fn create(
        &self,
        parents: Vec<ObjectId>,
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        files: FileSnapshot,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        if parents.len() > MAX_PARENTS {
            return Err(LitError::TooManyParents.into());
        }

        let commit = Commit::new(parents, message, timestamp, files);
        let oid = self.database.store(&commit)?;
        Ok((oid, commit))
    }

    pub fn load(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.load_commit(oid)
    }

    pub fn slim(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load(oid)?;
        Ok(SlimCommit {
            oid: oid.clone(),
            parents: commit.parents().to_vec(),
        })
    }

    /// Resolve a full commit id or a unique prefix
    pub fn resolve(&self, id_or_prefix: &str) -> anyhow::Result<(ObjectId, Commit)> {
        if id_or_prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(id_or_prefix.to_string())
                .map_err(|_| LitError::NoSuchCommit)?;
            let commit = self
                .database
                .load_commit(&oid)
                .map_err(|_| LitError::NoSuchCommit)?;
            return Ok((oid, commit));
        }

        let mut matches = self.database.find_commits_by_prefix(id_or_prefix)?;
        match matches.len() {
            0 => Err(LitError::NoSuchCommit.into()),
            1 => {
                let oid = matches.remove(0);
                let commit = self.database.load_commit(&oid)?;
                Ok((oid, commit))
            }
            _ => Err(LitError::AmbiguousCommitId.into()),
        }
    }

    /// All commits reachable from `head`, itself included
    pub fn ancestors(&self, head: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([head.clone()]);

        while let Some(oid) = queue.pop_front() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            let commit = self.slim(&oid)?;
            for parent in commit.parents {
                queue.push_back(parent);
            }
        }

        Ok(visited)
    }

    /// Every commit ever stored, in no particular order
    pub fn all_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.database.list_commits()
    }
}
