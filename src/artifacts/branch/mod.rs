//! Branch table
//!
//! Branches are movable named pointers into the commit graph. The table also
//! remembers which branch is current; its head is the HEAD commit.

use crate::artifacts::errors::LitError;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// First commit ever reachable from this branch, fixed at creation
    pub root: ObjectId,
    /// Latest commit on this branch
    pub head: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    current: String,
    branches: BTreeMap<String, Branch>,
}

impl BranchTable {
    /// Bootstrap the table with a single branch pointing at the root commit
    pub fn bootstrap(initial_branch: &str, root: ObjectId) -> Self {
        let branch = Branch {
            root: root.clone(),
            head: root,
        };
        BranchTable {
            current: initial_branch.to_string(),
            branches: BTreeMap::from([(initial_branch.to_string(), branch)]),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn current_head(&self) -> &ObjectId {
        // the current branch always exists in the table
        &self.branches[&self.current].head
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.branches.keys()
    }

    pub fn head(&self, name: &str) -> Result<&ObjectId, LitError> {
        self.branches
            .get(name)
            .map(|branch| &branch.head)
            .ok_or(LitError::NoSuchBranch)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Create a new branch pointing at the current head
    pub fn create(&mut self, name: &str) -> Result<(), LitError> {
        if self.branches.contains_key(name) {
            return Err(LitError::BranchExists);
        }

        let head = self.current_head().clone();
        self.branches.insert(
            name.to_string(),
            Branch {
                root: head.clone(),
                head,
            },
        );
        Ok(())
    }

    /// Remove a branch pointer, leaving its commits in place
    pub fn remove(&mut self, name: &str) -> Result<(), LitError> {
        if name == self.current {
            return Err(LitError::CannotRemoveCurrentBranch);
        }
        if self.branches.remove(name).is_none() {
            return Err(LitError::NoSuchBranch);
        }
        Ok(())
    }

    /// Move a branch head to a new commit
    pub fn set_head(&mut self, name: &str, head: ObjectId) -> Result<(), LitError> {
        let branch = self.branches.get_mut(name).ok_or(LitError::NoSuchBranch)?;
        branch.head = head;
        Ok(())
    }

    /// Make another branch the current one
    pub fn switch_to(&mut self, name: &str) -> Result<(), LitError> {
        if !self.branches.contains_key(name) {
            return Err(LitError::NoSuchBranch);
        }
        self.current = name.to_string();
        Ok(())
    }
}
