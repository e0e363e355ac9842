//! Staging area
//!
//! The staging area buffers intended changes between commits: additions map
//! paths to the exact bytes captured at `add` time, removals map paths to the
//! bytes the file had when `rm` deleted it (so a later `add` can restore it).
//!
//! Staging an addition whose content matches what the head commit already
//! tracks is a no-op and drops any stale staged entry for the path.

use crate::artifacts::errors::LitError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, FileSnapshot};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What `stage_add` decided to do with the path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The path had a removal pending; it was cancelled and the captured
    /// content should be written back to the working tree
    RestoredRemoval(Vec<u8>),
    /// The content was staged for addition
    Staged,
    /// The content matches the head commit, nothing staged
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    /// Paths staged for addition, with the content captured at `add` time
    added: BTreeMap<String, Vec<u8>>,
    /// Paths staged for removal, with the content the file had before `rm`
    removed: BTreeMap<String, Vec<u8>>,
}

impl StagingArea {
    pub fn added(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.added.contains_key(path) || self.removed.contains_key(path)
    }

    /// Stage a path for addition
    ///
    /// `working_content` is the current content of the file in the working
    /// tree, or `None` if it does not exist there.
    pub fn stage_add(
        &mut self,
        path: &str,
        working_content: Option<Vec<u8>>,
        head: &Commit,
    ) -> anyhow::Result<AddOutcome> {
        if let Some(content) = self.removed.remove(path) {
            return Ok(AddOutcome::RestoredRemoval(content));
        }

        let Some(content) = working_content else {
            return Err(LitError::FileMissingInWorkingTree.into());
        };

        let blob_id = Blob::from_slice(&content).object_id()?;
        if head.blob_id(path) == Some(&blob_id) {
            self.added.remove(path);
            return Ok(AddOutcome::Unchanged);
        }

        self.added.insert(path.to_string(), content);
        Ok(AddOutcome::Staged)
    }

    /// Stage a path for removal
    ///
    /// Returns whether the caller should delete the working file.
    pub fn stage_remove(
        &mut self,
        path: &str,
        head: &Commit,
        working_content: Option<Vec<u8>>,
    ) -> anyhow::Result<bool> {
        let was_staged = self.added.remove(path).is_some();

        if head.tracks(path) {
            self.removed
                .insert(path.to_string(), working_content.unwrap_or_default());
            return Ok(true);
        }

        if !was_staged {
            return Err(LitError::NothingToRemove.into());
        }

        Ok(false)
    }

    /// Build the file snapshot of the next commit from the parent's snapshot
    /// and the staged changes
    ///
    /// `store_blob` persists each staged addition and returns its id.
    pub fn snapshot(
        &self,
        parent_files: &FileSnapshot,
        mut store_blob: impl FnMut(Blob) -> anyhow::Result<ObjectId>,
    ) -> anyhow::Result<FileSnapshot> {
        let mut files = parent_files.clone();

        for (path, content) in &self.added {
            let blob_id = store_blob(Blob::from_slice(content))?;
            files.insert(path.to_string(), blob_id);
        }
        for path in self.removed.keys() {
            files.remove(path);
        }

        Ok(files)
    }
}
