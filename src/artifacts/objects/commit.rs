//! Commit object
//!
//! A commit is an immutable node in the history DAG. It records its parent
//! ids (zero for the root commit, two for a merge commit), a message, a
//! timestamp, and the complete snapshot of tracked files at that point (path
//! to blob id, not a diff).
//!
//! ## Format
//!
//! On disk, zlib-compressed by the database:
//! ```text
//! commit <size>\0parent <parent-id>
//! timestamp <rfc3339>
//! file <blob-id> <path>
//!
//! <commit message>
//! ```
//!
//! The snapshot is kept in a `BTreeMap`, so serialization is deterministic
//! and the commit id (SHA-1 of the serialized form) is derived from the full
//! logical content. Two commits with identical history and content share an
//! id; changing any field changes it.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

pub const MAX_PARENTS: usize = 2;

/// Snapshot of tracked files: path to blob id
pub type FileSnapshot = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what graph traversals need (parent edges), so ancestor
/// walks do not drag full snapshots around.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ids (empty for the root commit, two for a merge commit)
    parents: Vec<ObjectId>,
    /// Commit message
    message: String,
    /// Creation timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Complete snapshot of tracked files at this commit
    files: FileSnapshot,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        files: FileSnapshot,
    ) -> Self {
        Commit {
            parents,
            message,
            timestamp,
            files,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn files(&self) -> &FileSnapshot {
        &self.files
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn blob_id(&self, path: &str) -> Option<&ObjectId> {
        self.files.get(path)
    }

    /// Format one history entry the way `log` and `global-log` print it
    pub fn log_entry(&self, oid: &ObjectId) -> String {
        let mut lines = vec!["===".to_string(), format!("commit {}", oid)];

        if let (Some(first), Some(second)) = (self.first_parent(), self.second_parent()) {
            lines.push(format!(
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            ));
        }

        lines.push(format!(
            "Date: {}",
            self.timestamp.format("%a %b %-d %H:%M:%S %Y %z")
        ));
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("timestamp {}", self.timestamp.to_rfc3339()));
        for (path, blob_id) in &self.files {
            object_content.push(format!("file {} {}", blob_id.as_ref(), path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), object_content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(object_content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;
        let mut lines = content.lines().peekable();

        let mut parents = Vec::new();
        while let Some(parent_id) = lines.peek().and_then(|line| line.strip_prefix("parent ")) {
            parents.push(ObjectId::try_parse(parent_id.to_string())?);
            lines.next();
        }

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(timestamp)
            .context("Invalid commit object: unparsable timestamp")?;

        let mut files = FileSnapshot::new();
        while let Some(entry) = lines.peek().and_then(|line| line.strip_prefix("file ")) {
            // the blob id has a fixed width, so paths may contain spaces
            anyhow::ensure!(
                entry.len() > OBJECT_ID_LENGTH + 1,
                "Invalid commit object: malformed file entry"
            );
            let (blob_id, path) = entry.split_at(OBJECT_ID_LENGTH);
            files.insert(
                path[1..].to_string(),
                ObjectId::try_parse(blob_id.to_string())?,
            );
            lines.next();
        }

        // skip the empty separator line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, message, timestamp, files))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
