//! Object database
//!
//! Content-addressed storage under the repository directory. Blobs live in
//! `objects/`, commits in `commits/`, both fanned out by the first two id
//! characters and zlib-compressed. Writes go to a temp file first and are
//! renamed into place, so a crash never leaves a half-written object.

use crate::artifacts::errors::LitError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: &Path) -> Self {
        Database { path: path.into() }
    }

    /// Create the container directories
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            std::fs::create_dir_all(self.path.join(object_type.container_dir()))?;
        }
        Ok(())
    }

    /// Store an object, returning its id
    ///
    /// Storing is idempotent: an object that already exists on disk is left
    /// untouched.
    pub fn store<O: Object>(&self, object: &O) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self
            .parse_object_as_bytes(ObjectType::Blob, object_id)
            .map_err(|_| LitError::ObjectNotFound)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            _ => Err(LitError::ObjectNotFound.into()),
        }
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self
            .parse_object_as_bytes(ObjectType::Commit, object_id)
            .map_err(|_| LitError::NoSuchCommit)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            _ => Err(LitError::NoSuchCommit.into()),
        }
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// For prefixes of two or more characters only the matching fan-out
    /// directory is scanned; shorter prefixes scan all of them.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let container = self.path.join(ObjectType::Commit.container_dir());
        let mut matches = Vec::new();

        // ids are ASCII hex, so anything else can never match
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(matches);
        }

        if prefix.len() >= 2 {
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            Self::scan_fanout_dir(&container.join(dir_name), dir_name, &mut |full_oid| {
                full_oid[2..].starts_with(file_prefix)
            }, &mut matches)?;
        } else {
            for i in 0..=255 {
                let dir_name = format!("{:02x}", i);
                Self::scan_fanout_dir(&container.join(&dir_name), &dir_name, &mut |full_oid| {
                    full_oid.starts_with(prefix)
                }, &mut matches)?;
            }
        }

        Ok(matches)
    }

    /// Every commit id in the database
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let container = self.path.join(ObjectType::Commit.container_dir());
        let mut commits = Vec::new();

        for i in 0..=255 {
            let dir_name = format!("{:02x}", i);
            Self::scan_fanout_dir(&container.join(&dir_name), &dir_name, &mut |_| true, &mut commits)?;
        }

        Ok(commits)
    }

    fn scan_fanout_dir(
        dir_path: &Path,
        dir_name: &str,
        keep: &mut impl FnMut(&str) -> bool,
        matches: &mut Vec<ObjectId>,
    ) -> anyhow::Result<()> {
        if !dir_path.is_dir() {
            return Ok(());
        }

        for entry in std::fs::read_dir(dir_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let full_oid = format!("{}{}", dir_name, file_name.to_string_lossy());

            if keep(&full_oid)
                && let Ok(oid) = ObjectId::try_parse(full_oid)
            {
                matches.push(oid);
            }
        }

        Ok(())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl std::io::BufRead)> {
        let object_path = self
            .path
            .join(expected_type.container_dir())
            .join(object_id.to_path());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
