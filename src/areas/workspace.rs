//! Working tree access
//!
//! All paths are repository-relative strings, the same form they carry in
//! commit snapshots and the staging area. The repository directory itself is
//! never listed.

use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".lit", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: &Path) -> Self {
        Workspace { path: path.into() }
    }

    /// All files in the working tree, as sorted repository-relative paths
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<String> {
        if path.is_file() && !Self::is_ignored(path.strip_prefix(self.path.as_ref()).ok()?) {
            Some(
                path.strip_prefix(self.path.as_ref())
                    .ok()?
                    .to_string_lossy()
                    .into_owned(),
            )
        } else {
            None
        }
    }

    /// Read a file's content, `None` if it does not exist
    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let file_path = self.path.join(file_path);

        if !file_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;
        Ok(Some(content))
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Unable to create directory {}",
                parent.display()
            ))?;
        }

        std::fs::write(&file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a file if it exists; missing files are not an error
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to remove file {}", file_path.display()))?;
        }

        Ok(())
    }
}
