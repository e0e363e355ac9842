use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

impl Repository {
    /// Print branches, staged changes and the working tree state
    ///
    /// Sections appear in a fixed order and every entry is sorted, so the
    /// output is stable for a given repository state.
    pub fn status(&mut self) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head = self.graph().load(state.branches.current_head())?;

        let working_files = self.workspace().list_files()?;

        // entry name to "(modified)" / "(deleted)" suffix
        let mut unstaged = BTreeMap::new();
        let mut untracked = BTreeSet::new();

        for path in &working_files {
            let content = self.workspace().read_file(path)?.unwrap_or_default();

            if state.staging.removed().contains_key(path) {
                // removed and then re-created by hand
                untracked.insert(path.clone());
            } else if let Some(staged_content) = state.staging.added().get(path) {
                if &content != staged_content {
                    unstaged.insert(path.clone(), "(modified)");
                }
            } else if let Some(tracked_id) = head.blob_id(path) {
                if &Blob::from_slice(&content).object_id()? != tracked_id {
                    unstaged.insert(path.clone(), "(modified)");
                }
            } else {
                untracked.insert(path.clone());
            }
        }

        let working_set = working_files.iter().collect::<BTreeSet<_>>();
        for path in state.staging.added().keys() {
            if !working_set.contains(path) {
                unstaged.insert(path.clone(), "(deleted)");
            }
        }
        for path in head.files().keys() {
            let pending_removal = state.staging.removed().contains_key(path);
            if !pending_removal && !working_set.contains(path) {
                unstaged.insert(path.clone(), "(deleted)");
            }
        }

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for name in state.branches.names() {
            let marker = if name == state.branches.current() {
                "*"
            } else {
                ""
            };
            writeln!(writer, "{}{}", marker, name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in state.staging.added().keys() {
            writeln!(writer, "{}", path)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in state.staging.removed().keys() {
            writeln!(writer, "{}", path)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, suffix) in &unstaged {
            writeln!(writer, "{} {}", path, suffix)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &untracked {
            writeln!(writer, "{}", path)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
