//! Repository handle
//!
//! Owns the working directory path and the areas built on it, plus the
//! output writer commands print through. Commands are implemented as
//! `impl Repository` blocks under `crate::commands`.

use crate::areas::database::Database;
use crate::areas::state::RepoState;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::CheckoutEngine;
use crate::artifacts::errors::LitError;
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::merge::MergeEngine;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub const REPO_DIR: &str = ".lit";
pub const DEFAULT_BRANCH: &str = "master";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let database = Database::new(&path.join(REPO_DIR));
        let workspace = Workspace::new(&path);

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
        })
    }

    pub fn repo_path(&self) -> PathBuf {
        self.path.join(REPO_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.repo_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(LitError::NotInitialized.into());
        }
        Ok(())
    }

    pub fn load_state(&self) -> anyhow::Result<RepoState> {
        self.ensure_initialized()?;
        RepoState::load(&self.repo_path())
    }

    pub fn save_state(&self, state: &RepoState) -> anyhow::Result<()> {
        state.save(&self.repo_path())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn graph(&'_ self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    pub fn checkout_engine(&'_ self) -> CheckoutEngine<'_> {
        CheckoutEngine::new(&self.database, &self.workspace)
    }

    pub fn merge_engine(&'_ self) -> MergeEngine<'_> {
        MergeEngine::new(&self.database, &self.workspace)
    }
}
