//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create an empty repository with its root commit
//! - `add` / `rm`: Stage additions and removals
//! - `commit`: Record the staged snapshot
//! - `log` / `global-log` / `find`: Inspect history
//! - `status`: Show branches, staged changes and the working tree
//! - `checkout`: Restore files or switch branches
//! - `branch` / `rm-branch`: Manage branch pointers
//! - `reset`: Move the current branch to another commit
//! - `merge`: Three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
