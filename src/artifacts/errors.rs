//! User-facing failure conditions
//!
//! Every variant carries the exact message printed to the user. Internal
//! failures (corrupt objects, io errors) stay as `anyhow` errors and are not
//! part of this taxonomy.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LitError {
    #[error("Not in an initialized Lit directory.")]
    NotInitialized,
    #[error("A Lit version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("No object with that ID exists.")]
    ObjectNotFound,
    #[error("No commit with that ID exists.")]
    NoSuchCommit,
    #[error("Ambiguous commit ID.")]
    AmbiguousCommitId,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("File does not exist.")]
    FileMissingInWorkingTree,
    #[error("No changes added to the commit.")]
    NoChangesToCommit,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,
    #[error("No such branch exists.")]
    NoSuchBranchToCheckout,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("You have uncommitted changes.")]
    DirtyWorkingState,
    #[error("Given branch is an ancestor of the current branch.")]
    BranchIsAncestor,
    #[error("Could not find split point.")]
    NoSplitPoint,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileWouldBeOverwritten,
    #[error("Found no commit with that message.")]
    NoSuchCommitMessage,
    #[error("A commit cannot have more than two parents.")]
    TooManyParents,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
}
