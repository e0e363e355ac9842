use anyhow::Result;
use clap::{Parser, Subcommand};
use lit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "lit",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "Lit is a small, single-user version-control system. \
    It tracks whole-file snapshots in a content-addressed store under .lit \
    and supports branching and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory, \
        with a single master branch pointing at an empty root commit."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for addition")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message"
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Stage a file for removal and delete it from the working tree"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current branch, newest first"
    )]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with a given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged changes and the working tree state"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch to another branch",
        long_about = "Three forms are supported: \
        `checkout -- <file>` restores a file from the head commit, \
        `checkout <commit> -- <file>` restores it from a given commit, \
        and `checkout <branch>` switches branches."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name or a commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        path: Option<String>,
    },
    #[command(name = "branch", about = "Create a new branch at the current head")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to an arbitrary commit"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id, full or a unique prefix")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { path } => repository.add(path)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Rm { path } => repository.rm(path)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, path } => match (target, path) {
            (None, Some(path)) => repository.checkout_head_file(path)?,
            (Some(commit), Some(path)) => repository.checkout_commit_file(commit, path)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => anyhow::bail!("Nothing to check out."),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    Ok(())
}
