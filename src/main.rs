#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A self-contained version-control engine",
    long_about = "This is a self-contained, single-user version-control system \
    operating on one working directory. It records content snapshots of files, \
    arranges them as a graph of commits, and supports branching, history \
    inspection, checkout, reset, and three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Stage a file's current content")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Create a new commit with the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or mark it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit on every branch")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch to another branch",
        long_about = "Three forms are accepted: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from the HEAD commit, and \
        `checkout <commit-id> -- <file>` restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file follows")]
        revision: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore, separated by --")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1, help = "The target commit id, full or abbreviated")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

fn main() {
    if std::env::args().len() < 2 {
        println!("{}", GitletError::NoCommand);
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // every rejected argv shape maps onto the closed diagnostic set
            let diagnostic = match error.kind() {
                clap::error::ErrorKind::InvalidSubcommand => GitletError::UnknownCommand,
                _ => GitletError::BadOperands,
            };
            println!("{}", diagnostic);
            return;
        }
    };

    if let Err(error) = run(cli) {
        match error.downcast_ref::<GitletError>() {
            // user-visible failures print their line and exit 0
            Some(diagnostic) => println!("{}", diagnostic),
            None => {
                eprintln!("{:#}", error);
                std::process::exit(1);
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) {
        repository.check_initialized()?;
    }

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => {
            if message.is_empty() {
                return Err(GitletError::EmptyCommitMessage.into());
            }
            repository.commit(message)
        }
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => {
            if message.is_empty() {
                return Err(GitletError::NoSuchMessage.into());
            }
            repository.find(message)
        }
        Commands::Status => repository.status(),
        Commands::Checkout { revision, file } => match (revision, file) {
            (None, Some(file)) => repository.checkout_file(file),
            (Some(commit_id), Some(file)) => repository.checkout_file_at(commit_id, file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => Err(GitletError::BadOperands.into()),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit_id } => repository.reset(commit_id),
        Commands::Merge { branch } => repository.merge(branch),
    }
}
