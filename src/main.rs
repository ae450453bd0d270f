use anyhow::Result;
use clap::{Parser, Subcommand};
use plumb::areas::repository::Repository;
use plumb::commands::plumbing::cat_file::CatFileMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "plumb",
    version,
    about = "A minimal content-addressable object store",
    long_about = "Stores files as content-addressed objects, snapshots a staging index \
    into commits and writes stored trees back to disk.",
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
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object store"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "cat-file", about = "Print the content or kind of an object")]
    CatFile {
        #[arg(
            short = 'p',
            conflicts_with = "kind",
            required_unless_present = "kind",
            help = "Pretty-print the object's content"
        )]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's kind")]
        kind: bool,
        #[arg(index = 1, help = "Object ID or HEAD")]
        object: String,
    },
    #[command(name = "ls-tree", about = "List the entries of a tree")]
    LsTree {
        #[arg(index = 1, help = "Tree or commit ID, or HEAD")]
        tree_ish: String,
    },
    #[command(name = "add", about = "Stage files for the next commit")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging index into a new commit whose parent is the current tip."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show first-parent commit history")]
    Log {
        #[arg(index = 1, help = "Commit to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Write a commit's tree into the working directory",
        long_about = "This command materializes the tree of the given commit. \
        Refs and the staging index are not changed."
    )]
    Checkout {
        #[arg(index = 1, help = "Commit or tree ID, or HEAD")]
        target: String,
        #[arg(long, help = "Directory to write into instead of the working directory")]
        into: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let repository_path = match &cli.command {
        Commands::Init { path: Some(path) } => pwd.join(path),
        _ => pwd,
    };
    let repository = Repository::new(&repository_path, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::HashObject { write, file } => repository.hash_object(file, *write)?,
        Commands::CatFile { kind, object, .. } => {
            let mode = if *kind {
                CatFileMode::Type
            } else {
                CatFileMode::Pretty
            };
            repository.cat_file(object, mode)?
        }
        Commands::LsTree { tree_ish } => repository.ls_tree(tree_ish)?,
        Commands::Add { paths } => repository.add(paths)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Log { revision } => repository.log(revision.as_deref())?,
        Commands::Checkout { target, into } => repository.checkout(target, into.as_deref())?,
    }

    Ok(())
}
