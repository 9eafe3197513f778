use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use colored::Colorize;
use jit::areas::repository::Repository;
use jit::commands::plumbing::cat_file::CatFileMode;
use jit::config::{Config, JIT_DIR_ENV, JIT_LOG_ENV};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A content-addressable object store with a staging index",
    long_about = "jit keeps file contents in a content-addressable object store \
    and records staged files in an append-only index. \
    It covers the storage layer of a version control system, not history.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = JIT_DIR_ENV,
        value_name = "PATH",
        help = "The repository directory, relative to the working tree (default: .jit)"
    )]
    jit_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the repository directory in the current directory or at the specified path. \
        It fails if the repository directory already exists."
    )]
    Init {
        #[arg(index = 1, help = "The working tree to initialize")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Store a file as a blob and print its id",
        long_about = "This command frames the file content as a blob, writes it to the object store \
        and prints the 40 character object id."
    )]
    HashObject {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, kind or size of an object",
        long_about = "This command reads an object from the store by its 40 character id. \
        Exactly one of -p, -t or -s selects what is printed."
    )]
    #[command(group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"])))]
    CatFile {
        #[arg(short = 'p', help = "Print the raw payload")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object kind")]
        kind: bool,
        #[arg(short = 's', help = "Print the payload size in bytes")]
        size: bool,
        #[arg(long, help = "Check the stored bytes against the object id first")]
        verify: bool,
        #[arg(index = 1)]
        oid: String,
    },
    #[command(
        name = "add",
        about = "Store files and stage them in the index",
        long_about = "This command stores every named file, or every file beneath a named directory, \
        as a blob and appends one entry per file to the index."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to add")]
        paths: Vec<String>,
    },
    #[command(
        name = "ls-files",
        about = "List staged files",
        long_about = "This command lists the latest staged entry for each path in name order."
    )]
    LsFiles {
        #[arg(long, help = "Show mode and object id for each entry")]
        stage: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(JIT_LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_repository(work_dir: PathBuf, jit_dir: Option<&PathBuf>) -> Result<Repository> {
    let config = match jit_dir {
        Some(jit_dir) => Config::new(work_dir).with_jit_dir(jit_dir),
        None => Config::new(work_dir),
    };

    Ok(Repository::new(config, Box::new(std::io::stdout()))?)
}

fn run(cli: &Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let jit_dir = cli.jit_dir.as_ref();

    let repository = match &cli.command {
        Commands::Init { path } => {
            let work_dir = path.as_ref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
            let repository = open_repository(work_dir, jit_dir)?;

            repository.init()?;
            repository
        }
        Commands::HashObject { file } => {
            let repository = open_repository(pwd, jit_dir)?;

            repository.hash_object(file)?;
            repository
        }
        Commands::CatFile {
            pretty: _,
            kind,
            size,
            verify,
            oid,
        } => {
            let repository = open_repository(pwd, jit_dir)?;
            let mode = if *kind {
                CatFileMode::Type
            } else if *size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };

            repository.cat_file(oid, mode, *verify)?;
            repository
        }
        Commands::Add { paths } => {
            let repository = open_repository(pwd, jit_dir)?;

            repository.add(paths)?;
            repository
        }
        Commands::LsFiles { stage } => {
            let repository = open_repository(pwd, jit_dir)?;

            repository.ls_files(*stage)?;
            repository
        }
    };

    repository.writer().flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
