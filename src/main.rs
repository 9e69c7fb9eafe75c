//! Page components in the app all need the same shell: navigation for their
//! area, the signed-in user, the footer. Rather than editing every page by
//! hand, this tool finds the markup each page returns and wraps it in the
//! layout element, choosing the area from the directory the page lives in.
//! Pages that already carry the layout are skipped, so it is safe to re-run
//! after adding new pages to the list.
use anyhow::Result;
use clap::{Parser, Subcommand};
use layout_wrap::utils;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "layout-wrap")]
#[command(version)]
#[command(about = "Wraps the markup returned by page components in a role-aware layout")]
struct Cli {
    /// Directory the configured file paths are relative to
    /// (defaults to the enclosing Git work tree)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable debug logging and detailed report lines
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init,
    /// Wrap every file in the configured list
    Run {
        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the wrapped text of a single file without writing it
    Preview { file: String },
    /// Print the category each path would be assigned
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Check the configuration for problems
    Validate,
    /// List configured files with their categories
    List,
    /// Add files to the list
    Add {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Remove files from the list
    Remove {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Add every path from a newline-delimited list file
    Import { list_file: PathBuf },
    /// Write the effective configuration to a file
    Export {
        out: PathBuf,
        /// toml, json or yaml
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let root = cli.root.as_deref();
    match cli.command {
        Commands::Init => utils::initialize_repository(root),
        Commands::Run { dry_run } => utils::run(root, dry_run, cli.verbose),
        Commands::Preview { file } => utils::preview(root, &file),
        Commands::Classify { paths } => utils::classify_paths(root, &paths),
        Commands::Validate => utils::validate(root),
        Commands::List => utils::list_files(root),
        Commands::Add { files } => utils::add_files(root, files),
        Commands::Remove { files } => utils::remove_files(root, &files),
        Commands::Import { list_file } => utils::import_files(root, &list_file),
        Commands::Export { out, format } => utils::export_config(root, &out, &format),
    }
}
