//! schedule - load a course schedule and query it
//!
//! Usage:
//!   schedule [--file <PATH>] [--backend bst|avl] <COMMAND>

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schedule_tree::{Backend, Schedule, ScheduleItem};

#[derive(Parser)]
#[command(name = "schedule")]
#[command(about = "Index a course schedule in a binary search tree or an AVL tree")]
struct Cli {
    /// Comma separated course file with a header row
    #[arg(short, long, default_value = "courses_2023.csv")]
    file: PathBuf,

    /// Tree backend used for queries
    #[arg(long, value_enum, default_value_t = BackendArg::Avl)]
    backend: BackendArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the file into both backends and print their heights
    Heights,
    /// List all courses in key order
    List,
    /// List the courses of a subject, optionally narrowed to one catalog number
    Subject { subject: String, catalog: Option<String> },
    /// List the courses whose instructor name contains the given text
    Instructor { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Bst,
    Avl,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Bst => Backend::Bst,
            BackendArg::Avl => Backend::Avl,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schedule_tree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Heights => {
            let bst = load(&cli.file, Backend::Bst)?;
            let avl = load(&cli.file, Backend::Avl)?;
            println!("BST height = {}", bst.tree_height());
            println!("AVL height = {}", avl.tree_height());
        }
        Commands::List => {
            let schedule = load(&cli.file, cli.backend.into())?;
            print_items(&schedule.list_all_courses());
        }
        Commands::Subject { subject, catalog } => {
            let schedule = load(&cli.file, cli.backend.into())?;
            let items = match catalog {
                Some(catalog) => schedule.search_by_subject_catalog(&subject, &catalog),
                None => schedule.search_by_subject(&subject),
            };
            print_items(&items);
        }
        Commands::Instructor { name } => {
            let schedule = load(&cli.file, cli.backend.into())?;
            print_items(&schedule.search_by_instructor(&name));
        }
    }
    Ok(())
}

fn load(path: &Path, backend: Backend) -> anyhow::Result<Schedule> {
    let mut schedule = Schedule::new(backend);
    schedule
        .load_from_path(path)
        .with_context(|| format!("Failed to load schedule into {backend} backend"))?;
    Ok(schedule)
}

fn print_items(items: &[&ScheduleItem]) {
    for item in items {
        println!("{item}");
    }
    tracing::info!(matches = items.len(), "query finished");
}
