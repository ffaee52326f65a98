//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::search::{Filter, ALL_TAG};
use folio::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content pipeline for a portfolio and MDX blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, projects or tags
    #[command(alias = "ls")]
    List {
        /// Type of content to list (posts, projects, tags)
        #[arg(default_value = "posts")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Filter posts or projects by tag and text
    Search {
        /// Collection to search (posts, projects)
        collection: String,

        /// Case-insensitive text to look for
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact tag to keep
        #[arg(short, long, default_value = ALL_TAG)]
        tag: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compile a post and print its HTML
    Show {
        /// Post slug (file name without extension)
        slug: String,

        /// Require title, date and summary in the front matter
        #[arg(long)]
        strict: bool,
    },

    /// Show a single project
    Project {
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// One-line summary
        #[arg(short, long)]
        summary: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let found = match cli.command {
        Commands::List { r#type, json } => {
            let folio = Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type, json)?;
            true
        }

        Commands::Search {
            collection,
            query,
            tag,
            json,
        } => {
            let folio = Folio::new(&base_dir)?;
            let filter = Filter::new(&query, &tag);
            folio::commands::search::run(&folio, &collection, &filter, json)?;
            true
        }

        Commands::Show { slug, strict } => {
            let folio = Folio::new(&base_dir)?;
            folio::commands::show::run(&folio, &slug, strict)?
        }

        Commands::Project { slug, json } => folio::commands::project::run(&slug, json)?,

        Commands::New {
            title,
            tags,
            summary,
        } => {
            let folio = Folio::new(&base_dir)?;
            let tags: Vec<String> = tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            tracing::debug!("Creating new post with title: {}", title);
            folio::commands::new::run(&folio, &title, &tags, summary.as_deref())?;
            true
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
            true
        }
    };

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
