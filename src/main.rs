use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use reverie::cli::{self, prompt::PromptSource, Session};
use reverie::config::ReverieConfig;
use reverie::server;

#[derive(Parser)]
#[command(name = "reverie", version, about = "Personal journal with AI prompts, feedback and search")]
struct Cli {
    /// Journal directory to use for this invocation (one `<id>.json` per entry).
    /// Without it, entries live in the fallback store.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP journal server
    Serve,
    #[command(flatten)]
    Journal(JournalCommand),
}

#[derive(Subcommand)]
enum JournalCommand {
    /// List entries, newest first
    List,
    /// Add an entry
    Add {
        #[arg(short, long, default_value = "")]
        title: String,
        /// Entry text (may contain HTML)
        content: String,
    },
    /// Compose an entry from dictated lines on stdin
    Write {
        #[arg(short, long, default_value = "")]
        title: String,
        /// Open the entry with an AI prompt from this category
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Delete an entry by id
    Delete { id: String },
    /// Search entries
    Search {
        query: String,
        /// Rank entries with the AI assistant instead of substring matching
        #[arg(long)]
        semantic: bool,
    },
    /// Get a writing prompt
    Prompt {
        /// reflection, gratitude, growth, goals or creativity
        #[arg(short, long)]
        category: Option<String>,
        /// Pick the n-th built-in prompt of the category
        #[arg(long, default_value_t = 0)]
        seed: usize,
        /// Build a prompt around a random quote
        #[arg(long, conflicts_with = "ai")]
        quote: bool,
        /// Ask the AI assistant for a prompt
        #[arg(long)]
        ai: bool,
    },
    /// Ask the AI assistant for feedback on an entry
    Feedback { id: String },
    /// Export an entry as a plain-text file
    Export {
        id: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ReverieConfig::load()?;

    // Log to stderr so command output on stdout stays clean.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = match cli.command {
        Command::Serve => return server::serve(config).await,
        Command::Journal(command) => command,
    };

    let mut session = Session::open(&config, cli.dir.as_deref()).await?;

    match command {
        JournalCommand::List => cli::entries::list(&session)?,
        JournalCommand::Add { title, content } => cli::entries::add(&mut session, &title, &content).await?,
        JournalCommand::Write { title, prompt } => {
            cli::entries::write(&mut session, &title, prompt.as_deref()).await?
        }
        JournalCommand::Delete { id } => cli::entries::delete(&mut session, &id).await?,
        JournalCommand::Search { query, semantic } => cli::search::search(&session, &query, semantic).await?,
        JournalCommand::Prompt {
            category,
            seed,
            quote,
            ai,
        } => {
            let source = if quote {
                PromptSource::Quote
            } else if ai {
                PromptSource::Ai
            } else {
                PromptSource::Catalog { seed }
            };
            cli::prompt::prompt(&session, category.as_deref(), source).await?
        }
        JournalCommand::Feedback { id } => cli::prompt::feedback(&session, &id).await?,
        JournalCommand::Export { id, out } => cli::entries::export(&session, &id, &out).await?,
    }

    Ok(())
}
