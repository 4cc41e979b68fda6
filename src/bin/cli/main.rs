mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "recall",
    about = "Spaced-repetition flashcards (SM-2)",
    version,
    after_help = "Categories: dev, concept, tool, workflow, debug, general\n\n\
Quality ratings for review:\n  \
0: Complete blackout\n  \
1: Wrong, but recognized answer\n  \
2: Wrong, answer seemed familiar\n  \
3: Correct with difficulty\n  \
4: Correct with hesitation\n  \
5: Perfect recall"
)]
struct Cli {
    /// Collection file (overrides RECALL_DATA_FILE and the config file)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file (default: <config dir>/recall/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show cards due for review
    #[command(alias = "today")]
    Due {
        /// Maximum cards to show (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Only cards in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Include answers
        #[arg(long)]
        show_answers: bool,
        /// Include card ids
        #[arg(long)]
        show_ids: bool,
    },

    /// Add a new card
    Add {
        question: String,
        answer: String,
        /// Category (default: general)
        #[arg(short, long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
        /// Source file or URL the card relates to
        #[arg(short, long)]
        source: Option<String>,
    },

    /// List all cards
    List {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        show_answers: bool,
        #[arg(long)]
        show_ids: bool,
    },

    /// Show review statistics
    Stats,

    /// Interactive quiz over due cards
    Quiz {
        #[arg(short, long)]
        category: Option<String>,
        /// Stop after this many cards
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show a random card
    Random {
        #[arg(short, long)]
        category: Option<String>,
        /// Prefer cards whose source contains one of these
        #[arg(long, num_args = 1..)]
        from_files: Vec<String>,
        /// Show nothing when --from-files matches no card
        #[arg(long)]
        no_fallback: bool,
    },

    /// Export cards to markdown
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import cards from a markdown file
    Import { file: PathBuf },

    /// Delete a card by id
    Delete { id: String },

    /// Review a specific card
    Review {
        id: String,
        /// Recall quality 0-5
        #[arg(allow_hyphen_values = true)]
        quality: i64,
    },

    /// One-line summary for shell start-up
    Digest,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.config.as_deref(), cli.data_file.as_deref())?;
    let use_color = !cli.no_color && app.config.color && std::io::stdout().is_terminal();
    let format = &cli.format;

    match cli.command {
        None => commands::summary::run(&app, format)?,
        Some(Command::Due { limit, category, show_answers, show_ids }) => {
            let limit = limit.unwrap_or(app.config.default_limit);
            commands::due::run(&app, limit, category.as_deref(), show_answers, show_ids, format, use_color)?;
        }
        Some(Command::Add { question, answer, category, tags, source }) => {
            commands::add::run(&app, question, answer, category.as_deref(), tags.as_deref(), source, format)?;
        }
        Some(Command::List { category, show_answers, show_ids }) => {
            commands::list::run(&app, category.as_deref(), show_answers, show_ids, format, use_color)?;
        }
        Some(Command::Stats) => commands::stats::run(&app, format)?,
        Some(Command::Quiz { category, limit }) => {
            commands::quiz::run(&app, category.as_deref(), limit, use_color)?;
        }
        Some(Command::Random { category, from_files, no_fallback }) => {
            commands::random::run(&app, category.as_deref(), from_files, no_fallback, format, use_color)?;
        }
        Some(Command::Export { output }) => commands::export::run(&app, output.as_deref())?,
        Some(Command::Import { file }) => commands::import::run(&app, &file, format)?,
        Some(Command::Delete { id }) => commands::delete::run(&app, &id, format)?,
        Some(Command::Review { id, quality }) => commands::review::run(&app, &id, quality, format)?,
        Some(Command::Digest) => commands::digest::run(&app, format)?,
    }

    Ok(())
}
