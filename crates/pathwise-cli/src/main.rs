//! pathwise CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::path::PathFormat;
use commands::score::ScoreFormat;

#[derive(Parser)]
#[command(
    name = "pathwise",
    version,
    about = "Adaptive assessment scoring and personalized learning paths"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a learner's answers against a question bank
    Score {
        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// JSON object mapping question id to answer (string or array of strings)
        #[arg(long)]
        answers: PathBuf,

        /// Learner identifier
        #[arg(long)]
        learner: String,

        /// Directory results are saved to (defaults to the configured one)
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ScoreFormat,

        /// Do not save the result
        #[arg(long)]
        no_save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the personalized learning path for a result
    Path {
        /// Course identifier
        #[arg(long)]
        course: String,

        /// Catalog directory (defaults to the configured one)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Result JSON file to personalize from
        #[arg(long, conflicts_with = "learner")]
        result: Option<PathBuf>,

        /// Use this learner's latest stored result
        #[arg(long, required_unless_present = "result")]
        learner: Option<String>,

        /// Directory of stored results (defaults to the configured one)
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: PathFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List a learner's stored results for a course
    History {
        /// Learner identifier
        #[arg(long)]
        learner: String,

        /// Course identifier
        #[arg(long)]
        course: String,

        /// Directory of stored results (defaults to the configured one)
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank and catalog TOML files
    Validate {
        /// Question bank file or directory
        #[arg(long, required_unless_present = "catalog")]
        questions: Option<PathBuf>,

        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create starter config, question bank and catalog
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pathwise=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            bank,
            answers,
            learner,
            results_dir,
            format,
            no_save,
            config,
        } => {
            commands::score::execute(commands::score::ScoreArgs {
                bank,
                answers,
                learner,
                results_dir,
                format,
                no_save,
                config,
            })
            .await
        }
        Commands::Path {
            course,
            catalog,
            result,
            learner,
            results_dir,
            format,
            config,
        } => {
            commands::path::execute(commands::path::PathArgs {
                course,
                catalog,
                result,
                learner,
                results_dir,
                format,
                config,
            })
            .await
        }
        Commands::History {
            learner,
            course,
            results_dir,
            config,
        } => commands::history::execute(learner, course, results_dir, config).await,
        Commands::Validate { questions, catalog } => commands::validate::execute(questions, catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
