mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use pdfnamer_core::config::FilenameStyle;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdfnamer",
    version,
    about = "Rename contract summary PDFs after the customer they concern"
)]
struct Cli {
    /// Log heuristic decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename a batch of PDFs and pack them into a zip archive
    Rename {
        /// PDF files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Zip archive to write
        #[arg(short = 'O', long = "out", value_name = "FILE", default_value = "umbenannte_pdfs.zip")]
        out: PathBuf,

        /// Also write renamed copies into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Override the profile's filename style
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Skip OCR for pages without embedded text
        #[arg(long)]
        no_ocr: bool,

        /// Disable the entity recognition step
        #[arg(long)]
        no_entities: bool,

        /// Use NAME for the file ORIGINAL instead of extracting it (repeatable)
        #[arg(long = "set", value_name = "ORIGINAL=NAME")]
        set: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the JSON report to a file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Show what every heuristic finds in a single PDF
    Inspect {
        /// Path to PDF file
        input_file: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Skip OCR for pages without embedded text
        #[arg(long)]
        no_ocr: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect naming profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(clap::Args)]
struct ProfileArgs {
    /// Custom JSON profile
    #[arg(short, long = "config", value_name = "FILE", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Predefined profile: vertragsauskunft (default), kompakt
    #[arg(short, long = "preset", value_name = "NAME")]
    preset: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Spaced,
    Compact,
}

impl From<StyleArg> for FilenameStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Spaced => FilenameStyle::Spaced,
            StyleArg::Compact => FilenameStyle::Compact,
        }
    }
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Print a predefined profile as JSON
    Show {
        /// Preset name (e.g., "kompakt")
        name: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Rename {
            files,
            out,
            out_dir,
            profile,
            style,
            no_ocr,
            no_entities,
            set,
            output,
            report,
        } => commands::rename::run(commands::rename::RenameArgs {
            files,
            archive: out,
            out_dir,
            config: profile.config,
            preset: profile.preset,
            style: style.map(FilenameStyle::from),
            ocr: !no_ocr,
            entities: !no_entities,
            overrides: set,
            output_format: output,
            report,
        }),
        Commands::Inspect {
            input_file,
            profile,
            no_ocr,
            output,
        } => commands::inspect::run(input_file, profile.config, profile.preset, !no_ocr, &output),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { name } => commands::profiles::show(&name),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
