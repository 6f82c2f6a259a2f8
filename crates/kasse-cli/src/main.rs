mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kasse",
    version,
    about = "Sales reports from point-of-sale receipt PDFs"
)]
struct Cli {
    /// Log parsing and categorization decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sales workbook from one or more receipt PDFs
    Report {
        /// Receipt PDFs, one per point of sale
        #[arg(required = true)]
        pdf_files: Vec<PathBuf>,

        /// Output workbook
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,

        /// Catalog JSON file (default: built-in catalog)
        #[arg(short, long, env = "KASSE_CATALOG", value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Options JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Page holding the product table (1-based)
        #[arg(short, long, env = "KASSE_TABLE_PAGE", value_name = "N")]
        page: Option<usize>,
    },
    /// Parse a receipt PDF into line items (without categorizing)
    Parse {
        /// Path to the receipt PDF
        pdf_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Options JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Page holding the product table (1-based)
        #[arg(short, long, env = "KASSE_TABLE_PAGE", value_name = "N")]
        page: Option<usize>,
    },
    /// Inspect and validate product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Serve the upload form and report endpoint over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,

        /// Catalog JSON file (default: built-in catalog)
        #[arg(short, long, env = "KASSE_CATALOG", value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Options JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print a catalog's categories and patterns
    Show {
        /// Catalog JSON file (default: built-in catalog)
        #[arg(short, long, env = "KASSE_CATALOG", value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Validate a catalog file
    Validate {
        /// Path to catalog JSON file
        file: PathBuf,
    },
    /// Print the catalog file format with an example
    Schema,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Report {
            pdf_files,
            out,
            catalog,
            config,
            page,
        } => commands::report::run(pdf_files, out, catalog, config, page),
        Commands::Parse {
            pdf_file,
            output,
            config,
            page,
        } => commands::parse::run(pdf_file, &output, config, page),
        Commands::Catalog { action } => match action {
            CatalogAction::Show { catalog, output } => {
                commands::catalog::show(catalog.as_deref(), &output)
            }
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
            CatalogAction::Schema => commands::catalog::schema(),
        },
        Commands::Serve {
            bind,
            catalog,
            config,
        } => commands::serve::run(&bind, catalog, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
