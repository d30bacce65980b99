use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pawprint::config::SearchFormat;
use pawprint::runner::{
    effective_dry_run, load_catalog, run_audit_command, run_prune_command, run_routes_command,
    run_search,
};
use pawprint::utils::image::{VariantOptions, convert_image};
use pawprint::{AuditConfig, PawprintConfig};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSearchFormat {
    Plain,
    Html,
    Json,
}

impl From<CliSearchFormat> for SearchFormat {
    fn from(f: CliSearchFormat) -> Self {
        match f {
            CliSearchFormat::Plain => SearchFormat::Plain,
            CliSearchFormat::Html => SearchFormat::Html,
            CliSearchFormat::Json => SearchFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Search, audit and asset tooling for the pet-care site", long_about = None)]
struct Args {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search site pages and print ranked, highlighted results
    Search {
        /// Free-text query (may be empty)
        query: Vec<String>,

        /// Document catalog (TOML or JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<CliSearchFormat>,
    },
    /// Find source files nothing imports and write a report plus candidates JSON
    Audit {
        /// Markdown report path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Candidates JSON path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Show a progress bar while scanning
        #[arg(long)]
        progress: bool,
    },
    /// Delete safe candidates listed by `audit` (always writes a plan)
    Prune {
        /// Only write the plan
        #[arg(long)]
        dry_run: bool,

        /// Candidates JSON path
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Deletion plan path
        #[arg(long)]
        plan: Option<PathBuf>,
    },
    /// List page and route-handler URLs from the app directory
    Routes,
    /// Write resized variants and a base64 placeholder next to an image
    Images {
        /// Source image
        path: PathBuf,

        /// Target widths, comma separated
        #[arg(long, value_delimiter = ',')]
        widths: Vec<u32>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // 1. Load from file or default
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let mut config = PawprintConfig::load_from_dir(&root).unwrap_or_default();

    // 2. Override with CLI args
    config.audit.project_root = root;
    let audit: AuditConfig = config.audit;

    match args.command {
        Command::Search {
            query,
            catalog,
            format,
        } => {
            let catalog_path =
                catalog.or_else(|| config.search.catalog.map(|c| audit.project_root.join(c)));
            let catalog = load_catalog(catalog_path.as_deref())?;
            let format = format.map(Into::into).unwrap_or(config.search.format);
            print!("{}", run_search(&catalog, &query.join(" "), format)?);
        }
        Command::Audit {
            report,
            json,
            progress,
        } => {
            let report = run_audit_command(&audit, report, json, progress)?;
            println!("{}", report);
        }
        Command::Prune {
            dry_run,
            candidates,
            plan,
        } => {
            let dry_run = effective_dry_run(dry_run, std::io::stdin().is_terminal());
            let summary = run_prune_command(&audit, candidates, plan, dry_run)?;
            if summary.dry_run {
                println!("Dry run: no files removed. See the deletion plan.");
            } else {
                println!(
                    "Deleted {} file(s), {} failure(s).",
                    summary.deleted.len(),
                    summary.failed.len()
                );
            }
        }
        Command::Routes => {
            for route in run_routes_command(&audit)? {
                println!("{}", route);
            }
        }
        Command::Images { path, widths } => {
            let mut options = VariantOptions::default();
            if !widths.is_empty() {
                options.widths = widths;
            }
            let variants = convert_image(&path, &options)?;
            for file in &variants.files {
                println!("{}", file.display());
            }
            println!("{}", variants.placeholder.display());
        }
    }

    Ok(())
}
