use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use jpg_datename_core::{
    app_paths, init_config, load_config, run_batch_with, BatchReport, RenameOptions,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jpg-datename-cli")]
#[command(about = "Rename JPG files after the DateTime stored in their EXIF data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Directory holding the pictures
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Include subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,
    /// Display old and new file names
    #[arg(short, long)]
    verbose: bool,
    /// Don't rename any files, generally used with -v
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Don't complain about files that can't be renamed
    #[arg(short, long)]
    quiet: bool,
    #[arg(long)]
    include_hidden: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = load_config()?;
    let defaults = config.rename_options(args.dir);
    let options = RenameOptions {
        recursive: defaults.recursive || args.recursive,
        include_hidden: defaults.include_hidden || args.include_hidden,
        verbose: defaults.verbose || args.verbose,
        dry_run: args.dry_run,
        quiet: defaults.quiet || args.quiet,
        ..defaults
    };
    tracing::debug!(?options, "starting batch");

    let report = match args.output {
        OutputFormat::Table => run_batch_with(&options, |outcome| {
            if let Some(message) = outcome.console_message(&options) {
                println!("{message}");
            }
        })?,
        OutputFormat::Json => {
            let report = run_batch_with(&options, |_| {})?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            report
        }
    };

    print_summary(&report, options.verbose);
    Ok(())
}

// Silent on a clean run unless -v or -n asked for it.
fn print_summary(report: &BatchReport, verbose: bool) {
    let summary = &report.summary;
    if !(verbose || report.dry_run || summary.failed > 0) {
        return;
    }

    if report.dry_run {
        eprintln!(
            "dry-run: would rename {}, skipped {}, failed {}",
            summary.suppressed, summary.skipped, summary.failed
        );
    } else {
        eprintln!(
            "renamed {}, skipped {}, failed {}",
            summary.renamed, summary.skipped, summary.failed
        );
    }

    for failure in report.failures() {
        eprintln!("  failed: {}", failure.source_path().display());
    }
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("config file: {}", path.display());
    Ok(())
}
