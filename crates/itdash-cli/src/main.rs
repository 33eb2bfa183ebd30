mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use commands::Overrides;

#[derive(Parser)]
#[command(
    name = "itdash",
    version,
    about = "Scrape agency spending and business case PDFs from itdashboard.gov"
)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true, default_value = itdash_core::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the dashboard, download business cases and compare them with the table
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List agencies and their IT spending
    Agencies {
        #[command(flatten)]
        overrides: Overrides,

        /// Also write the listing to the workbook's Agencies sheet
        #[arg(long)]
        save: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract the UII and investment name from one business case PDF
    Extract {
        /// Path to a business case PDF
        pdf_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Compare already downloaded PDFs with the agency sheet (no browser)
    Merge {
        #[command(flatten)]
        overrides: Overrides,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { overrides, output } => commands::run::run(&cli.config, overrides, &output),
        Commands::Agencies {
            overrides,
            save,
            output,
        } => commands::agencies::run(&cli.config, overrides, save, &output),
        Commands::Extract { pdf_file, output } => commands::extract::run(&pdf_file, &output),
        Commands::Merge { overrides, output } => {
            commands::merge::run(&cli.config, overrides, &output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
