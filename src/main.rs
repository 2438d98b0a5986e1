//! # Skyreport CLI
//!
//! Command-line interface for drone fleet report generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a PDF report from a record file
//! skyreport generate falcon.json
//!
//! # Write to an explicit path and print the page count
//! skyreport generate falcon.json --output /tmp/falcon.pdf --pages
//!
//! # Serve reports over HTTP
//! skyreport serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skyreport::error::ReportError;
use skyreport::record::DroneRecord;
use skyreport::report::{self, PageGeometry};
use skyreport::server::{self, ServerConfig};

/// Skyreport - drone fleet PDF report generator
#[derive(Parser, Debug)]
#[command(name = "skyreport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a PDF report from a drone record JSON file
    Generate {
        /// Path to the drone record (JSON)
        record: PathBuf,

        /// Output path (defaults to the report's own filename)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the page count after generating
        #[arg(long)]
        pages: bool,
    },

    /// Serve report generation over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReportError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyreport=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            record,
            output,
            pages,
        } => {
            let json = std::fs::read_to_string(&record)?;
            let record: DroneRecord = serde_json::from_str(&json)
                .map_err(|e| ReportError::Record(format!("invalid record JSON: {}", e)))?;

            let generated = report::generate(&record, &PageGeometry::default())?;
            let path = output.unwrap_or_else(|| PathBuf::from(&generated.filename));
            std::fs::write(&path, &generated.bytes)?;

            println!("Wrote {}", path.display());
            if pages {
                println!("Pages: {}", generated.page_count);
            }
            Ok(())
        }

        Commands::Serve { listen } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(ServerConfig {
                listen_addr: listen,
            }))
        }
    }
}
