use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use transparencia_etl::config::Config;
use transparencia_etl::{logging, pipeline};

#[derive(Parser)]
#[command(name = "transparencia_etl")]
#[command(about = "Municipal transparency data consolidation pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every source and write the consolidated dashboard snapshot
    Update {
        /// Fiscal year to consolidate
        #[arg(long, default_value_t = 2025)]
        year: i32,
        /// Calendar month used for the payroll headcount detail
        #[arg(long, default_value_t = 12)]
        snapshot_month: u32,
        /// Directory the snapshot artifacts are written to
        #[arg(long, default_value = "site/data")]
        output_dir: PathBuf,
        /// Path to the TOML configuration file
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            year,
            snapshot_month,
            output_dir,
            config,
        } => {
            let config = Config::load_or_default(&config)?;
            println!("🔄 Updating dashboard data for {year}...");
            info!("Starting consolidation run");

            match pipeline::run(&config, year, snapshot_month, &output_dir).await {
                Ok(result) => {
                    info!("Consolidation finished");
                    println!("\n📊 Consolidation results for {year}:");
                    println!("   Revenue rows: {}", result.revenue_records);
                    println!("   Expense rows: {}", result.expense_records);
                    println!("   Contracts: {}", result.contract_records);
                    println!("   Tenders: {}", result.tender_records);
                    println!("   Payroll rows (12 months): {}", result.payroll_records);
                    println!("   Output file: {}", result.output_file);

                    if !result.failures.is_empty() {
                        warn!(
                            "{} sources unavailable during this run",
                            result.failures.len()
                        );
                        println!("\n⚠️  Sources unavailable (totals zeroed):");
                        for failure in &result.failures {
                            println!("   - {}: {}", failure.source, failure.error);
                        }
                    }
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {e}");
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
