use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod report;

#[derive(Debug, Parser)]
#[command(name = "salesboard-cli")]
#[command(about = "Salesboard pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List active locations from the directory with their derived brands.
    Locations,
    /// Run one refresh cycle and print the dashboard snapshot.
    Refresh {
        /// Transaction date as dd-Mon-yy (e.g. 28-Aug-26); defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locations => report::print_locations().await,
        Commands::Refresh { date } => {
            let date = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%d-%b-%y")
                    .map_err(|e| anyhow::anyhow!("invalid --date '{raw}': {e}"))?,
                None => chrono::Utc::now().date_naive(),
            };
            report::print_snapshot(date).await
        }
    }
}
