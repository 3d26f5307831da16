//! Converter CLI
//!
//! Command-line interface for the currency converter API.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use converter_client::{ConverterClient, SymbolsFetchOutcome};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the currency converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:8092"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (e.g. EUR)
        source: String,
        /// Target currency code (e.g. USD)
        target: String,
        /// Amount to convert
        amount: Decimal,
        /// Language preference sent as Accept-Language (e.g. "de-CH, en;q=0.8")
        #[arg(long)]
        language: Option<String>,
    },
    /// List supported currencies
    Symbols {
        /// ETag from a previous listing; prints nothing new if still current
        #[arg(long)]
        etag: Option<String>,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert {
            source,
            target,
            amount,
            language,
        } => {
            let resp = client
                .convert(&source, &target, amount, language.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }

        Commands::Symbols { etag } => match client.supported_symbols(etag.as_deref()).await? {
            SymbolsFetchOutcome::NotModified => {
                println!("✓ Symbols not modified");
            }
            SymbolsFetchOutcome::Fresh { etag, symbols } => {
                if let Some(etag) = etag {
                    println!("ETag: {}", etag);
                }
                let sorted: BTreeMap<_, _> = symbols.into_iter().collect();
                for (code, name) in sorted {
                    println!("{}  {}", code, name);
                }
            }
        },
    }

    Ok(())
}
