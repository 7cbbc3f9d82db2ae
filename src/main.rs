//! Invoice Dashboard CLI
//!
//! Command-line front-end for the invoice dashboard:
//! - List and filter invoices
//! - Create and delete invoices
//! - Interactive shell over one dashboard session
//! - Generate a default config file

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use invoice_dashboard::config::{generate_default_config, Config};
use invoice_dashboard::invoice::{parse_date, today};
use invoice_dashboard::render::{render, OutputFormat};
use invoice_dashboard::shell::{self, Reply, ShellCommand};
use invoice_dashboard::{
    logging, HttpInvoiceClient, InvoiceApi, InvoiceClientConfig, InvoiceDashboard,
    MemoryInvoiceApi,
};

#[derive(Parser)]
#[command(name = "invoice-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List, create, filter and delete invoices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Invoice API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Use an empty in-process store instead of the Invoice API
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List invoices, optionally filtered by date
    List {
        /// First date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
    },

    /// Create an invoice
    Create {
        /// Invoice number
        number: String,
        /// Amount, as typed. Non-numeric input is sent as NaN.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Invoice date (default: today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Delete every invoice with this number
    Delete {
        /// Invoice number
        number: String,
    },

    /// List the distinct invoice dates
    Dates,

    /// Start an interactive session
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|_| format!("invalid date {:?}, expected YYYY-MM-DD", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    logging::init(&config.logging);

    match cli.command {
        Commands::Config { output } => write_default_config(output.as_ref()),
        command => {
            let api = build_api(cli.offline, cli.api_url.as_deref(), &config)?;
            run(command, InvoiceDashboard::new(api), cli.format).await
        }
    }
}

fn build_api(
    offline: bool,
    api_url: Option<&str>,
    config: &Config,
) -> anyhow::Result<Arc<dyn InvoiceApi>> {
    if offline {
        tracing::info!("Running offline against an in-process store");
        return Ok(Arc::new(MemoryInvoiceApi::new()));
    }

    let mut client_config = InvoiceClientConfig::from(&config.api);
    if let Some(url) = api_url {
        client_config.base_url = url.to_string();
    }
    tracing::debug!(base_url = %client_config.base_url, "Using Invoice API");
    Ok(Arc::new(HttpInvoiceClient::new(client_config)?))
}

async fn run(
    command: Commands,
    mut dashboard: InvoiceDashboard,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::List { from, to } => {
            dashboard.fetch_invoices().await?;
            if from.is_some() || to.is_some() {
                dashboard.apply_date_filter(from, to);
            }
            print!("{}", render(dashboard.displayed(), format)?);
        }

        Commands::Create {
            number,
            amount,
            date,
        } => {
            let invoice = dashboard
                .create_invoice(&number, &amount, date.unwrap_or_else(today))
                .await?;
            eprintln!("Created invoice {}", invoice.invoice_number);
            print!("{}", render(dashboard.displayed(), format)?);
        }

        Commands::Delete { number } => {
            dashboard.delete_invoice(&number).await?;
            eprintln!("Deleted invoice {}", number);
            print!("{}", render(dashboard.displayed(), format)?);
        }

        Commands::Dates => {
            dashboard.fetch_invoices().await?;
            for date in dashboard.date_options() {
                println!("{}", date.format("%Y-%m-%d"));
            }
        }

        Commands::Shell => run_shell(dashboard, format).await?,

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

async fn run_shell(mut dashboard: InvoiceDashboard, format: OutputFormat) -> anyhow::Result<()> {
    if dashboard.fetch_invoices().await.is_err() {
        eprintln!("Could not load invoices; type 'refresh' to retry");
    }
    println!("Invoice Dashboard v{}. Type 'help' for commands.", env!("CARGO_PKG_VERSION"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match shell::execute(&mut dashboard, command, format).await {
            Reply::Output(text) => print!("{}", text),
            Reply::Error(text) => eprintln!("{}", text),
            Reply::Quit => break,
        }
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {:?}", parent))?;
            }
            std::fs::write(path, &config).with_context(|| format!("writing {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
