//! # Invoice Dashboard
//!
//! List, create, filter and delete invoices against a REST invoice API.
//!
//! ## Modules
//!
//! - [`invoice`]: Invoice data model, wire codecs and date filtering
//! - [`client`]: `InvoiceApi` trait with HTTP and in-memory implementations
//! - [`dashboard`]: Session state: fetched list, filtered view and form
//! - [`render`]: Table, CSV and JSON output
//! - [`shell`]: Interactive command shell
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use invoice_dashboard::{HttpInvoiceClient, InvoiceClientConfig, InvoiceDashboard};
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpInvoiceClient::new(InvoiceClientConfig::default())?;
//!     let mut dashboard = InvoiceDashboard::load(Arc::new(client)).await;
//!
//!     dashboard
//!         .create_invoice("INV-001", "125.50", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
//!         .await?;
//!
//!     let january = dashboard.apply_date_filter(
//!         NaiveDate::from_ymd_opt(2024, 1, 1),
//!         NaiveDate::from_ymd_opt(2024, 1, 31),
//!     );
//!     println!("{} invoices in January", january.len());
//!
//!     dashboard.clear_filter();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod invoice;
pub mod logging;
pub mod render;
pub mod shell;

pub use client::{HttpInvoiceClient, InvoiceApi, InvoiceClientConfig, MemoryInvoiceApi};
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
pub use dashboard::InvoiceDashboard;
pub use error::{DashboardError, DashboardResult};
pub use invoice::{DateFilter, Invoice, InvoiceForm, NewInvoice};
pub use render::{OutputFormat, RenderError};
pub use shell::{Reply, ShellCommand};
