//! Invoice data model
//!
//! - **types**: `Invoice`, `NewInvoice`, `InvoiceForm`, `DateFilter`
//! - **codec**: JSON codecs for amounts and dates as the Invoice API sends them
//! - **filter**: client-side date filtering

pub mod codec;
pub mod filter;
pub mod types;

pub use filter::{distinct_dates, filter_by_date};
pub use types::{parse_amount, parse_date, today, DateFilter, Invoice, InvoiceForm, NewInvoice};
