//! Invoice API clients
//!
//! The dashboard talks to its backend only through [`InvoiceApi`]:
//!
//! - **http**: `HttpInvoiceClient`, the REST client used against a real server
//! - **memory**: `MemoryInvoiceApi`, an in-process store with the same contract
//!
//! ## Endpoints
//!
//! - `GET /api/invoice` - List all invoices
//! - `POST /api/invoice` - Create an invoice
//! - `DELETE /api/invoice/:invoiceNumber` - Delete by invoice number

mod http;
mod memory;

pub use http::{HttpInvoiceClient, InvoiceClientConfig};
pub use memory::MemoryInvoiceApi;

use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::invoice::{Invoice, NewInvoice};

/// Backend contract for the invoice dashboard
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// Fetch every invoice, in server order
    async fn list_invoices(&self) -> DashboardResult<Vec<Invoice>>;

    /// Create an invoice and return the stored record
    async fn create_invoice(&self, invoice: &NewInvoice) -> DashboardResult<Invoice>;

    /// Delete the invoice(s) carrying `invoice_number`
    async fn delete_invoice(&self, invoice_number: &str) -> DashboardResult<()>;
}
