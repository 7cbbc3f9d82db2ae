//! In-process Invoice API
//!
//! Keeps invoices in memory behind the same contract as the REST backend.
//! Used by tests and the CLI's `--offline` mode.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::InvoiceApi;
use crate::error::{DashboardError, DashboardResult};
use crate::invoice::{Invoice, NewInvoice};

/// In-memory invoice store
#[derive(Default)]
pub struct MemoryInvoiceApi {
    invoices: RwLock<Vec<Invoice>>,
    next_id: AtomicU64,
}

impl MemoryInvoiceApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `invoices`, assigning ids to those without one
    pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
        let mut api = Self::new();
        let seeded: Vec<Invoice> = invoices
            .into_iter()
            .map(|mut invoice| {
                if invoice.id.is_none() {
                    invoice.id = Some(api.assign_id());
                }
                invoice
            })
            .collect();
        api.invoices = RwLock::new(seeded);
        api
    }

    /// Snapshot of the stored invoices
    pub async fn invoices(&self) -> Vec<Invoice> {
        self.invoices.read().await.clone()
    }

    fn assign_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("mem-{}", id)
    }
}

#[async_trait]
impl InvoiceApi for MemoryInvoiceApi {
    async fn list_invoices(&self) -> DashboardResult<Vec<Invoice>> {
        Ok(self.invoices.read().await.clone())
    }

    async fn create_invoice(&self, invoice: &NewInvoice) -> DashboardResult<Invoice> {
        let stored = invoice.clone().into_invoice(self.assign_id());
        self.invoices.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete_invoice(&self, invoice_number: &str) -> DashboardResult<()> {
        let mut invoices = self.invoices.write().await;
        let before = invoices.len();
        invoices.retain(|invoice| invoice.invoice_number != invoice_number);

        if invoices.len() == before {
            return Err(DashboardError::Api {
                status: 404,
                message: format!("Invoice {} not found", invoice_number),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_ids() {
        let api = MemoryInvoiceApi::with_invoices(vec![
            Invoice::new("A1", 10.0, date(2024, 1, 5)),
            Invoice::new("A2", 20.0, date(2024, 2, 10)).id("server-7"),
        ]);
        let invoices = api.list_invoices().await.unwrap();
        assert_eq!(invoices[0].id.as_deref(), Some("mem-1"));
        assert_eq!(invoices[1].id.as_deref(), Some("server-7"));
    }

    #[tokio::test]
    async fn test_create_appends_in_order() {
        let api = MemoryInvoiceApi::with_invoices(vec![Invoice::new("A1", 10.0, date(2024, 1, 5))]);
        let created = api
            .create_invoice(&NewInvoice::from_input("B1", "5", date(2024, 3, 1)))
            .await
            .unwrap();
        assert_eq!(created.id.as_deref(), Some("mem-2"));

        let numbers: Vec<String> = api
            .invoices()
            .await
            .into_iter()
            .map(|i| i.invoice_number)
            .collect();
        assert_eq!(numbers, vec!["A1", "B1"]);
    }

    #[tokio::test]
    async fn test_delete_removes_all_with_number() {
        let api = MemoryInvoiceApi::with_invoices(vec![
            Invoice::new("DUP", 1.0, date(2024, 1, 1)),
            Invoice::new("KEEP", 2.0, date(2024, 1, 2)),
            Invoice::new("DUP", 3.0, date(2024, 1, 3)),
        ]);
        api.delete_invoice("DUP").await.unwrap();

        let remaining = api.invoices().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].invoice_number, "KEEP");
    }

    #[tokio::test]
    async fn test_delete_unknown_number() {
        let api = MemoryInvoiceApi::new();
        let err = api.delete_invoice("missing").await.unwrap_err();
        assert!(matches!(err, DashboardError::Api { status: 404, .. }));
    }
}
