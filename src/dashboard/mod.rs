//! Invoice Dashboard
//!
//! [`InvoiceDashboard`] owns every piece of session state and is the only
//! component that talks to the Invoice API.
//!
//! ## State
//!
//! - `invoices`: the snapshot returned by the last successful fetch
//! - `filtered`: the date-filtered subset of that snapshot, when a filter is applied
//! - `filter`: the selected date bounds
//! - `form`: the create-invoice form, as typed
//!
//! ## Data Flow
//!
//! 1. Form input is held locally until submitted
//! 2. A successful create or delete triggers a full refetch
//! 3. Filtering runs over the snapshot and never contacts the API
//!
//! Failed calls are logged and leave state untouched. The error is also
//! returned so callers can react to it.
//!
//! Each method takes `&mut self`, so a dashboard never has two calls in
//! flight. Separate dashboards sharing one backend are not coordinated: the
//! list each one shows reflects whichever of its fetches resolved last.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::client::InvoiceApi;
use crate::error::DashboardResult;
use crate::invoice::{distinct_dates, filter_by_date, DateFilter, Invoice, InvoiceForm, NewInvoice};

/// Session state for the invoice dashboard
pub struct InvoiceDashboard {
    api: Arc<dyn InvoiceApi>,
    invoices: Vec<Invoice>,
    filtered: Option<Vec<Invoice>>,
    filter: DateFilter,
    form: InvoiceForm,
}

impl InvoiceDashboard {
    /// Create an empty dashboard. Call [`fetch_invoices`](Self::fetch_invoices) to load data.
    pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
        Self {
            api,
            invoices: Vec::new(),
            filtered: None,
            filter: DateFilter::default(),
            form: InvoiceForm::default(),
        }
    }

    /// Create a dashboard and perform the initial fetch.
    ///
    /// A failed initial fetch is logged and leaves the list empty.
    pub async fn load(api: Arc<dyn InvoiceApi>) -> Self {
        let mut dashboard = Self::new(api);
        let _ = dashboard.fetch_invoices().await;
        dashboard
    }

    // ============================================
    // API operations
    // ============================================

    /// Replace the snapshot with the server's full list.
    ///
    /// An applied filter is recomputed over the new snapshot.
    pub async fn fetch_invoices(&mut self) -> DashboardResult<()> {
        match self.api.list_invoices().await {
            Ok(invoices) => {
                tracing::debug!(count = invoices.len(), "Fetched invoices");
                self.invoices = invoices;
                if self.filtered.is_some() {
                    self.filtered = Some(filter_by_date(&self.invoices, &self.filter));
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching invoices");
                Err(e)
            }
        }
    }

    /// Create an invoice from raw input.
    ///
    /// The amount is coerced like `parseFloat`; input that is not a number is
    /// sent as `NaN` without validation. On success the list is refetched and
    /// the form cleared. On failure the form is left as it was.
    pub async fn create_invoice(
        &mut self,
        number: &str,
        amount: &str,
        date: NaiveDate,
    ) -> DashboardResult<Invoice> {
        let request = NewInvoice::from_input(number, amount, date);
        if request.invoice_amount.is_nan() {
            tracing::warn!(invoice_number = %number, amount = %amount, "Invoice amount is not a number");
        }

        let created = match self.api.create_invoice(&request).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(invoice_number = %number, error = %e, "Error creating invoice");
                return Err(e);
            }
        };

        tracing::info!(invoice_number = %created.invoice_number, "Created invoice");

        // Refetch failures are already logged and do not undo the create
        let _ = self.fetch_invoices().await;
        self.form.reset();

        Ok(created)
    }

    /// Submit the create-invoice form
    pub async fn submit_form(&mut self) -> DashboardResult<Invoice> {
        let InvoiceForm {
            number,
            amount,
            date,
        } = self.form.clone();
        self.create_invoice(&number, &amount, date).await
    }

    /// Delete every invoice with `number`, then refetch
    pub async fn delete_invoice(&mut self, number: &str) -> DashboardResult<()> {
        if let Err(e) = self.api.delete_invoice(number).await {
            tracing::error!(invoice_number = %number, error = %e, "Error deleting invoice");
            return Err(e);
        }

        tracing::info!(invoice_number = %number, "Deleted invoice");

        let _ = self.fetch_invoices().await;
        Ok(())
    }

    // ============================================
    // Local filtering
    // ============================================

    /// Filter the current snapshot to `[start, end]` inclusive.
    ///
    /// An unset bound does not filter on that side. The result replaces the
    /// filtered slot; the snapshot itself is not touched.
    pub fn apply_date_filter(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> &[Invoice] {
        self.filter = DateFilter::new(start, end);
        let filtered = filter_by_date(&self.invoices, &self.filter);
        tracing::debug!(
            start = ?start,
            end = ?end,
            matched = filtered.len(),
            "Applied date filter"
        );
        self.filtered.insert(filtered).as_slice()
    }

    /// Drop the filtered view so the full snapshot is shown again
    pub fn clear_filter(&mut self) {
        self.filtered = None;
    }

    // ============================================
    // Form
    // ============================================

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.form.number = number.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.form.amount = amount.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.form.date = date;
    }

    pub fn form(&self) -> &InvoiceForm {
        &self.form
    }

    // ============================================
    // Views
    // ============================================

    /// Rows to show: the filtered view when set, otherwise the full snapshot
    pub fn displayed(&self) -> &[Invoice] {
        self.filtered.as_deref().unwrap_or(self.invoices.as_slice())
    }

    /// The last fetched snapshot
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// The filtered view, if a filter is applied
    pub fn filtered(&self) -> Option<&[Invoice]> {
        self.filtered.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }

    /// The selected filter bounds
    pub fn filter(&self) -> DateFilter {
        self.filter
    }

    /// Dates offered by the start/end pickers
    pub fn date_options(&self) -> Vec<NaiveDate> {
        distinct_dates(&self.invoices)
    }
}
