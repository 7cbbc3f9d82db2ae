//! Client-side date filtering over a fetched snapshot

use chrono::NaiveDate;

use super::types::{DateFilter, Invoice};

/// Select the invoices whose date falls inside `filter`, keeping their order
pub fn filter_by_date(invoices: &[Invoice], filter: &DateFilter) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|invoice| filter.contains(invoice.invoice_date))
        .cloned()
        .collect()
}

/// Distinct invoice dates in ascending order
pub fn distinct_dates(invoices: &[Invoice]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = invoices.iter().map(|i| i.invoice_date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}
