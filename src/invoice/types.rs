//! Core data types for the invoice dashboard
//!
//! - `Invoice`: a billing record as returned by the Invoice API
//! - `NewInvoice`: the body posted to create an invoice
//! - `InvoiceForm`: raw, as-typed form fields held for one session
//! - `DateFilter`: optional inclusive date bounds for the filtered view

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::codec::{amount, invoice_date};

/// A billing record as stored by the Invoice API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Server-assigned identifier, opaque to the dashboard
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-facing number, also the delete key. Not guaranteed unique.
    pub invoice_number: String,
    /// Amount; `NaN` when the server holds no numeric value
    #[serde(with = "amount")]
    pub invoice_amount: f64,
    /// Calendar date, no time zone
    #[serde(with = "invoice_date")]
    pub invoice_date: NaiveDate,
}

impl Invoice {
    /// Create an invoice without a server id
    pub fn new(number: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: None,
            invoice_number: number.into(),
            invoice_amount: amount,
            invoice_date: date,
        }
    }

    /// Builder method: set the server id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Request body for `POST /api/invoice`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub invoice_number: String,
    #[serde(with = "amount")]
    pub invoice_amount: f64,
    #[serde(with = "invoice_date")]
    pub invoice_date: NaiveDate,
}

impl NewInvoice {
    /// Build a request from raw form input.
    ///
    /// The amount is coerced with [`parse_amount`]; unparseable input becomes
    /// `NaN` and is sent as-is.
    pub fn from_input(number: &str, amount: &str, date: NaiveDate) -> Self {
        Self {
            invoice_number: number.to_string(),
            invoice_amount: parse_amount(amount),
            invoice_date: date,
        }
    }

    /// Convert into the record a server would store under `id`
    pub fn into_invoice(self, id: impl Into<String>) -> Invoice {
        Invoice {
            id: Some(id.into()),
            invoice_number: self.invoice_number,
            invoice_amount: self.invoice_amount,
            invoice_date: self.invoice_date,
        }
    }
}

/// Create-invoice form state, exactly as typed
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub number: String,
    pub amount: String,
    pub date: NaiveDate,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self {
            number: String::new(),
            amount: String::new(),
            date: today(),
        }
    }
}

impl InvoiceForm {
    /// Empty the text fields and move the date back to today
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The request this form would submit
    pub fn to_request(&self) -> NewInvoice {
        NewInvoice::from_input(&self.number, &self.amount, self.date)
    }
}

/// Inclusive date bounds. An unset bound does not filter on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Filter with both bounds set
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Check whether a date falls inside the bounds
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Whether neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an amount the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5 EUR"` is `12.5`. Input with no numeric prefix yields `NaN`.
pub fn parse_amount(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}
