//! Output rendering
//!
//! Renders the displayed invoice view as a text table, CSV, or the JSON wire form.

use std::fmt::Write as _;

use crate::invoice::Invoice;

/// Output format for rendered invoice lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Render `invoices` in the requested format
pub fn render(invoices: &[Invoice], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(invoices)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(invoices)? + "\n"),
        OutputFormat::Csv => render_csv(invoices),
    }
}

/// Format an amount with two decimals; non-finite amounts print as-is
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() {
        format!("{:.2}", amount)
    } else {
        amount.to_string()
    }
}

/// Number / Date / Amount table
pub fn render_table(invoices: &[Invoice]) -> String {
    if invoices.is_empty() {
        return "No invoices\n".to_string();
    }

    let number_width = invoices
        .iter()
        .map(|i| i.invoice_number.chars().count())
        .max()
        .unwrap_or(0)
        .max("Invoice Number".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$} | {:<10} | {:>12}",
        "Invoice Number",
        "Date",
        "Amount",
        width = number_width
    );
    let _ = writeln!(out, "{}", "-".repeat(number_width + 31));

    for invoice in invoices {
        let _ = writeln!(
            out,
            "{:<width$} | {:<10} | {:>12}",
            invoice.invoice_number,
            invoice.invoice_date.format("%Y-%m-%d"),
            format_amount(invoice.invoice_amount),
            width = number_width
        );
    }

    out
}

/// CSV with header `invoiceNumber,invoiceDate,invoiceAmount`
pub fn render_csv(invoices: &[Invoice]) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["invoiceNumber", "invoiceDate", "invoiceAmount"])?;

    for invoice in invoices {
        writer.write_record([
            invoice.invoice_number.clone(),
            invoice.invoice_date.format("%Y-%m-%d").to_string(),
            if invoice.invoice_amount.is_finite() {
                invoice.invoice_amount.to_string()
            } else {
                String::new()
            },
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RenderError::Csv(e.to_string()))
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        RenderError::Csv(err.to_string())
    }
}
