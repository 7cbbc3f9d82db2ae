//! Interactive shell
//!
//! Line-oriented front-end over one [`InvoiceDashboard`]. Each input line is
//! parsed into a [`ShellCommand`] and run against the dashboard; the text to
//! print comes back as a [`Reply`].

use chrono::NaiveDate;

use crate::dashboard::InvoiceDashboard;
use crate::invoice::parse_date;
use crate::render::{format_amount, render, OutputFormat};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Refetch the full list
    Refresh,
    /// Print the displayed view
    Show,
    /// Set the form's invoice number
    Number(String),
    /// Set the form's amount, as typed
    Amount(String),
    /// Set the form's date
    Date(NaiveDate),
    /// Print the form
    Form,
    /// Create an invoice from the form
    Submit,
    /// Delete by invoice number
    Delete(String),
    /// Apply a date filter; `None` leaves that side open
    Filter(Option<NaiveDate>, Option<NaiveDate>),
    /// Clear the filter
    Clear,
    /// List the dates available as filter bounds
    Dates,
    /// Edit an invoice (not supported by the Invoice API)
    Edit(String),
    Help,
    Quit,
}

/// Outcome of running one command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text for stdout
    Output(String),
    /// Text for stderr; the session continues
    Error(String),
    /// End the session
    Quit,
}

pub const HELP: &str = "\
Commands:
  refresh                 Refetch invoices from the API
  show                    Show the invoice table
  number <text>           Set the form's invoice number
  amount <text>           Set the form's amount
  date <YYYY-MM-DD>       Set the form's date
  form                    Show the form
  submit                  Create an invoice from the form
  delete <number>         Delete invoices with this number
  filter <start> <end>    Filter by date (use - for an open bound)
  clear                   Clear the filter
  dates                   List the invoice dates
  help                    Show this help
  quit                    Leave the shell
";

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "refresh" | "fetch" => ShellCommand::Refresh,
            "show" | "list" | "ls" => ShellCommand::Show,
            "number" => ShellCommand::Number(rest.to_string()),
            // Amount is kept verbatim; coercion happens on submit
            "amount" => ShellCommand::Amount(rest.to_string()),
            "date" => ShellCommand::Date(
                parse_date(rest).map_err(|_| format!("Invalid date: {:?}. Use YYYY-MM-DD", rest))?,
            ),
            "form" => ShellCommand::Form,
            "submit" | "create" => ShellCommand::Submit,
            "delete" | "rm" => ShellCommand::Delete(required(rest, "delete <number>")?),
            "filter" => {
                let mut parts = rest.split_whitespace();
                let start = parse_bound(parts.next())?;
                let end = parse_bound(parts.next())?;
                if parts.next().is_some() {
                    return Err("Usage: filter <start> <end>".to_string());
                }
                ShellCommand::Filter(start, end)
            }
            "clear" => ShellCommand::Clear,
            "dates" => ShellCommand::Dates,
            "edit" => ShellCommand::Edit(required(rest, "edit <number>")?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(format!("Unknown command: {}. Type 'help' for commands", other)),
        };

        Ok(Some(command))
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw {
        None | Some("-") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .map_err(|_| format!("Invalid date: {:?}. Use YYYY-MM-DD or -", s)),
    }
}

/// Run one command against the dashboard
pub async fn execute(
    dashboard: &mut InvoiceDashboard,
    command: ShellCommand,
    format: OutputFormat,
) -> Reply {
    match command {
        ShellCommand::Refresh => match dashboard.fetch_invoices().await {
            Ok(()) => Reply::Output(format!("Fetched {} invoices\n", dashboard.invoices().len())),
            Err(e) => Reply::Error(format!("Error fetching invoices: {}", e)),
        },
        ShellCommand::Show => show(dashboard, format),
        ShellCommand::Number(number) => {
            dashboard.set_number(number);
            Reply::Output(String::new())
        }
        ShellCommand::Amount(amount) => {
            dashboard.set_amount(amount);
            Reply::Output(String::new())
        }
        ShellCommand::Date(date) => {
            dashboard.set_date(date);
            Reply::Output(String::new())
        }
        ShellCommand::Form => {
            let form = dashboard.form();
            Reply::Output(format!(
                "Number: {}\nAmount: {}\nDate:   {}\n",
                form.number,
                form.amount,
                form.date.format("%Y-%m-%d")
            ))
        }
        ShellCommand::Submit => match dashboard.submit_form().await {
            Ok(invoice) => Reply::Output(format!(
                "Created invoice {} ({})\n",
                invoice.invoice_number,
                format_amount(invoice.invoice_amount)
            )),
            Err(e) => Reply::Error(format!("Error creating invoice: {}", e)),
        },
        ShellCommand::Delete(number) => match dashboard.delete_invoice(&number).await {
            Ok(()) => Reply::Output(format!("Deleted invoice {}\n", number)),
            Err(e) => Reply::Error(format!("Error deleting invoice: {}", e)),
        },
        ShellCommand::Filter(start, end) => {
            dashboard.apply_date_filter(start, end);
            show(dashboard, format)
        }
        ShellCommand::Clear => {
            dashboard.clear_filter();
            show(dashboard, format)
        }
        ShellCommand::Dates => {
            let dates = dashboard.date_options();
            if dates.is_empty() {
                Reply::Output("No invoice dates\n".to_string())
            } else {
                let mut out = String::new();
                for date in dates {
                    out.push_str(&date.format("%Y-%m-%d\n").to_string());
                }
                Reply::Output(out)
            }
        }
        ShellCommand::Edit(number) => Reply::Error(format!(
            "Editing invoice {} is not supported: the Invoice API has no update endpoint",
            number
        )),
        ShellCommand::Help => Reply::Output(HELP.to_string()),
        ShellCommand::Quit => Reply::Quit,
    }
}

fn show(dashboard: &InvoiceDashboard, format: OutputFormat) -> Reply {
    match render(dashboard.displayed(), format) {
        Ok(text) => Reply::Output(text),
        Err(e) => Reply::Error(e.to_string()),
    }
}
