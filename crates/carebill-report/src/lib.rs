//! Document rendering for billing results.
//!
//! Four outputs per facility and month: the updated ledger sheet (CSV,
//! readable back in as next month's input), a per-resident invoice, a
//! per-resident receipt, and — only for residents with a copay line — a
//! combined statement. All renderers are string-in-string-out with thin
//! path-writing wrappers, so every document is snapshot-testable.

mod combined;
mod common;
mod invoice;
mod ledger_sheet;
mod receipt;

pub use combined::{render_combined_statement, write_combined_statements};
pub use common::{DocumentContext, format_japanese_date, format_yen};
pub use invoice::{render_invoice, write_invoices};
pub use ledger_sheet::{render_ledger_sheet, result_to_ledger_row, write_ledger_sheet};
pub use receipt::{render_receipt, write_receipts};
