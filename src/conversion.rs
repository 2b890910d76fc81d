//! Conversion from raw ProSoft entries to QIF transactions.
//!
//! Coercion happens as a pre-pass over the whole entry list, so a bad date
//! or amount anywhere in the export fails the conversion before any output
//! byte is written.

use crate::error::{Error, Result};
use crate::qif_format::{QifStatement, QifTransaction};
use crate::types::{ConversionSummary, Entry, Operation, SOURCE_DATE_FORMAT};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

impl TryFrom<&Entry> for QifTransaction {
    type Error = Error;

    fn try_from(entry: &Entry) -> Result<Self> {
        let raw_date = entry
            .issue_date
            .as_deref()
            .ok_or_else(|| Error::MissingField("issue date".to_string()))?;
        let date = NaiveDate::parse_from_str(raw_date, SOURCE_DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(raw_date.to_string()))?;

        let operation = entry
            .operation
            .as_deref()
            .ok_or_else(|| Error::MissingField("operation".to_string()))?
            .parse::<Operation>()
            .map_err(Error::ParseError)?;

        // Only the amount field matching the operation is consumed.
        let (raw_amount, field) = match operation {
            Operation::Credit => (entry.credit_amount.as_deref(), "credit amount"),
            Operation::Debit => (entry.debit_amount.as_deref(), "debit amount"),
        };
        let raw_amount = raw_amount.ok_or_else(|| Error::MissingField(field.to_string()))?;
        let magnitude = parse_amount(raw_amount)?;
        let amount = match operation {
            Operation::Credit => magnitude,
            Operation::Debit => -magnitude,
        };

        Ok(QifTransaction {
            date,
            amount,
            memo: entry.description.clone().unwrap_or_default(),
            number: entry.document_number.clone().unwrap_or_default(),
        })
    }
}

/// Convert extracted entries into a QIF bank statement, preserving order.
pub fn to_qif_statement(entries: &[Entry]) -> Result<QifStatement> {
    let transactions = entries
        .iter()
        .map(QifTransaction::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(QifStatement {
        transactions,
        ..QifStatement::default()
    })
}

/// Convert extracted entries and write them as a QIF file at `qif_path`,
/// returning the statement summary.
///
/// Every entry is converted before the file is created, so a bad date or
/// amount anywhere in the input leaves no output file behind.
pub fn write_qif_file(
    entries: &[Entry],
    qif_path: &Path,
    date_format: &str,
) -> Result<ConversionSummary> {
    let statement = to_qif_statement(entries)?;

    let mut output = File::create(qif_path)?;
    statement.write_to(&mut output, date_format)?;

    Ok(statement.summary())
}

/// Parse a monetary amount, tolerating the source's locale conventions
/// (thousand-separating spaces, comma as decimal separator).
pub fn parse_amount(amount_str: &str) -> Result<Decimal> {
    let cleaned = amount_str.trim().replace(' ', "").replace(',', ".");

    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(amount_str.to_string()))
}

/// Output path for a given input path: same base name, `qif` extension.
pub fn qif_path_for(input: &Path) -> PathBuf {
    input.with_extension("qif")
}
