//! QIF (Quicken Interchange Format) serializer and parser.
//!
//! QIF is a line-oriented text format: a `!Type:` header followed by one
//! block per transaction, each line starting with a single field marker
//! (`D` date, `T` amount, `M` memo, `N` number) and blocks terminated by a
//! `^` line. Only the Bank account type and the fields the importer emits
//! are supported.

use crate::error::{Error, Result};
use crate::types::ConversionSummary;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

/// Date format written into QIF output unless overridden.
pub const DEFAULT_QIF_DATE_FORMAT: &str = "%d/%m/%Y";

/// QIF account type tag, written as `!Type:<tag>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountType {
    /// Bank account statement.
    #[default]
    Bank,
}

impl AccountType {
    /// Tag as it appears in the header line.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => "Bank",
        }
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Bank" => Ok(AccountType::Bank),
            _ => Err(Error::ParseError(format!("unsupported QIF type: {}", s))),
        }
    }
}

/// One QIF bank transaction, fully coerced and ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QifTransaction {
    /// Transaction date.
    pub date: NaiveDate,

    /// Signed amount: credits positive, debits negative.
    pub amount: Decimal,

    /// Free-text memo.
    pub memo: String,

    /// Document/reference number.
    pub number: String,
}

/// An ordered set of QIF transactions under a single account-type header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QifStatement {
    /// Account type written in the header.
    pub account_type: AccountType,

    /// Transactions in output order.
    pub transactions: Vec<QifTransaction>,
}

impl QifStatement {
    /// Write the statement as QIF text to any destination implementing
    /// `Write`, formatting dates with `date_format`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use myfinance_import::qif_format::{QifStatement, DEFAULT_QIF_DATE_FORMAT};
    ///
    /// let statement = QifStatement::default();
    /// let mut file = File::create("output.qif")?;
    /// statement.write_to(&mut file, DEFAULT_QIF_DATE_FORMAT)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W, date_format: &str) -> Result<()> {
        writeln!(writer, "!Type:{}", self.account_type.as_str())?;

        for transaction in &self.transactions {
            writeln!(writer, "D{}", transaction.date.format(date_format))?;
            writeln!(writer, "T{}", transaction.amount)?;
            writeln!(writer, "M{}", sanitize(&transaction.memo))?;
            writeln!(writer, "N{}", sanitize(&transaction.number))?;
            writeln!(writer, "^")?;
        }

        Ok(())
    }

    /// Parse QIF text produced by [`write_to`](Self::write_to) back into a
    /// statement, reading dates with `date_format`. Used to verify emitted
    /// files round-trip.
    pub fn from_read<R: Read>(reader: &mut R, date_format: &str) -> Result<Self> {
        let buf_reader = BufReader::new(reader);
        let mut lines = buf_reader.lines();

        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| Error::ParseError("empty QIF file".to_string()))?;
        let tag = header
            .strip_prefix("!Type:")
            .ok_or_else(|| Error::ParseError(format!("missing QIF header: {}", header)))?;
        let account_type = tag.parse::<AccountType>()?;

        let mut transactions = Vec::new();
        let mut date = None;
        let mut amount = None;
        let mut memo = String::new();
        let mut number = String::new();

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let (marker, rest) = line.split_at(1);
            match marker {
                "D" => {
                    date = Some(
                        NaiveDate::parse_from_str(rest, date_format)
                            .map_err(|_| Error::InvalidDate(rest.to_string()))?,
                    );
                }
                "T" => {
                    amount = Some(
                        Decimal::from_str(rest)
                            .map_err(|_| Error::InvalidAmount(rest.to_string()))?,
                    );
                }
                "M" => memo = rest.to_string(),
                "N" => number = rest.to_string(),
                "^" => {
                    transactions.push(QifTransaction {
                        date: date.take().ok_or_else(|| {
                            Error::MissingField("date in QIF block".to_string())
                        })?,
                        amount: amount.take().ok_or_else(|| {
                            Error::MissingField("amount in QIF block".to_string())
                        })?,
                        memo: std::mem::take(&mut memo),
                        number: std::mem::take(&mut number),
                    });
                }
                _ => {} // unrecognized markers are ignored
            }
        }

        Ok(QifStatement {
            account_type,
            transactions,
        })
    }

    /// Summary statistics for the statement: transaction count plus the
    /// first-seen and last-seen dates in output order.
    pub fn summary(&self) -> ConversionSummary {
        ConversionSummary {
            total: self.transactions.len(),
            first_date: self.transactions.first().map(|t| t.date),
            last_date: self.transactions.last().map(|t| t.date),
        }
    }
}

/// QIF is line-oriented: a line break inside a text field would split it
/// across field lines and corrupt the block. Source values may legally
/// contain them, so they are collapsed to single spaces.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_statement() -> QifStatement {
        QifStatement {
            account_type: AccountType::Bank,
            transactions: vec![
                QifTransaction {
                    date: NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
                    amount: Decimal::from_str("100.50").unwrap(),
                    memo: "Deposit".to_string(),
                    number: "A1".to_string(),
                },
                QifTransaction {
                    date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
                    amount: Decimal::from_str("-20.00").unwrap(),
                    memo: "Fee".to_string(),
                    number: "A2".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_write_emits_header_and_blocks() {
        let mut out = Vec::new();
        sample_statement()
            .write_to(&mut out, DEFAULT_QIF_DATE_FORMAT)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = "!Type:Bank\n\
                        D05/01/2020\n\
                        T100.50\n\
                        MDeposit\n\
                        NA1\n\
                        ^\n\
                        D06/01/2020\n\
                        T-20.00\n\
                        MFee\n\
                        NA2\n\
                        ^\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_statement_is_header_only() {
        let mut out = Vec::new();
        QifStatement::default()
            .write_to(&mut out, DEFAULT_QIF_DATE_FORMAT)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "!Type:Bank\n");

        let summary = QifStatement::default().summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.first_date, None);
        assert_eq!(summary.last_date, None);
    }

    #[test]
    fn test_round_trip() {
        let statement = sample_statement();
        let mut out = Vec::new();
        statement
            .write_to(&mut out, DEFAULT_QIF_DATE_FORMAT)
            .unwrap();

        let reparsed =
            QifStatement::from_read(&mut out.as_slice(), DEFAULT_QIF_DATE_FORMAT).unwrap();
        assert_eq!(reparsed, statement);
    }

    #[test]
    fn test_summary_reports_first_and_last_seen() {
        let summary = sample_statement().summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2020, 1, 5));
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2020, 1, 6));
    }

    #[test]
    fn test_line_breaks_in_text_fields_are_collapsed() {
        let statement = QifStatement {
            account_type: AccountType::Bank,
            transactions: vec![QifTransaction {
                date: NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
                amount: Decimal::from_str("100.50").unwrap(),
                memo: "Deposit\r\nwire\ntransfer".to_string(),
                number: "A1\n2".to_string(),
            }],
        };

        let mut out = Vec::new();
        statement
            .write_to(&mut out, DEFAULT_QIF_DATE_FORMAT)
            .unwrap();
        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("MDeposit wire transfer\n"));
        assert!(text.contains("NA1 2\n"));

        // The emitted block stays well-formed and parses back.
        let reparsed =
            QifStatement::from_read(&mut out.as_slice(), DEFAULT_QIF_DATE_FORMAT).unwrap();
        assert_eq!(reparsed.transactions.len(), 1);
        assert_eq!(reparsed.transactions[0].memo, "Deposit wire transfer");
        assert_eq!(reparsed.transactions[0].number, "A1 2");
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let err = QifStatement::from_read(&mut "D05/01/2020\n".as_bytes(), DEFAULT_QIF_DATE_FORMAT)
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
