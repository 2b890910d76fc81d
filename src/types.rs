//! Common types shared by the extractor and the QIF encoder.

use chrono::NaiveDate;
use std::str::FromStr;

/// Date format used by the ProSoft export for the issue date field.
pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw entry extracted from the ProSoft report, field values as they
/// appear in the document. Fields the document does not carry stay `None`;
/// coercion to typed values happens during QIF conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Issue date of the movement (`{MovDiário.Emissão}`), `YYYY-MM-DD`.
    pub issue_date: Option<String>,

    /// Running balance after the movement.
    pub balance: Option<String>,

    /// Credit amount, populated for credit operations.
    pub credit_amount: Option<String>,

    /// Debit amount, populated for debit operations.
    pub debit_amount: Option<String>,

    /// Operation discriminator, `C` (credit) or `D` (debit).
    pub operation: Option<String>,

    /// Entry type code.
    pub entry_type: Option<String>,

    /// Document/reference number.
    pub document_number: Option<String>,

    /// Free-text history/description.
    pub description: Option<String>,

    /// Ledger entry number.
    pub entry_number: Option<String>,

    /// Counterparty name.
    pub counterparty: Option<String>,

    /// Reconciliation flag.
    pub reconciled: Option<String>,

    /// Update flag.
    pub updated: Option<String>,
}

/// Credit/debit operation discriminator. Determines which of the two raw
/// amount fields is authoritative for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Credit operation (incoming), amount taken from the credit field.
    Credit,
    /// Debit operation (outgoing), amount taken from the debit field.
    Debit,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" | "CREDIT" => Ok(Operation::Credit),
            "D" | "DEBIT" => Ok(Operation::Debit),
            _ => Err(format!("Invalid operation indicator: {}", s)),
        }
    }
}

impl Operation {
    /// Single-letter representation as used by the source export.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Credit => "C",
            Operation::Debit => "D",
        }
    }
}

/// Aggregate statistics reported after a conversion.
///
/// The dates are the first-seen and last-seen entry dates in document order,
/// not a computed min/max. The export is assumed chronologically ordered;
/// if it is not, the reported range reflects the file, not the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Total number of transactions written.
    pub total: usize,

    /// Date of the first transaction in document order.
    pub first_date: Option<NaiveDate>,

    /// Date of the last transaction in document order.
    pub last_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_str() {
        assert_eq!("C".parse::<Operation>().unwrap(), Operation::Credit);
        assert_eq!("c".parse::<Operation>().unwrap(), Operation::Credit);
        assert_eq!("D".parse::<Operation>().unwrap(), Operation::Debit);
        assert_eq!("debit".parse::<Operation>().unwrap(), Operation::Debit);
        assert!("X".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_as_str() {
        assert_eq!(Operation::Credit.as_str(), "C");
        assert_eq!(Operation::Debit.as_str(), "D");
    }
}
