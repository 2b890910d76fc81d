//! MyFinance Importer Library
//!
//! A library for converting ProSoft XML movement exports into QIF bank
//! statements and uploading them to the MyFinance HTTP API.
//!
//! # Pipeline
//!
//! 1. **Extract**: parse the ProSoft formatted-report XML into ordered raw
//!    entries ([`prosoft_format`]).
//! 2. **Convert**: coerce dates and signed amounts, producing QIF
//!    transactions ([`conversion`]).
//! 3. **Encode**: write the `!Type:Bank` QIF file ([`qif_format`]).
//! 4. **Upload**: multipart POST of the file to MyFinance ([`upload`]).
//!
//! # Examples
//!
//! ## Converting an export to QIF
//!
//! ```no_run
//! use std::fs::File;
//! use myfinance_import::prosoft_format::ProsoftReport;
//! use myfinance_import::conversion::to_qif_statement;
//! use myfinance_import::qif_format::DEFAULT_QIF_DATE_FORMAT;
//!
//! let mut input = File::open("movements.xml")?;
//! let report = ProsoftReport::from_read(&mut input)?;
//! let statement = to_qif_statement(&report.entries)?;
//!
//! let mut output = File::create("movements.qif")?;
//! statement.write_to(&mut output, DEFAULT_QIF_DATE_FORMAT)?;
//! println!("{} transactions", statement.summary().total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod conversion;
pub mod error;
pub mod prosoft_format;
pub mod qif_format;
pub mod types;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use prosoft_format::ProsoftReport;
pub use qif_format::{QifStatement, QifTransaction};
pub use types::{ConversionSummary, Entry, Operation};
pub use upload::UploadClient;
