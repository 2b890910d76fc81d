//! ProSoft formatted-report XML parser.
//!
//! ProSoft exports its daily movement report as a Crystal-Reports-style
//! "formatted area" document: three nested levels of `FormattedAreaPair`
//! grouping, where the innermost pair list holds one container per
//! transaction, each bottoming out in a list of `FormattedReportObject`
//! elements carrying a `FieldName` attribute and one or more `Value`
//! children.

use crate::error::{Error, Result};
use crate::types::Entry;
use serde::Deserialize;
use std::io::Read;

/// Semantic keys the extractor maps ProSoft field tokens onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    IssueDate,
    Balance,
    CreditAmount,
    DebitAmount,
    Operation,
    EntryType,
    DocumentNumber,
    Description,
    EntryNumber,
    Counterparty,
    Reconciled,
    Updated,
}

/// Static extraction schema: ProSoft field-name tokens and the record key
/// each one feeds. Tokens absent from this table are dropped on extraction.
pub const EXTRACTION_SCHEMA: &[(&str, FieldKey)] = &[
    ("{MovDiário.Emissão}", FieldKey::IssueDate),
    ("{MovDiário.Saldo}", FieldKey::Balance),
    ("{MovDiário.Valor Crd}", FieldKey::CreditAmount),
    ("{MovDiário.Valor Deb}", FieldKey::DebitAmount),
    ("{MovDiário.Operação}", FieldKey::Operation),
    ("{MovDiário.Tipo}", FieldKey::EntryType),
    ("{MovDiário.Documento}", FieldKey::DocumentNumber),
    ("{MovDiário.Histórico}", FieldKey::Description),
    ("{MovDiário.Lançamento}", FieldKey::EntryNumber),
    ("{MovDiário.Terceiro}", FieldKey::Counterparty),
    ("{MovDiário.Conciliado}", FieldKey::Reconciled),
    ("{MovDiário.Atualizado}", FieldKey::Updated),
];

/// Look up the semantic key for a ProSoft field-name token.
pub fn schema_key(token: &str) -> Option<FieldKey> {
    EXTRACTION_SCHEMA
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, k)| *k)
}

/// A parsed ProSoft report, holding the extracted entries in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProsoftReport {
    /// Extracted entries, one per item container, in document order.
    pub entries: Vec<Entry>,
}

impl ProsoftReport {
    /// Parse a ProSoft report from any source implementing `Read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use myfinance_import::prosoft_format::ProsoftReport;
    ///
    /// let mut file = File::open("movements.xml")?;
    /// let report = ProsoftReport::from_read(&mut file)?;
    /// println!("{} entries", report.entries.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut xml_content = String::new();
        reader.read_to_string(&mut xml_content)?;

        let document: ReportXml = serde_xml_rs::from_str(&xml_content)?;

        Self::from_document(document)
    }

    fn from_document(document: ReportXml) -> Result<Self> {
        // Fixed descent: outer group -> inner group -> one pair per entry.
        let outer = first(&document.area_pairs, "FormattedAreaPair")?;
        let inner = first(&outer.area_pairs, "FormattedAreaPair (level 2)")?;

        let entries = inner
            .area_pairs
            .iter()
            .map(Self::extract_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(ProsoftReport { entries })
    }

    fn extract_entry(item: &AreaPairXml) -> Result<Entry> {
        let area = first(&item.areas, "FormattedArea")?;
        let sections = first(&area.sections, "FormattedSections")?;
        let section = first(&sections.sections, "FormattedSection")?;
        let objects = first(&section.objects, "FormattedReportObjects")?;

        let mut entry = Entry::default();
        for object in &objects.objects {
            let key = match schema_key(&object.field_name) {
                Some(key) => key,
                None => continue,
            };
            // First value wins when the field carries several.
            let value = match object.values.first() {
                Some(value) => value.clone(),
                None => continue,
            };
            set_field(&mut entry, key, value);
        }

        Ok(entry)
    }
}

/// First element of a nesting level, or a parse error naming the level.
fn first<'a, T>(items: &'a [T], level: &str) -> Result<&'a T> {
    items
        .first()
        .ok_or_else(|| Error::ParseError(format!("missing nesting level: {}", level)))
}

fn set_field(entry: &mut Entry, key: FieldKey, value: String) {
    match key {
        FieldKey::IssueDate => entry.issue_date = Some(value),
        FieldKey::Balance => entry.balance = Some(value),
        FieldKey::CreditAmount => entry.credit_amount = Some(value),
        FieldKey::DebitAmount => entry.debit_amount = Some(value),
        FieldKey::Operation => entry.operation = Some(value),
        FieldKey::EntryType => entry.entry_type = Some(value),
        FieldKey::DocumentNumber => entry.document_number = Some(value),
        FieldKey::Description => entry.description = Some(value),
        FieldKey::EntryNumber => entry.entry_number = Some(value),
        FieldKey::Counterparty => entry.counterparty = Some(value),
        FieldKey::Reconciled => entry.reconciled = Some(value),
        FieldKey::Updated => entry.updated = Some(value),
    }
}

// XML structure definitions
#[derive(Debug, Deserialize)]
#[serde(rename = "FormattedReport")]
struct ReportXml {
    #[serde(rename = "FormattedAreaPair", default)]
    area_pairs: Vec<AreaPairXml>,
}

#[derive(Debug, Deserialize)]
struct AreaPairXml {
    #[serde(rename = "FormattedAreaPair", default)]
    area_pairs: Vec<AreaPairXml>,
    #[serde(rename = "FormattedArea", default)]
    areas: Vec<AreaXml>,
}

#[derive(Debug, Deserialize)]
struct AreaXml {
    #[serde(rename = "FormattedSections", default)]
    sections: Vec<SectionsXml>,
}

#[derive(Debug, Deserialize)]
struct SectionsXml {
    #[serde(rename = "FormattedSection", default)]
    sections: Vec<SectionXml>,
}

#[derive(Debug, Deserialize)]
struct SectionXml {
    #[serde(rename = "FormattedReportObjects", default)]
    objects: Vec<ReportObjectsXml>,
}

#[derive(Debug, Deserialize)]
struct ReportObjectsXml {
    #[serde(rename = "FormattedReportObject", default)]
    objects: Vec<ReportObjectXml>,
}

#[derive(Debug, Deserialize)]
struct ReportObjectXml {
    #[serde(rename = "FieldName", default)]
    field_name: String,
    #[serde(rename = "Value", default)]
    values: Vec<String>,
}
