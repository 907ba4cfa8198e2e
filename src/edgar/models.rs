// src/edgar/models.rs
use crate::utils::error::EdgarError;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// 0001193125-23-012345, with or without the dashes
static ACCESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{10}-?\d{2}-?\d{6}$").expect("Failed to compile ACCESSION_RE")
});

// CY2019, CY2019Q1, CY2019Q1I
static FRAME_PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^CY\d{4}(Q[1-4]I?)?$").expect("Failed to compile FRAME_PERIOD_RE")
});

/// Central Index Key. Always rendered as 10 zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(u64);

impl Cik {
    pub const MAX: u64 = 9_999_999_999;

    /// Returns `None` for values that cannot be written in 10 digits.
    pub fn new(value: u64) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

/// A resolved company: name, ticker and canonical CIK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    name: String,
    ticker: String,
    cik: Cik,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>, cik: Cik) -> Self {
        Self { name: name.into(), ticker: ticker.into(), cik }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn cik(&self) -> Cik {
        self.cik
    }
}

impl fmt::Display for CompanyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) CIK {}", self.name, self.ticker, self.cik)
    }
}

/// `cik_str` arrives as a JSON number from the SEC but hand-edited tables may hold strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCik {
    Number(u64),
    Text(String),
}

impl RawCik {
    pub fn to_cik(&self) -> Option<Cik> {
        match self {
            RawCik::Number(n) => Cik::new(*n),
            RawCik::Text(s) => s.trim().parse::<u64>().ok().and_then(Cik::new),
        }
    }
}

/// One value of `company_tickers.json`:
/// `{ "cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub cik_str: RawCik,
    pub ticker: String,
    #[serde(default)]
    pub title: String,
}

impl TickerEntry {
    pub fn to_record(&self) -> Option<CompanyRecord> {
        let cik = self.cik_str.to_cik()?;
        Some(CompanyRecord::new(self.title.clone(), self.ticker.clone(), cik))
    }
}

/// The ticker directory, keyed by arbitrary index ("0", "1", ...). Keeps file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<(String, TickerEntry)>,
}

impl LookupTable {
    pub fn new(entries: Vec<(String, TickerEntry)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TickerEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct LookupTableVisitor;

impl<'de> Visitor<'de> for LookupTableVisitor {
    type Value = LookupTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of ticker entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, entry)) = map.next_entry::<String, TickerEntry>()? {
            entries.push((key, entry));
        }
        Ok(LookupTable::new(entries))
    }
}

impl<'de> Deserialize<'de> for LookupTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LookupTableVisitor)
    }
}

impl Serialize for LookupTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Subset of https://data.sec.gov/submissions/CIK##########.json that we use.
#[derive(Debug, Deserialize)]
pub struct CompanySubmission {
    #[serde(default)]
    pub name: String,
    pub filings: Filings,
}

#[derive(Debug, Deserialize)]
pub struct Filings {
    pub recent: FilingsList,
}

/// Columnar filing arrays; index `i` of every vector describes the same filing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilingsList {
    pub accession_number: Vec<String>,
    pub filing_date: Vec<String>,
    pub report_date: Vec<String>,
    pub acceptance_date_time: Vec<String>,
    pub act: Vec<String>,
    pub form: Vec<String>,
    pub file_number: Vec<String>,
    pub film_number: Vec<String>,
    pub items: Vec<String>,
    pub size: Vec<u64>,
    #[serde(rename = "isXBRL")]
    pub is_xbrl: Vec<u8>,
    #[serde(rename = "isInlineXBRL")]
    pub is_inline_xbrl: Vec<u8>,
    pub primary_document: Vec<String>,
    pub primary_doc_description: Vec<String>,
}

fn column<T: Clone + Default>(values: &[T], i: usize) -> T {
    values.get(i).cloned().unwrap_or_default()
}

impl FilingsList {
    /// Pivots the columns into one row per filing. Short columns yield empty cells.
    pub fn to_rows(&self) -> Vec<FilingRow> {
        (0..self.accession_number.len())
            .map(|i| FilingRow {
                accession_number: self.accession_number[i].clone(),
                filing_date: column(&self.filing_date, i),
                report_date: column(&self.report_date, i),
                acceptance_date_time: column(&self.acceptance_date_time, i),
                act: column(&self.act, i),
                form: column(&self.form, i),
                file_number: column(&self.file_number, i),
                film_number: column(&self.film_number, i),
                items: column(&self.items, i),
                size: column(&self.size, i),
                is_xbrl: column(&self.is_xbrl, i),
                is_inline_xbrl: column(&self.is_inline_xbrl, i),
                primary_document: column(&self.primary_document, i),
                primary_doc_description: column(&self.primary_doc_description, i),
            })
            .collect()
    }
}

/// One filing as written to the submissions CSV. Headers keep the SEC column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRow {
    #[serde(rename = "accessionNumber")]
    pub accession_number: String,
    #[serde(rename = "filingDate")]
    pub filing_date: String,
    #[serde(rename = "reportDate")]
    pub report_date: String,
    #[serde(rename = "acceptanceDateTime")]
    pub acceptance_date_time: String,
    pub act: String,
    pub form: String,
    #[serde(rename = "fileNumber")]
    pub file_number: String,
    #[serde(rename = "filmNumber")]
    pub film_number: String,
    pub items: String,
    pub size: u64,
    #[serde(rename = "isXBRL")]
    pub is_xbrl: u8,
    #[serde(rename = "isInlineXBRL")]
    pub is_inline_xbrl: u8,
    #[serde(rename = "primaryDocument")]
    pub primary_document: String,
    #[serde(rename = "primaryDocDescription")]
    pub primary_doc_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Form {
    #[value(name = "10-K")]
    TenK,
    #[value(name = "10-Q")]
    TenQ,
    #[value(name = "8-K")]
    EightK,
    #[value(name = "20-F")]
    TwentyF,
    #[value(name = "S-1")]
    S1,
    #[value(name = "DEF 14A")]
    Def14A,
}

impl Form {
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::TenK => "10-K",
            Form::TenQ => "10-Q",
            Form::EightK => "8-K",
            Form::TwentyF => "20-F",
            Form::S1 => "S-1",
            Form::Def14A => "DEF 14A",
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accession number as used in archive paths (no dashes).
pub fn accession_path(accession: &str) -> Result<String, EdgarError> {
    let accession = accession.trim();
    if !ACCESSION_RE.is_match(accession) {
        return Err(EdgarError::InvalidParameter(format!(
            "'{}' is not an accession number (expected 0000000000-00-000000)",
            accession
        )));
    }
    Ok(accession.replace('-', ""))
}

/// Taxonomy, tag, unit and document names become URL segments and output file names,
/// so they must be a single plain path component.
pub fn validate_path_component<'a>(what: &str, value: &'a str) -> Result<&'a str, EdgarError> {
    if value.is_empty() || value == "." || value.contains("..") || value.contains(|c| c == '/' || c == '\\') {
        return Err(EdgarError::InvalidParameter(format!("'{}' is not a valid {}", value, what)));
    }
    Ok(value)
}

pub fn validate_frame_period(period: &str) -> Result<&str, EdgarError> {
    if FRAME_PERIOD_RE.is_match(period) {
        Ok(period)
    } else {
        Err(EdgarError::InvalidParameter(format!(
            "'{}' is not a calendrical period (expected CY2019, CY2019Q1 or CY2019Q1I)",
            period
        )))
    }
}
