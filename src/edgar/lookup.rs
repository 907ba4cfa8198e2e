// src/edgar/lookup.rs
use crate::config::AppContext;
use crate::edgar::models::{Cik, CompanyRecord, LookupTable};
use crate::utils::error::ResolveError;
use std::fs;
use std::path::Path;

/// What the user typed: an integer (optionally signed) is a CIK, anything else a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyQuery {
    /// Canonical digits (sign kept, leading zeros dropped) and the value, if it fits a CIK.
    Cik { digits: String, value: Option<u64> },
    Ticker(String),
}

impl CompanyQuery {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (negative, unsigned) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return CompanyQuery::Ticker(input.to_uppercase());
        }

        let magnitude = match unsigned.trim_start_matches('0') {
            "" => "0",
            rest => rest,
        };
        let digits = if negative && magnitude != "0" {
            format!("-{}", magnitude)
        } else {
            magnitude.to_string()
        };
        let value = if digits.starts_with('-') {
            None
        } else {
            magnitude.parse::<u64>().ok().filter(|v| *v <= Cik::MAX)
        };
        CompanyQuery::Cik { digits, value }
    }
}

/// Resolves a CIK or ticker against `table`. The table is not modified.
///
/// When several entries match (share classes often share one CIK, e.g. GOOG/GOOGL),
/// the first one in table order wins.
pub fn resolve(table: &LookupTable, input: &str) -> Result<CompanyRecord, ResolveError> {
    let query = CompanyQuery::parse(input);

    let mut matches = table.entries().filter(|entry| match &query {
        CompanyQuery::Cik { value, .. } => value.is_some() && entry.cik_str.to_cik().map(|c| c.value()) == *value,
        CompanyQuery::Ticker(ticker) => entry.ticker.to_uppercase() == *ticker,
    });

    // entries whose cik_str is unusable are skipped; `to_record` only fails on those
    let first = matches.find_map(|entry| entry.to_record());
    let extra = matches.filter(|entry| entry.to_record().is_some()).count();

    match (first, query) {
        (Some(record), _) => {
            if extra > 0 {
                tracing::warn!(
                    "'{}' matched {} companies, using the first: {}",
                    input.trim(),
                    extra + 1,
                    record
                );
            }
            Ok(record)
        }
        (None, CompanyQuery::Cik { digits, .. }) => Err(ResolveError::IdentifierNotFound(digits)),
        (None, CompanyQuery::Ticker(ticker)) => Err(ResolveError::TickerNotFound(ticker)),
    }
}

/// Reads a stored ticker table. Called fresh on every lookup.
pub fn load_table(path: &Path) -> Result<LookupTable, ResolveError> {
    if !path.exists() {
        return Err(ResolveError::TableMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    let table: LookupTable = serde_json::from_str(&raw)?;
    tracing::debug!("Loaded {} ticker entries from {}", table.len(), path.display());
    Ok(table)
}

/// Resolves against `company_tickers.json` in the configuration directory.
pub fn resolve_stored(ctx: &AppContext, input: &str) -> Result<CompanyRecord, ResolveError> {
    let table = load_table(&ctx.tickers_file())?;
    resolve(&table, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgar::models::{RawCik, TickerEntry};

    fn entry(cik: RawCik, ticker: &str, title: &str) -> TickerEntry {
        TickerEntry { cik_str: cik, ticker: ticker.to_string(), title: title.to_string() }
    }

    fn sample_table() -> LookupTable {
        LookupTable::new(vec![
            ("0".into(), entry(RawCik::Number(320193), "AAPL", "Apple Inc.")),
            ("1".into(), entry(RawCik::Number(789019), "MSFT", "MICROSOFT CORP")),
            ("2".into(), entry(RawCik::Number(1652044), "GOOGL", "Alphabet Inc.")),
            ("3".into(), entry(RawCik::Number(1652044), "GOOG", "Alphabet Inc.")),
            ("4".into(), entry(RawCik::Text("0000000007".into()), "SEVN", "Seven Co")),
            ("5".into(), entry(RawCik::Text("garbage".into()), "JUNK", "Junk Co")),
        ])
    }

    #[test]
    fn ticker_lookup_is_case_insensitive() {
        let record = resolve(&sample_table(), "aapl").unwrap();
        assert_eq!(record.ticker(), "AAPL");
        assert_eq!(record.name(), "Apple Inc.");
        assert_eq!(record.cik().to_string(), "0000320193");

        let record = resolve(&sample_table(), "  MsFt ").unwrap();
        assert_eq!(record.ticker(), "MSFT");
    }

    #[test]
    fn numeric_lookup_is_padded_to_ten_digits() {
        for input in ["320193", "0000320193", "00320193"] {
            let record = resolve(&sample_table(), input).unwrap();
            assert_eq!(record.cik().to_string(), "0000320193");
        }

        // stored as a padded string, queried as a bare digit
        let record = resolve(&sample_table(), "7").unwrap();
        assert_eq!(record.ticker(), "SEVN");
        assert_eq!(record.cik().to_string(), "0000000007");
    }

    #[test]
    fn numeric_results_are_ten_ascii_digits_for_every_length() {
        let mut entries = Vec::new();
        let mut value = 0u64;
        for digits in 1..=10 {
            value = value * 10 + (digits as u64 % 9) + 1;
            entries.push((digits.to_string(), entry(RawCik::Number(value), &format!("T{}", digits), "Co")));
        }
        let table = LookupTable::new(entries.clone());

        for (_, e) in &entries {
            let RawCik::Number(n) = e.cik_str else { unreachable!() };
            let cik = resolve(&table, &n.to_string()).unwrap().cik().to_string();
            assert_eq!(cik.len(), 10);
            assert!(cik.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn shared_cik_returns_first_in_table_order() {
        let record = resolve(&sample_table(), "1652044").unwrap();
        assert_eq!(record.ticker(), "GOOGL");
    }

    #[test]
    fn misses_are_not_found_errors() {
        let err = resolve(&sample_table(), "ZZZZ").unwrap_err();
        assert!(matches!(err, ResolveError::TickerNotFound(ref t) if t == "ZZZZ"));
        assert_eq!(err.to_string(), "no results for ticker ZZZZ");

        let err = resolve(&sample_table(), "42").unwrap_err();
        assert!(matches!(err, ResolveError::IdentifierNotFound(ref d) if d == "42"));
        assert_eq!(err.to_string(), "no results for identifier 42");

        // unusable stored CIK never yields a record
        assert!(resolve(&sample_table(), "junk").is_err());
        assert!(resolve(&LookupTable::default(), "AAPL").is_err());
    }

    #[test]
    fn any_integer_takes_the_identifier_path() {
        let cases = [
            ("123456789012345678901234", "123456789012345678901234"),
            ("10000000000", "10000000000"),
            ("-5", "-5"),
            ("+42", "42"),
            ("-0000320193", "-320193"),
            ("000", "0"),
        ];
        for (input, shown) in cases {
            let err = resolve(&sample_table(), input).unwrap_err();
            assert_eq!(err.to_string(), format!("no results for identifier {}", shown), "input {}", input);
        }

        // a sign alone, or digits mixed with letters, is still a ticker
        for input in ["-", "+", "BRK-B", "12A"] {
            assert!(matches!(CompanyQuery::parse(input), CompanyQuery::Ticker(_)), "input {}", input);
        }
    }

    #[test]
    fn parse_keeps_the_value_only_when_it_fits_a_cik() {
        assert_eq!(
            CompanyQuery::parse(" 0000320193 "),
            CompanyQuery::Cik { digits: "320193".into(), value: Some(320193) }
        );
        assert_eq!(
            CompanyQuery::parse("99999999999"),
            CompanyQuery::Cik { digits: "99999999999".into(), value: None }
        );
        assert_eq!(CompanyQuery::parse("-7"), CompanyQuery::Cik { digits: "-7".into(), value: None });
        assert_eq!(CompanyQuery::parse("msft"), CompanyQuery::Ticker("MSFT".into()));
    }

    #[test]
    fn resolve_stored_reads_the_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(dir.path());

        let err = resolve_stored(&ctx, "AAPL").unwrap_err();
        assert!(matches!(err, ResolveError::TableMissing(_)));

        fs::write(
            ctx.tickers_file(),
            r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#,
        )
        .unwrap();
        let record = resolve_stored(&ctx, "aapl").unwrap();
        assert_eq!(record.cik().to_string(), "0000320193");

        fs::write(ctx.tickers_file(), "[1, 2, 3]").unwrap();
        assert!(matches!(resolve_stored(&ctx, "AAPL"), Err(ResolveError::TableMalformed(_))));
    }
}
