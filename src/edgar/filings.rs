// src/edgar/filings.rs
use crate::edgar::models::{FilingRow, Form};
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Rows of the given form, newest filing date first.
/// The SEC already lists filings newest first; rows with an unreadable date keep their place
/// behind the dated ones.
pub fn filter_by_form<'a>(rows: &'a [FilingRow], form: Form) -> Vec<&'a FilingRow> {
    let mut matching: Vec<&FilingRow> = rows.iter().filter(|row| row.form == form.as_str()).collect();
    matching.sort_by_key(|row| Reverse(NaiveDate::parse_from_str(&row.filing_date, "%Y-%m-%d").ok()));
    matching
}

/// The `number`-th most recent filing of `form`, counting from 1.
pub fn nth_latest(rows: &[FilingRow], form: Form, number: usize) -> Option<&FilingRow> {
    if number == 0 {
        return None;
    }
    filter_by_form(rows, form).into_iter().nth(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(accession: &str, date: &str, form: &str) -> FilingRow {
        FilingRow {
            accession_number: accession.to_string(),
            filing_date: date.to_string(),
            report_date: String::new(),
            acceptance_date_time: String::new(),
            act: String::new(),
            form: form.to_string(),
            file_number: String::new(),
            film_number: String::new(),
            items: String::new(),
            size: 0,
            is_xbrl: 0,
            is_inline_xbrl: 0,
            primary_document: format!("{}.htm", accession),
            primary_doc_description: String::new(),
        }
    }

    fn rows() -> Vec<FilingRow> {
        vec![
            row("a", "2023-08-04", "10-Q"),
            row("b", "2022-10-28", "10-K"),
            row("c", "2023-11-03", "10-K"),
            row("d", "2021-10-29", "10-K"),
            row("e", "not a date", "10-K"),
        ]
    }

    #[test]
    fn filter_keeps_only_the_form_newest_first() {
        let rows = rows();
        let tenk: Vec<&str> = filter_by_form(&rows, Form::TenK)
            .into_iter()
            .map(|r| r.accession_number.as_str())
            .collect();
        assert_eq!(tenk, vec!["c", "b", "d", "e"]);
        assert!(filter_by_form(&rows, Form::EightK).is_empty());
    }

    #[test]
    fn nth_latest_counts_from_one() {
        let rows = rows();
        assert_eq!(nth_latest(&rows, Form::TenK, 1).unwrap().accession_number, "c");
        assert_eq!(nth_latest(&rows, Form::TenK, 2).unwrap().accession_number, "b");
        assert_eq!(nth_latest(&rows, Form::TenQ, 1).unwrap().accession_number, "a");
        assert!(nth_latest(&rows, Form::TenQ, 2).is_none());
        assert!(nth_latest(&rows, Form::TenK, 0).is_none());
    }
}
