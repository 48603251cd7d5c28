use super::dto::{MIN_FIELDS, RawTransaction};
use crate::parsers::traits::Parser;
use csv::ReaderBuilder;

pub struct CsvParser;

impl CsvParser {
    fn header_fields(content: &str) -> Option<Vec<String>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header = reader.records().next()?.ok()?;
        Some(header.iter().map(|f| f.trim_start_matches('\u{feff}').trim().to_string()).collect())
    }
}

impl Parser for CsvParser {
    type Output = RawTransaction;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let has_csv_extension = filename
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(true);

        let looks_like_activity = Self::header_fields(content)
            .map(|header| {
                header.len() >= MIN_FIELDS
                    && header.first().is_some_and(|f| f.eq_ignore_ascii_case("date"))
            })
            .unwrap_or(false);

        has_csv_extension && looks_like_activity
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut transactions = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| format!("CSV read error: {}", e))?;
            transactions.push(RawTransaction::from_record(&record)?);
        }

        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_CSV: &str = r#""Date","Time","TimeZone","Name","Type","Status","Currency","Gross"
"15/03/2023","10:01:00","EST","Coffee Shop","Express Checkout Payment","Completed","CAD","-50.00"
"20/03/2023","09:00:00","EST","ACME Corp","Payment Received","Completed","CAD","1,200.00"
"21/03/2023","09:00:00","EST","","General Currency Conversion","Completed","USD","-10.00"
"#;

    #[rstest]
    #[case(Some("activity.csv"), SAMPLE_CSV, true)]
    #[case(Some("activity.CSV"), SAMPLE_CSV, true)]
    #[case(None, SAMPLE_CSV, true)]
    #[case(Some("activity.qfx"), SAMPLE_CSV, false)]
    #[case(None, "invalid content", false)]
    #[case(Some("activity.csv"), "", false)]
    #[case(Some("activity.csv"), "Date,Amount\n01/01/2023,5", false)]
    #[case(None, "\u{feff}Date,Time,TimeZone,Name,Type,Status,Currency,Gross\n", true)]
    fn test_is_supported(
        #[case] filename: Option<&str>,
        #[case] content: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(CsvParser::is_supported(filename, content), expected);
    }

    #[test]
    fn test_parse_valid_csv() {
        let txns = CsvParser::parse(SAMPLE_CSV).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].name, "Coffee Shop");
        assert_eq!(txns[0].amount, Decimal::from_str("-50.00").unwrap());
        assert_eq!(txns[1].amount, Decimal::from_str("1200.00").unwrap());
        assert_eq!(txns[2].name, "");
        assert_eq!(txns[2].currency, "USD");
    }

    #[test]
    fn test_parse_header_only() {
        let txns = CsvParser::parse("Date,Time,TimeZone,Name,Type,Status,Currency,Gross\n").unwrap();
        assert!(txns.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("Datum,Uhrzeit,Zeitzone,Name,Typ,Status,Währung,Brutto\n")]
    #[case("just one column\n")]
    fn test_parse_first_row_always_discarded(#[case] content: &str) {
        assert!(CsvParser::parse(content).unwrap().is_empty());

        let with_row = format!("{}01/01/2023,,,A,Payment,Completed,CAD,10\n", content);
        let txns = CsvParser::parse(&with_row).unwrap();
        let expected = if content.is_empty() { 0 } else { 1 };
        assert_eq!(txns.len(), expected);
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let content = "h0,h1,h2,h3,h4,h5,h6,h7\n\
                       01/01/2023,,,Alice,Payment,Completed,CAD,10\n\
                       01/01/2023,,,Alice,Payment,Completed,CAD,10\n";
        let txns = CsvParser::parse(content).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0], txns[1]);
    }

    #[test]
    fn test_parse_short_row_fails() {
        let invalid = "Date,Time,TimeZone,Name,Type,Status,Currency,Gross\n01/01/2023,invalid";
        let result = CsvParser::parse(invalid);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("line 2"));
    }
}
