use crate::errors::HistoryError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Representa uma data extraída de uma exportação de atividade.
///
/// As datas vêm sempre no formato `DD/MM/YYYY` (dia, mês com base 1, ano),
/// sem fuso horário. O texto original é preservado até a resolução, para
/// que linhas com datas inválidas possam ser rejeitadas explicitamente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvDate(String);

impl CsvDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converte `DD/MM/YYYY` para `NaiveDate`, rejeitando dias impossíveis
    pub fn parse(&self) -> Result<NaiveDate, HistoryError> {
        let s = self.0.trim();
        let invalid = || HistoryError::CsvDateInvalidFormat(s.to_string());

        let mut parts = s.split('/');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let day: u32 = day.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

impl From<String> for CsvDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<CsvDate> for NaiveDate {
    type Error = HistoryError;

    fn try_from(date: CsvDate) -> Result<Self, Self::Error> {
        date.parse()
    }
}

/// Converte o valor em melhor esforço: remove separadores de milhar e
/// espaços; qualquer texto que ainda não seja numérico vale zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use rstest::rstest;

    #[rstest]
    #[case("26/12/2025", 2025, 12, 26)]
    #[case("01/01/2023", 2023, 1, 1)]
    #[case("15/03/2023", 2023, 3, 15)]
    #[case("1/2/2024", 2024, 2, 1)]
    #[case("29/02/2024", 2024, 2, 29)]
    fn test_csv_date_valid_formats(
        #[case] input: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let csv_date = CsvDate::from(input);
        let result: Result<NaiveDate, _> = csv_date.try_into();

        assert!(result.is_ok());
        let date = result.unwrap();
        assert_eq!(date.year(), year);
        assert_eq!(date.month(), month);
        assert_eq!(date.day(), day);
    }

    #[rstest]
    #[case("2025-12-26")]     // formato ISO não é aceito
    #[case("12/26/2025")]     // mês 26 não existe
    #[case("32/12/2025")]     // dia inválido
    #[case("29/02/2025")]     // 2025 não é bissexto
    #[case("aa/bb/cccc")]
    #[case("01/01")]
    #[case("01/01/2023/01")]
    #[case("")]               // vazio
    #[case("   ")]            // só espaços
    fn test_csv_date_invalid_formats(#[case] input: &str) {
        let csv_date = CsvDate::from(input);
        let result: Result<NaiveDate, _> = csv_date.try_into();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            HistoryError::CsvDateInvalidFormat(_)
        ));
    }

    #[test]
    fn test_trimmed_input() {
        let date = CsvDate::from("  26/12/2025  ");
        let parsed: NaiveDate = date.try_into().unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 12, 26).unwrap());
    }

    #[test]
    fn test_csv_date_serialization() {
        let date = CsvDate::from("26/12/2025");
        let json = serde_json::to_string(&date).unwrap();
        assert!(json.contains("26/12/2025"));

        let deserialized: CsvDate = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, date);
    }

    #[rstest]
    #[case("100.00", "100.00")]
    #[case("1,234.56", "1234.56")]
    #[case(" -50 ", "-50")]
    #[case("-1,000,000.01", "-1000000.01")]
    #[case("", "0")]
    #[case("   ", "0")]
    #[case("n/a", "0")]
    #[case("$10.00", "0")]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(parse_amount(raw), Decimal::from_str(expected).unwrap());
    }
}
