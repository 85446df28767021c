//! Birth moment: the solar-calendar input to derivation.

use super::errors::MeishikiError;

/// 出生時点（太陽暦）。導出への不変入力。
///
/// ここでは数値への変換までしか行わない。範囲（1900–2100 年など）と
/// 暦としての妥当性の検査は暦変換ブリッジの責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl BirthMoment {
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// フォームの文字列フィールドから変換する。
    ///
    /// 数値でない入力は「変換能力が入力を拒否した」扱い
    /// （MissingField は空欄専用）。
    pub fn from_fields(
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
    ) -> Result<Self, MeishikiError> {
        Ok(Self {
            year: parse_field("birth_year", year)?,
            month: parse_field("birth_month", month)?,
            day: parse_field("birth_day", day)?,
            hour: parse_field("birth_hour", hour)?,
        })
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, MeishikiError> {
    value.trim().parse().map_err(|_| {
        MeishikiError::CalendarConversion(format!("{name} is not a number: {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_form_fields() {
        let birth = BirthMoment::from_fields(" 1990 ", "5", "15", "14").unwrap();
        assert_eq!(birth, BirthMoment::new(1990, 5, 15, 14));
    }

    #[test]
    fn non_numeric_field_is_a_conversion_error() {
        let err = BirthMoment::from_fields("199O", "5", "15", "14").unwrap_err();
        match err {
            MeishikiError::CalendarConversion(msg) => assert!(msg.contains("birth_year")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
