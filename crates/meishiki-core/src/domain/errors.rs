//! Errors - エラー型と分類
//!
//! §導出まわりで起きうる失敗の分類:
//! - MissingField: 入力不足。ローカルで検出し、ブリッジは呼ばない
//! - CalendarConversion: 暦変換の拒否/失敗。記録は一切変更しない
//! - Blocked: 送信ガード。未完成の命式、または処理中
//!
//! 大運列が短すぎた場合（DecadeAnomaly）はエラーではなく非致命の警告で、
//! 四柱の結果はそのまま適用される。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeishikiError {
    #[error("missing birth fields: {}", fields.join("/"))]
    MissingField { fields: Vec<&'static str> },

    #[error("calendar conversion failed: {0}")]
    CalendarConversion(String),

    #[error("submission blocked: {0}")]
    Blocked(String),
}

/// 非致命の警告。大運列に正規の第一運が含まれていなかった。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeAnomaly {
    /// ブリッジが返した列の長さ（0 または 1）
    pub sequence_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_lists_field_names() {
        let err = MeishikiError::MissingField {
            fields: vec!["birth_year", "birth_hour"],
        };
        assert_eq!(
            err.to_string(),
            "missing birth fields: birth_year/birth_hour"
        );
    }

    #[test]
    fn conversion_error_carries_bridge_message() {
        let err = MeishikiError::CalendarConversion("year 1899 out of range".to_string());
        assert!(err.to_string().contains("1899"));
    }
}
